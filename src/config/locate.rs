//! Configuration file discovery

use std::path::{Path, PathBuf};

use super::errors::{ConfigError, ConfigResult};
use super::CONFIG_FILE_NAME;

const CONFIG_ARGUMENT: &str = "-config=";

/// Finds the configuration file.
///
/// Development mode reads it from `base_dir`. Production mode takes the
/// directory of the host's `-config=<path>` argument; relative paths are
/// resolved against `base_dir`.
pub fn locate_config(args: &[String], is_production: bool, base_dir: &Path) -> ConfigResult<PathBuf> {
    let dir = if is_production {
        let value = config_argument(args).ok_or(ConfigError::ArgumentMissing)?;
        let host_config = Path::new(value);
        let dir = match host_config.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => base_dir.join(parent),
            _ => base_dir.to_path_buf(),
        };
        if !dir.is_dir() {
            return Err(ConfigError::DirectoryNotFound(dir));
        }
        dir
    } else {
        base_dir.to_path_buf()
    };

    let file = dir.join(CONFIG_FILE_NAME);
    if !file.is_file() {
        return Err(ConfigError::FileNotFound(file));
    }
    Ok(file)
}

/// Value of the first `-config=` argument, case-insensitive, quotes stripped
fn config_argument(args: &[String]) -> Option<&str> {
    args.iter().find_map(|arg| {
        let prefix = arg.get(..CONFIG_ARGUMENT.len())?;
        if !prefix.eq_ignore_ascii_case(CONFIG_ARGUMENT) {
            return None;
        }
        let value = arg[CONFIG_ARGUMENT.len()..].trim().trim_matches('"');
        (!value.is_empty()).then_some(value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_development_reads_base_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "{}").unwrap();

        let path = locate_config(&[], false, tmp.path()).unwrap();
        assert_eq!(path, tmp.path().join(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_development_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = locate_config(&[], false, tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_production_uses_config_argument_directory() {
        let tmp = TempDir::new().unwrap();
        let server = tmp.path().join("server");
        fs::create_dir(&server).unwrap();
        fs::write(server.join(CONFIG_FILE_NAME), "{}").unwrap();

        let host_config = format!("-CONFIG=\"{}\"", server.join("server.cfg").display());
        let path = locate_config(&args(&["host.exe", "-port=2302", &host_config]), true, tmp.path())
            .unwrap();
        assert_eq!(path, server.join(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_production_relative_argument() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("cfg")).unwrap();
        fs::write(tmp.path().join("cfg").join(CONFIG_FILE_NAME), "{}").unwrap();

        let path = locate_config(&args(&["-config=cfg/server.cfg"]), true, tmp.path()).unwrap();
        assert_eq!(path, tmp.path().join("cfg").join(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_production_failures_are_distinct() {
        let tmp = TempDir::new().unwrap();

        let err = locate_config(&args(&["host.exe"]), true, tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ArgumentMissing));

        let err = locate_config(&args(&["-config=missing/server.cfg"]), true, tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::DirectoryNotFound(_)));

        let err = locate_config(&args(&["-config=server.cfg"]), true, tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }
}
