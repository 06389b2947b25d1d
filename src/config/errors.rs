//! Configuration errors
//!
//! Every configuration error aborts bootstrap.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no -config=<path> argument on the host command line")]
    ArgumentMissing,

    #[error("configuration directory `{0}` does not exist")]
    DirectoryNotFound(PathBuf),

    #[error("configuration file `{0}` does not exist")]
    FileNotFound(PathBuf),

    #[error("cannot determine working directory: {0}")]
    WorkingDirectory(#[source] io::Error),

    #[error("failed to read `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        "HIVE_CONFIG_ERROR"
    }
}
