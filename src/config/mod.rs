//! Configuration
//!
//! Loaded once by the bootstrap operation from `hive.json`. Missing required
//! keys fail setup before any connection is attempted.

mod errors;
mod locate;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::observability::{LogSink, Severity};

pub use errors::{ConfigError, ConfigResult};
pub use locate::locate_config;

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "hive.json";

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Database connection settings (required)
    pub database: DatabaseConfig,

    /// Updates on soft-deletion tables also clear the deletion marker
    #[serde(default)]
    pub update_reverts_soft_deletion: bool,

    /// Minimum log severity (required)
    pub log_level: Severity,

    /// Log destination (required)
    pub log_sink: LogSink,

    /// Worker pool size (optional, default 4)
    #[serde(default = "default_worker_threads")]
    pub worker_threads: usize,
}

/// Database settings
#[derive(Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Directory holding the database file
    pub host: String,
    pub user: String,
    pub password: String,
    /// Schema name; the file is `<host>/<schema>.db`
    pub schema: String,

    /// Connection busy timeout in milliseconds (optional, default 1000)
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_worker_threads() -> usize {
    4
}

fn default_busy_timeout_ms() -> u64 {
    1000
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("schema", &self.schema)
            .field("busy_timeout_ms", &self.busy_timeout_ms)
            .finish()
    }
}

impl DatabaseConfig {
    /// Path of the database file
    pub fn database_path(&self) -> PathBuf {
        Path::new(&self.host).join(format!("{}.db", self.schema))
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

impl Config {
    /// Loads and validates a configuration file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Locates the file from the process arguments and working directory,
    /// then loads it
    pub fn discover(is_production: bool) -> ConfigResult<Self> {
        let args: Vec<String> = std::env::args().collect();
        let base_dir = std::env::current_dir().map_err(ConfigError::WorkingDirectory)?;
        let path = locate_config(&args, is_production, &base_dir)?;
        Self::load(&path)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.database.host.trim().is_empty() {
            return Err(ConfigError::Invalid("database.host must not be empty".into()));
        }
        let schema = self.database.schema.trim();
        if schema.is_empty() {
            return Err(ConfigError::Invalid("database.schema must not be empty".into()));
        }
        if schema.contains(['/', '\\']) {
            return Err(ConfigError::Invalid(format!(
                "database.schema `{}` must be a plain name",
                schema
            )));
        }
        if self.worker_threads == 0 {
            return Err(ConfigError::Invalid("worker_threads must be > 0".into()));
        }
        Ok(())
    }
}
