//! Store errors
//!
//! Every driver failure surfaces to the caller as a single database error;
//! nothing is retried.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Connection or statement failure
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open database `{path}`: {source}")]
    Open {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("connection check failed: {0}")]
    Ping(String),

    #[error("statement failed: {0}")]
    Statement(#[from] rusqlite::Error),
}

impl StoreError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        "HIVE_DATABASE_ERROR"
    }
}
