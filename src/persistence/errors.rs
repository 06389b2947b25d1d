//! Persistence error types
//!
//! Validation errors are raised before any connection is opened; a
//! `Database` error means the store itself rejected the statement.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::store::StoreError;

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Persistence errors
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("table `{0}` was not found in the schema")]
    SchemaNotFound(String),

    #[error("schema catalog is already initialized")]
    AlreadyInitialized,

    #[error("first column of table `{0}` must be its primary key")]
    PrimaryKeyNotFirst(String),

    #[error("primary key of table `{table}` must be a {expected}, got {found}")]
    InvalidPrimaryKeyType {
        table: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error(
        "argument count mismatch for table `{table}`: supplied {supplied}, expected {expected} \
         (omit soft-deletion columns from the input)"
    )]
    ArgumentCount {
        table: String,
        expected: usize,
        supplied: usize,
    },

    #[error("database error: {0}")]
    Database(#[from] StoreError),
}

impl PersistenceError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            PersistenceError::SchemaNotFound(_) => "HIVE_SCHEMA_NOT_FOUND",
            PersistenceError::AlreadyInitialized => "HIVE_ALREADY_INITIALIZED",
            PersistenceError::PrimaryKeyNotFirst(_) => "HIVE_PRIMARY_KEY_NOT_FIRST",
            PersistenceError::InvalidPrimaryKeyType { .. } => "HIVE_INVALID_PRIMARY_KEY_TYPE",
            PersistenceError::ArgumentCount { .. } => "HIVE_ARGUMENT_COUNT",
            PersistenceError::Database(e) => e.code(),
        }
    }

    /// Only a repeated catalog build indicates a broken process
    pub fn is_fatal(&self) -> bool {
        matches!(self, PersistenceError::AlreadyInitialized)
    }
}

impl From<CatalogError> for PersistenceError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::AlreadyInitialized => PersistenceError::AlreadyInitialized,
            CatalogError::SchemaNotFound(table) => PersistenceError::SchemaNotFound(table),
        }
    }
}

impl From<rusqlite::Error> for PersistenceError {
    fn from(err: rusqlite::Error) -> Self {
        PersistenceError::Database(StoreError::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_errors_map_through() {
        let err = PersistenceError::from(CatalogError::SchemaNotFound("t".into()));
        assert!(matches!(err, PersistenceError::SchemaNotFound(ref t) if t == "t"));
        assert_eq!(err.code(), "HIVE_SCHEMA_NOT_FOUND");

        let err = PersistenceError::from(CatalogError::AlreadyInitialized);
        assert!(err.is_fatal());
    }

    #[test]
    fn test_argument_count_message() {
        let err = PersistenceError::ArgumentCount {
            table: "players".into(),
            expected: 4,
            supplied: 6,
        };
        let message = err.to_string();
        assert!(message.contains("supplied 6"));
        assert!(message.contains("expected 4"));
        assert_eq!(err.code(), "HIVE_ARGUMENT_COUNT");
    }
}
