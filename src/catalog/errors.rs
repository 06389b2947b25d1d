//! Catalog error types

use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The catalog was already built; introspection runs once per process
    #[error("schema catalog is already initialized")]
    AlreadyInitialized,

    /// Table is not part of the introspected schema
    #[error("table `{0}` was not found in the schema")]
    SchemaNotFound(String),
}

impl CatalogError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::AlreadyInitialized => "HIVE_ALREADY_INITIALIZED",
            CatalogError::SchemaNotFound(_) => "HIVE_SCHEMA_NOT_FOUND",
        }
    }

    /// A second describe is an initialization bug
    pub fn is_fatal(&self) -> bool {
        matches!(self, CatalogError::AlreadyInitialized)
    }
}
