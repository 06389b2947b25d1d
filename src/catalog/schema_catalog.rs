//! Write-once table registry

use std::collections::HashMap;
use std::sync::OnceLock;

use super::errors::{CatalogError, CatalogResult};
use super::types::TableSchema;

/// Table name (lower-cased) to schema, installed exactly once.
#[derive(Debug, Default)]
pub struct SchemaCatalog {
    tables: OnceLock<HashMap<String, TableSchema>>,
}

impl SchemaCatalog {
    /// Create an empty, uninitialized catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the introspected tables.
    ///
    /// Fails with `AlreadyInitialized` on every call after the first.
    pub fn install(&self, tables: Vec<TableSchema>) -> CatalogResult<()> {
        if self.is_initialized() {
            return Err(CatalogError::AlreadyInitialized);
        }

        let map = tables
            .into_iter()
            .map(|table| (table.name().to_lowercase(), table))
            .collect();

        self.tables
            .set(map)
            .map_err(|_| CatalogError::AlreadyInitialized)
    }

    /// Whether introspection has completed
    pub fn is_initialized(&self) -> bool {
        self.tables.get().is_some()
    }

    /// Looks up a table by name, ignoring case
    pub fn table(&self, name: &str) -> CatalogResult<&TableSchema> {
        self.tables
            .get()
            .and_then(|tables| tables.get(&name.to_lowercase()))
            .ok_or_else(|| CatalogError::SchemaNotFound(name.to_string()))
    }

    /// Lower-cased table names, sorted
    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .tables
            .get()
            .map(|tables| tables.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.tables.get().map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
