//! Schema Catalog
//!
//! One-shot introspection result describing every table in the configured
//! schema. The catalog is written exactly once at bootstrap and read without
//! locking afterwards.
//!
//! # Conventions
//!
//! - Table names are looked up case-insensitively (stored lower-cased)
//! - Column order is the declaration order; statement generation matches
//!   values to columns positionally
//! - A table implements soft deletion when its last two columns are
//!   `Deleted` and `DeletedAt`

mod errors;
mod schema_catalog;
mod types;

pub use errors::{CatalogError, CatalogResult};
pub use schema_catalog::SchemaCatalog;
pub use types::{ColumnDescriptor, PrimaryKeyKind, TableSchema, AUTO_INCREMENT};
pub use types::{DELETED_AT_COLUMN, DELETED_COLUMN};
