//! Relational store driver
//!
//! Thin layer over the embedded SQLite engine. Every statement opens its own
//! connection and drops it on completion, so no two statements ever share a
//! cursor. The only timeout is the connection busy timeout.

mod connector;
mod convert;
mod errors;
mod introspect;

pub use connector::{Connector, RowSet};
pub use convert::{from_sql, to_sql};
pub use errors::{StoreError, StoreResult};
pub use introspect::describe_tables;

/// Re-export of the driver's owned value type used for bound parameters
pub use rusqlite::types::Value as SqlValue;

/// Quotes an identifier for embedding in a statement.
///
/// Identifiers come from the introspected catalog, never from the host,
/// but embedded quotes are still doubled.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
