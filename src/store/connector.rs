//! Per-statement connections to the database file

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OpenFlags};

use crate::catalog::TableSchema;

use super::errors::{StoreError, StoreResult};
use super::introspect::describe_tables;

/// Rows returned by a query, with the column names of the projection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// Opens a fresh connection for every statement.
///
/// Connection reuse is left to the engine's own page cache; no state is
/// shared between statements.
#[derive(Debug, Clone)]
pub struct Connector {
    path: PathBuf,
    busy_timeout: Duration,
}

impl Connector {
    pub fn new(path: impl Into<PathBuf>, busy_timeout: Duration) -> Self {
        Self {
            path: path.into(),
            busy_timeout,
        }
    }

    /// Database file this connector opens
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a read-write connection. The file must already exist.
    pub fn open(&self) -> StoreResult<Connection> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(&self.path, flags).map_err(|source| {
            StoreError::Open {
                path: self.path.display().to_string(),
                source,
            }
        })?;
        conn.busy_timeout(self.busy_timeout)?;
        Ok(conn)
    }

    /// Opens a connection and runs a trivial statement
    pub fn ping(&self) -> StoreResult<()> {
        let conn = self.open()?;
        let one: i64 = conn.query_row("SELECT 1", [], |row| row.get(0))?;
        if one != 1 {
            return Err(StoreError::Ping(format!("SELECT 1 returned {}", one)));
        }
        Ok(())
    }

    /// Reads every table and its columns
    pub fn describe(&self) -> StoreResult<Vec<TableSchema>> {
        let conn = self.open()?;
        describe_tables(&conn)
    }

    /// Runs a query and materializes all rows
    pub fn query(&self, sql: &str, params: &[Value]) -> StoreResult<RowSet> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(sql)?;
        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();

        let mut rows = stmt.query(params_from_iter(params.iter()))?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(columns.len());
            for i in 0..columns.len() {
                values.push(row.get::<_, Value>(i)?);
            }
            out.push(values);
        }

        Ok(RowSet { columns, rows: out })
    }

    /// Executes a statement and returns the number of affected rows
    pub fn execute(&self, sql: &str, params: &[Value]) -> StoreResult<usize> {
        let conn = self.open()?;
        let affected = conn.execute(sql, params_from_iter(params.iter()))?;
        Ok(affected)
    }

    /// Executes an insert and returns the rowid the store assigned
    pub fn insert(&self, sql: &str, params: &[Value]) -> StoreResult<i64> {
        let conn = self.open()?;
        conn.execute(sql, params_from_iter(params.iter()))?;
        Ok(conn.last_insert_rowid())
    }
}
