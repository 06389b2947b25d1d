//! Database gateway used by operations

use tracing::{debug, info};

use crate::catalog::SchemaCatalog;
use crate::store::{to_sql, Connector};
use crate::wire::WireValue;

use super::errors::PersistenceResult;
use super::generator::StatementGenerator;
use super::shape::shape_rows;
use super::statement::{InsertKey, ReadQuery, ResultShape};

/// Owns the connector and the schema catalog.
///
/// Safe to share between threads: the catalog is write-once and every
/// statement opens its own connection.
#[derive(Debug)]
pub struct Database {
    connector: Connector,
    catalog: SchemaCatalog,
    revive_on_update: bool,
}

impl Database {
    pub fn new(connector: Connector, revive_on_update: bool) -> Self {
        Self {
            connector,
            catalog: SchemaCatalog::new(),
            revive_on_update,
        }
    }

    /// Checks the store is reachable
    pub fn connect(&self) -> PersistenceResult<()> {
        self.connector.ping()?;
        info!(path = %self.connector.path().display(), "database reachable");
        Ok(())
    }

    /// Introspects the schema and installs the catalog.
    ///
    /// Returns the number of tables found. Fails with `AlreadyInitialized`
    /// if the catalog was already built.
    pub fn describe_schema(&self) -> PersistenceResult<usize> {
        if self.catalog.is_initialized() {
            return Err(crate::catalog::CatalogError::AlreadyInitialized.into());
        }
        let tables = self.connector.describe()?;
        let count = tables.len();
        self.catalog.install(tables)?;
        info!(tables = count, "schema catalog installed");
        Ok(count)
    }

    pub fn catalog(&self) -> &SchemaCatalog {
        &self.catalog
    }

    fn generator(&self) -> StatementGenerator<'_> {
        StatementGenerator::new(&self.catalog, self.revive_on_update)
    }

    /// Reads rows, omitting soft-deleted ones
    pub fn read(
        &self,
        table: &str,
        columns: &str,
        predicate: &str,
        params: Vec<WireValue>,
        shape: ResultShape,
    ) -> PersistenceResult<WireValue> {
        let query = ReadQuery::table(table)
            .columns(columns)
            .filter(predicate, params)
            .shape(shape);
        self.read_query(&query)
    }

    pub fn read_query(&self, query: &ReadQuery) -> PersistenceResult<WireValue> {
        let plan = self.generator().read(query)?;
        debug!(table = plan.schema.name(), sql = %plan.statement.sql, "read");

        let rows = self
            .connector
            .query(&plan.statement.sql, &plan.statement.params)?;
        Ok(shape_rows(plan.schema, rows, plan.shape, plan.hidden_marker))
    }

    /// Inserts one row and returns its primary key
    pub fn insert(&self, table: &str, values: &[WireValue]) -> PersistenceResult<WireValue> {
        let plan = self.generator().insert(table, values)?;
        debug!(table, sql = %plan.statement.sql, "insert");

        match plan.key {
            InsertKey::StoreAssigned => {
                let id = self
                    .connector
                    .insert(&plan.statement.sql, &plan.statement.params)?;
                Ok(WireValue::from(id))
            }
            InsertKey::Known(key) => {
                self.connector
                    .execute(&plan.statement.sql, &plan.statement.params)?;
                Ok(key)
            }
        }
    }

    /// Updates one row by key; returns the number of affected rows
    pub fn update(&self, table: &str, values: &[WireValue]) -> PersistenceResult<usize> {
        let Some(statement) = self.generator().update(table, values)? else {
            debug!(table, "update has no columns to set");
            return Ok(0);
        };
        debug!(table, sql = %statement.sql, "update");
        Ok(self.connector.execute(&statement.sql, &statement.params)?)
    }

    /// Executes a caller-written statement with bound parameters
    pub fn write_raw(&self, sql: &str, params: &[WireValue]) -> PersistenceResult<usize> {
        debug!(sql, "raw write");
        let params: Vec<_> = params.iter().map(to_sql).collect();
        Ok(self.connector.execute(sql, &params)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::PersistenceError;
    use rusqlite::Connection;
    use std::time::Duration;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Database) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("game.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch(
                "CREATE TABLE Tags (Id INTEGER PRIMARY KEY AUTOINCREMENT, Label TEXT, Pinned TINYINT(1));",
            )
            .unwrap();
        let db = Database::new(Connector::new(path, Duration::from_millis(200)), false);
        db.connect().unwrap();
        db.describe_schema().unwrap();
        (tmp, db)
    }

    #[test]
    fn test_describe_schema_twice_fails() {
        let (_tmp, db) = setup();
        let err = db.describe_schema().unwrap_err();
        assert!(matches!(err, PersistenceError::AlreadyInitialized));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_auto_increment_round_trip() {
        let (_tmp, db) = setup();

        let first = db
            .insert("Tags", &[WireValue::from("red"), WireValue::Bool(true)])
            .unwrap();
        let second = db
            .insert("Tags", &[WireValue::from("blue"), WireValue::Bool(false)])
            .unwrap();
        assert_eq!(first, WireValue::Number(1.0));
        assert_eq!(second, WireValue::Number(2.0));

        let row = db
            .read("Tags", "*", "\"Id\" = ?1", vec![first], ResultShape::None)
            .unwrap();
        assert_eq!(
            row,
            WireValue::Array(vec![
                WireValue::Number(1.0),
                WireValue::from("red"),
                WireValue::Bool(true),
            ])
        );
    }

    #[test]
    fn test_write_raw_returns_affected_rows() {
        let (_tmp, db) = setup();
        db.insert("Tags", &[WireValue::from("a"), WireValue::Bool(false)]).unwrap();
        db.insert("Tags", &[WireValue::from("b"), WireValue::Bool(false)]).unwrap();

        let affected = db
            .write_raw("UPDATE Tags SET Pinned = ?1", &[WireValue::Bool(true)])
            .unwrap();
        assert_eq!(affected, 2);

        let affected = db
            .write_raw("DELETE FROM Tags WHERE Label = ?1", &[WireValue::from("zzz")])
            .unwrap();
        assert_eq!(affected, 0);
    }

    #[test]
    fn test_store_errors_surface() {
        let (_tmp, db) = setup();
        let err = db.write_raw("DELETE FROM Nowhere", &[]).unwrap_err();
        assert!(matches!(err, PersistenceError::Database(_)));
        assert_eq!(err.code(), "HIVE_DATABASE_ERROR");
    }
}
