//! Schema introspection

use rusqlite::Connection;

use crate::catalog::{ColumnDescriptor, TableSchema, AUTO_INCREMENT};

use super::errors::StoreResult;
use super::quote_identifier;

/// Enumerates user tables, then each table's columns in declaration order.
///
/// A lone `INTEGER PRIMARY KEY` column aliases the rowid, so the store
/// assigns it on insert; it is marked [`AUTO_INCREMENT`].
pub fn describe_tables(conn: &Connection) -> StoreResult<Vec<TableSchema>> {
    // Collect names first: one connection cannot hold two open readers here.
    let table_names: Vec<String> = {
        let mut stmt = conn.prepare(
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
             ORDER BY name",
        )?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        names
    };

    let mut tables = Vec::with_capacity(table_names.len());
    for table in table_names {
        let columns = describe_columns(conn, &table)?;
        tables.push(TableSchema::new(table, columns));
    }
    Ok(tables)
}

fn describe_columns(conn: &Connection, table: &str) -> StoreResult<Vec<ColumnDescriptor>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", quote_identifier(table)))?;

    // (name, declared type, position within the primary key; 0 when not part of it)
    let raw = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                row.get::<_, i64>(5)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let key_columns = raw.iter().filter(|(_, _, pk)| *pk > 0).count();

    let columns = raw
        .into_iter()
        .map(|(name, declared_type, pk)| {
            let is_primary_key = pk > 0;
            let extra = if is_primary_key
                && key_columns == 1
                && declared_type.eq_ignore_ascii_case("INTEGER")
            {
                AUTO_INCREMENT
            } else {
                ""
            };
            ColumnDescriptor::new(name, declared_type, is_primary_key, extra)
        })
        .collect();

    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PrimaryKeyKind;

    fn memory_db(ddl: &str) -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(ddl).unwrap();
        conn
    }

    #[test]
    fn test_describe_preserves_column_order() {
        let conn = memory_db(
            "CREATE TABLE Players (Id VARCHAR(36) PRIMARY KEY, Name VARCHAR(64), Money DOUBLE, \
             Deleted TINYINT, DeletedAt DATETIME);",
        );
        let tables = describe_tables(&conn).unwrap();
        assert_eq!(tables.len(), 1);

        let players = &tables[0];
        assert_eq!(players.name(), "Players");
        let names: Vec<&str> = players.columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Id", "Name", "Money", "Deleted", "DeletedAt"]);
        assert_eq!(players.columns()[0].declared_type, "VARCHAR(36)");
        assert!(players.columns()[0].is_primary_key);
        assert!(!players.columns()[1].is_primary_key);
        assert!(players.has_soft_deletion());
        assert_eq!(players.primary_key_kind(), PrimaryKeyKind::GeneratedString);
    }

    #[test]
    fn test_integer_primary_key_is_auto_increment() {
        let conn = memory_db(
            "CREATE TABLE a (Id INTEGER PRIMARY KEY AUTOINCREMENT, V TEXT);
             CREATE TABLE b (Id INTEGER PRIMARY KEY, V TEXT);
             CREATE TABLE c (Id BIGINT PRIMARY KEY, V TEXT);
             CREATE TABLE d (A INTEGER, B INTEGER, PRIMARY KEY (A, B));",
        );
        let tables = describe_tables(&conn).unwrap();
        let kinds: Vec<(String, PrimaryKeyKind)> = tables
            .iter()
            .map(|t| (t.name().to_string(), t.primary_key_kind()))
            .collect();

        assert_eq!(
            kinds,
            vec![
                ("a".to_string(), PrimaryKeyKind::AutoIncrementInteger),
                ("b".to_string(), PrimaryKeyKind::AutoIncrementInteger),
                ("c".to_string(), PrimaryKeyKind::Other),
                ("d".to_string(), PrimaryKeyKind::Other),
            ]
        );
    }

    #[test]
    fn test_internal_tables_are_skipped() {
        // AUTOINCREMENT creates sqlite_sequence
        let conn = memory_db("CREATE TABLE a (Id INTEGER PRIMARY KEY AUTOINCREMENT);");
        let tables = describe_tables(&conn).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].name(), "a");
    }

    #[test]
    fn test_untyped_column() {
        let conn = memory_db("CREATE TABLE loose (Id TEXT PRIMARY KEY, Anything);");
        let tables = describe_tables(&conn).unwrap();
        assert_eq!(tables[0].columns()[1].declared_type, "");
    }
}
