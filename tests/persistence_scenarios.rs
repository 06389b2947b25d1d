//! Persistence Scenario Tests
//!
//! End-to-end behavior of the persistence gateway against a real database
//! file:
//! - Generated keys come back as the first column of later reads
//! - Partial updates leave nil columns untouched
//! - Soft-deleted rows never appear in reads
//! - Count validation accounts only for the soft-deletion pair

use std::time::Duration;

use hive_bridge::persistence::{Database, PersistenceError, ResultShape};
use hive_bridge::store::Connector;
use hive_bridge::wire::WireValue;
use rusqlite::Connection;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

const DDL: &str = "
    CREATE TABLE t (Id VARCHAR(36) PRIMARY KEY, Name VARCHAR(64), Age DOUBLE);
    CREATE TABLE players (
        Id VARCHAR(36) PRIMARY KEY,
        Name VARCHAR(64),
        Money DOUBLE,
        Online TINYINT(1),
        Deleted TINYINT,
        DeletedAt DATETIME
    );
    CREATE TABLE events (Id INTEGER PRIMARY KEY AUTOINCREMENT, Kind TEXT);
";

fn open(revive_on_update: bool) -> (TempDir, Database) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("scenario.db");
    Connection::open(&path).unwrap().execute_batch(DDL).unwrap();

    let db = Database::new(Connector::new(path, Duration::from_secs(1)), revive_on_update);
    db.connect().unwrap();
    db.describe_schema().unwrap();
    (tmp, db)
}

fn s(text: &str) -> WireValue {
    WireValue::from(text)
}

fn n(value: f64) -> WireValue {
    WireValue::Number(value)
}

fn by_id(db: &Database, table: &str, id: &WireValue) -> WireValue {
    db.read(table, "*", "\"Id\" = ?1", vec![id.clone()], ResultShape::None)
        .unwrap()
}

fn insert_player(db: &Database, name: &str, money: f64) -> WireValue {
    db.insert("players", &[s(name), n(money), WireValue::Bool(true)])
        .unwrap()
}

// =============================================================================
// Reference Scenario
// =============================================================================

/// Insert with a generated key, read it back, then partially update it.
#[test]
fn test_insert_read_update_scenario() {
    let (_tmp, db) = open(false);

    let g = db.insert("t", &[s("Alice"), n(30.0)]).unwrap();
    let key = g.as_str().unwrap().to_string();
    assert!(!key.is_empty());

    let predicate = format!("\"Id\" = '{}'", key);
    let row = db.read("t", "*", &predicate, Vec::new(), ResultShape::None).unwrap();
    assert_eq!(row, WireValue::Array(vec![s(&key), s("Alice"), n(30.0)]));

    let affected = db.update("t", &[g.clone(), WireValue::Null, n(31.0)]).unwrap();
    assert_eq!(affected, 1);

    let row = db.read("t", "*", &predicate, Vec::new(), ResultShape::None).unwrap();
    assert_eq!(row, WireValue::Array(vec![s(&key), s("Alice"), n(31.0)]));
}

/// Every omitted key is fresh.
#[test]
fn test_generated_keys_are_distinct() {
    let (_tmp, db) = open(false);

    let a = db.insert("t", &[s("A"), n(1.0)]).unwrap();
    let b = db.insert("t", &[s("B"), n(2.0)]).unwrap();
    assert_ne!(a, b);

    let row = by_id(&db, "t", &b);
    assert_eq!(row.as_array().unwrap()[0], b);
}

/// A caller-supplied key is kept as given.
#[test]
fn test_supplied_key_is_returned() {
    let (_tmp, db) = open(false);
    let key = db.insert("t", &[s("fixed-key"), s("Carol"), n(40.0)]).unwrap();
    assert_eq!(key, s("fixed-key"));
    assert_eq!(by_id(&db, "t", &key).as_array().unwrap()[1], s("Carol"));
}

/// Store-assigned integer keys count up.
#[test]
fn test_auto_increment_keys() {
    let (_tmp, db) = open(false);
    assert_eq!(db.insert("events", &[s("login")]).unwrap(), n(1.0));
    assert_eq!(db.insert("events", &[s("logout")]).unwrap(), n(2.0));

    // Supplying the key explicitly is also allowed
    assert_eq!(db.insert("events", &[n(10.0), s("kick")]).unwrap(), n(10.0));
}

// =============================================================================
// Shape Tests
// =============================================================================

/// ForceMultiDimension keeps a single row nested.
#[test]
fn test_force_multi_dimension_single_row() {
    let (_tmp, db) = open(false);
    let g = db.insert("t", &[s("Alice"), n(30.0)]).unwrap();

    let rows = db
        .read("t", "*", "*", Vec::new(), ResultShape::ForceMultiDimension)
        .unwrap();
    assert_eq!(
        rows,
        WireValue::Array(vec![WireValue::Array(vec![g, s("Alice"), n(30.0)])])
    );
}

/// MultiToSingle flattens a one-column projection.
#[test]
fn test_multi_to_single() {
    let (_tmp, db) = open(false);
    db.insert("t", &[s("Alice"), n(30.0)]).unwrap();
    db.insert("t", &[s("Bob"), n(25.0)]).unwrap();

    let names = db
        .read("t", "\"Name\"", "\"Age\" > ?1", vec![n(20.0)], ResultShape::MultiToSingle)
        .unwrap();
    let mut names: Vec<String> = names
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Alice", "Bob"]);
}

/// Boolean-typed columns come back as booleans.
#[test]
fn test_boolean_columns_are_coerced() {
    let (_tmp, db) = open(false);
    let id = insert_player(&db, "Dave", 5.0);

    let row = by_id(&db, "players", &id);
    assert_eq!(
        row,
        WireValue::Array(vec![
            id,
            s("Dave"),
            n(5.0),
            WireValue::Bool(true),
            WireValue::Bool(false),
            WireValue::Null,
        ])
    );
}

// =============================================================================
// Soft Deletion Tests
// =============================================================================

/// A matching predicate does not bring back a soft-deleted row.
#[test]
fn test_soft_deleted_rows_are_excluded() {
    let (_tmp, db) = open(false);
    let gone = insert_player(&db, "Eve", 1.0);
    let kept = insert_player(&db, "Frank", 2.0);

    db.write_raw(
        "UPDATE players SET Deleted = 1, DeletedAt = '2024-01-01 00:00:00' WHERE Id = ?1",
        &[gone.clone()],
    )
    .unwrap();

    assert_eq!(by_id(&db, "players", &gone), WireValue::empty_array());

    let all = db
        .read("players", "*", "*", Vec::new(), ResultShape::ForceMultiDimension)
        .unwrap();
    let rows = all.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].as_array().unwrap()[0], kept);
}

/// A projection without the marker column still hides deleted rows and
/// returns only the requested columns.
#[test]
fn test_projected_read_excludes_soft_deleted_rows() {
    let (_tmp, db) = open(false);
    let gone = insert_player(&db, "Eve", 1.0);
    insert_player(&db, "Frank", 2.0);

    db.write_raw("UPDATE players SET Deleted = 1 WHERE Id = ?1", &[gone])
        .unwrap();

    let names = db
        .read("players", "\"Name\"", "*", Vec::new(), ResultShape::MultiToSingle)
        .unwrap();
    assert_eq!(names, WireValue::Array(vec![s("Frank")]));

    let single = db
        .read("players", "\"Name\", \"Online\"", "*", Vec::new(), ResultShape::None)
        .unwrap();
    assert_eq!(single, WireValue::Array(vec![s("Frank"), WireValue::Bool(true)]));
}

/// With revive enabled an update clears the deletion marker.
#[test]
fn test_update_revives_soft_deleted_row() {
    let (_tmp, db) = open(true);
    let id = insert_player(&db, "Grace", 3.0);
    db.write_raw("UPDATE players SET Deleted = 1 WHERE Id = ?1", &[id.clone()])
        .unwrap();
    assert_eq!(by_id(&db, "players", &id), WireValue::empty_array());

    db.update("players", &[id.clone(), WireValue::Null, n(4.0), WireValue::Null])
        .unwrap();

    let row = by_id(&db, "players", &id);
    assert_eq!(row.as_array().unwrap()[2], n(4.0));
}

/// Without revive the row stays hidden after an update.
#[test]
fn test_update_without_revive_keeps_row_hidden() {
    let (_tmp, db) = open(false);
    let id = insert_player(&db, "Heidi", 3.0);
    db.write_raw("UPDATE players SET Deleted = 1 WHERE Id = ?1", &[id.clone()])
        .unwrap();

    let affected = db
        .update("players", &[id.clone(), s("Heidi II"), WireValue::Null, WireValue::Null])
        .unwrap();
    assert_eq!(affected, 1);
    assert_eq!(by_id(&db, "players", &id), WireValue::empty_array());
}

// =============================================================================
// Validation Tests
// =============================================================================

/// Supplying the soft-deletion columns is a count error.
#[test]
fn test_count_errors() {
    let (_tmp, db) = open(false);

    let err = db
        .insert(
            "players",
            &[s("id"), s("Ivan"), n(1.0), WireValue::Bool(true), WireValue::Bool(false), WireValue::Null],
        )
        .unwrap_err();
    assert!(matches!(err, PersistenceError::ArgumentCount { expected: 4, supplied: 6, .. }));

    let err = db.insert("t", &[s("only-one")]).unwrap_err();
    assert!(matches!(err, PersistenceError::ArgumentCount { .. }));

    let err = db.update("t", &[s("k"), s("Name")]).unwrap_err();
    assert!(matches!(err, PersistenceError::ArgumentCount { .. }));
}

/// Key tags are checked against the key kind.
#[test]
fn test_key_type_errors() {
    let (_tmp, db) = open(false);

    let err = db.insert("t", &[n(5.0), s("Judy"), n(22.0)]).unwrap_err();
    assert!(matches!(err, PersistenceError::InvalidPrimaryKeyType { .. }));

    let err = db.update("events", &[s("1"), s("x")]).unwrap_err();
    assert!(matches!(err, PersistenceError::InvalidPrimaryKeyType { .. }));
}

/// Unknown tables fail before any statement runs.
#[test]
fn test_unknown_table() {
    let (_tmp, db) = open(false);
    let err = db.insert("nowhere", &[s("x")]).unwrap_err();
    assert!(matches!(err, PersistenceError::SchemaNotFound(_)));
    assert_eq!(err.code(), "HIVE_SCHEMA_NOT_FOUND");
}
