//! Statement generation from the schema catalog
//!
//! Values are matched to columns positionally, in declaration order. The
//! trailing `Deleted`/`DeletedAt` pair of soft-deletion tables is never
//! supplied by callers; the generator fills it in itself.

use uuid::Uuid;

use crate::catalog::{
    ColumnDescriptor, PrimaryKeyKind, SchemaCatalog, TableSchema, DELETED_AT_COLUMN,
    DELETED_COLUMN,
};
use crate::store::{quote_identifier, to_sql, SqlValue};
use crate::wire::WireValue;

use super::errors::{PersistenceError, PersistenceResult};
use super::statement::{InsertKey, InsertPlan, ReadQuery, ResultShape, Statement};

/// A read statement plus what is needed to shape its rows
#[derive(Debug)]
pub struct ReadPlan<'a> {
    pub statement: Statement,
    pub schema: &'a TableSchema,
    pub shape: ResultShape,
    /// The last projected column is a `Deleted` marker the caller did not ask for
    pub hidden_marker: bool,
}

/// Builds parameterized statements against an installed catalog
#[derive(Debug, Clone, Copy)]
pub struct StatementGenerator<'a> {
    catalog: &'a SchemaCatalog,
    revive_on_update: bool,
}

impl<'a> StatementGenerator<'a> {
    /// `revive_on_update` makes every update on a soft-deletion table also
    /// clear its deletion marker.
    pub fn new(catalog: &'a SchemaCatalog, revive_on_update: bool) -> Self {
        Self {
            catalog,
            revive_on_update,
        }
    }

    /// `SELECT {columns} FROM "table" [WHERE {predicate}]`
    pub fn read(&self, query: &ReadQuery) -> PersistenceResult<ReadPlan<'a>> {
        let schema = self.catalog.table(&query.table)?;

        let columns = match query.columns.trim() {
            "" => "*",
            columns => columns,
        };
        // A narrowed projection still needs the marker to drop deleted rows.
        let hidden_marker = schema.has_soft_deletion() && columns != "*";
        let mut sql = if hidden_marker {
            format!(
                "SELECT {}, {} FROM {}",
                columns,
                quote_identifier(DELETED_COLUMN),
                quote_identifier(schema.name())
            )
        } else {
            format!("SELECT {} FROM {}", columns, quote_identifier(schema.name()))
        };
        if query.has_predicate() {
            sql.push_str(" WHERE ");
            sql.push_str(query.predicate.trim());
        }

        Ok(ReadPlan {
            statement: Statement::new(sql, query.params.iter().map(to_sql).collect()),
            schema,
            shape: query.shape,
            hidden_marker,
        })
    }

    /// Builds an insert for a full row.
    ///
    /// `values` covers every insertable column, or all but the key when the
    /// key can be generated: a UUID for text keys, the store's own counter
    /// for auto-increment keys.
    pub fn insert(&self, table: &str, values: &[WireValue]) -> PersistenceResult<InsertPlan> {
        let schema = self.catalog.table(table)?;
        require_leading_key(schema)?;
        let insertable = schema.insertable_columns();

        let mut row: Vec<WireValue> = Vec::with_capacity(insertable.len());
        let mut store_assigned = false;

        if values.len() + 1 == insertable.len() {
            match schema.primary_key_kind() {
                PrimaryKeyKind::GeneratedString => {
                    row.push(WireValue::String(Uuid::new_v4().to_string()));
                }
                PrimaryKeyKind::AutoIncrementInteger => {
                    row.push(WireValue::Null);
                    store_assigned = true;
                }
                PrimaryKeyKind::Other => {}
            }
        }
        row.extend_from_slice(values);

        check_count(schema, insertable, row.len(), values.len())?;
        let Some(first) = row.first() else {
            return Err(no_values(schema, insertable));
        };
        if !store_assigned {
            check_key(schema, first)?;
        }

        let skip = usize::from(store_assigned);
        let mut columns: Vec<String> = Vec::with_capacity(row.len() + 2);
        let mut params: Vec<SqlValue> = Vec::with_capacity(row.len() + 2);
        for (column, value) in insertable.iter().zip(&row).skip(skip) {
            columns.push(quote_identifier(&column.name));
            params.push(to_sql(value));
        }
        if schema.has_soft_deletion() {
            columns.push(quote_identifier(DELETED_COLUMN));
            params.push(SqlValue::Integer(0));
            columns.push(quote_identifier(DELETED_AT_COLUMN));
            params.push(SqlValue::Null);
        }

        let sql = if columns.is_empty() {
            format!("INSERT INTO {} DEFAULT VALUES", quote_identifier(schema.name()))
        } else {
            format!(
                "INSERT INTO {} ({}) VALUES ({})",
                quote_identifier(schema.name()),
                columns.join(", "),
                placeholders(params.len())
            )
        };

        let key = match row.into_iter().next() {
            Some(key) if !store_assigned => InsertKey::Known(key),
            _ => InsertKey::StoreAssigned,
        };

        Ok(InsertPlan {
            statement: Statement::new(sql, params),
            key,
        })
    }

    /// Builds an update keyed on the first value.
    ///
    /// `nil` values leave their column unchanged. Returns `None` when nothing
    /// would be written.
    pub fn update(&self, table: &str, values: &[WireValue]) -> PersistenceResult<Option<Statement>> {
        let schema = self.catalog.table(table)?;
        let key_column = require_leading_key(schema)?;
        let insertable = schema.insertable_columns();

        check_count(schema, insertable, values.len(), values.len())?;
        let Some(key) = values.first() else {
            return Err(no_values(schema, insertable));
        };
        check_key(schema, key)?;

        let mut assignments: Vec<String> = Vec::new();
        let mut params: Vec<SqlValue> = Vec::new();
        for (column, value) in insertable.iter().zip(values).skip(1) {
            if value.is_null() {
                continue;
            }
            params.push(to_sql(value));
            assignments.push(format!("{} = ?{}", quote_identifier(&column.name), params.len()));
        }

        if schema.has_soft_deletion() && self.revive_on_update {
            assignments.push(format!("{} = 0", quote_identifier(DELETED_COLUMN)));
            assignments.push(format!("{} = NULL", quote_identifier(DELETED_AT_COLUMN)));
        }

        if assignments.is_empty() {
            return Ok(None);
        }

        params.push(to_sql(key));
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?{}",
            quote_identifier(schema.name()),
            assignments.join(", "),
            quote_identifier(&key_column.name),
            params.len()
        );

        Ok(Some(Statement::new(sql, params)))
    }
}

fn require_leading_key(schema: &TableSchema) -> PersistenceResult<&ColumnDescriptor> {
    schema
        .primary_key()
        .ok_or_else(|| PersistenceError::PrimaryKeyNotFirst(schema.name().to_string()))
}

fn check_count(
    schema: &TableSchema,
    insertable: &[ColumnDescriptor],
    got: usize,
    supplied: usize,
) -> PersistenceResult<()> {
    if got != insertable.len() {
        return Err(PersistenceError::ArgumentCount {
            table: schema.name().to_string(),
            expected: insertable.len(),
            supplied,
        });
    }
    Ok(())
}

/// A table whose key is also its soft-deletion marker leaves nothing to supply
fn no_values(schema: &TableSchema, insertable: &[ColumnDescriptor]) -> PersistenceError {
    PersistenceError::ArgumentCount {
        table: schema.name().to_string(),
        expected: insertable.len().max(1),
        supplied: 0,
    }
}

fn check_key(schema: &TableSchema, key: &WireValue) -> PersistenceResult<()> {
    let matches = match schema.primary_key_kind() {
        PrimaryKeyKind::GeneratedString => matches!(key, WireValue::String(_)),
        PrimaryKeyKind::AutoIncrementInteger => matches!(key, WireValue::Number(_)),
        PrimaryKeyKind::Other => !key.is_null(),
    };
    if matches {
        return Ok(());
    }
    Err(PersistenceError::InvalidPrimaryKeyType {
        table: schema.name().to_string(),
        expected: schema.primary_key_kind().expected_tag().unwrap_or("non-nil value"),
        found: key.type_name(),
    })
}

fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ")
}
