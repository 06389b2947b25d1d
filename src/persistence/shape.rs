//! Row filtering and result shaping

use crate::catalog::{TableSchema, DELETED_COLUMN};
use crate::store::{from_sql, RowSet, SqlValue};
use crate::wire::WireValue;

use super::statement::ResultShape;

/// Drops soft-deleted rows and arranges the rest according to `shape`.
///
/// A row is soft-deleted when the projection contains a `Deleted` column
/// holding a true or nonzero value. With `hidden_marker`, that column is the
/// last one and is removed from every row. Boolean-typed columns are read
/// back as booleans, using the declared types in `schema`.
pub fn shape_rows(
    schema: &TableSchema,
    rows: RowSet,
    shape: ResultShape,
    hidden_marker: bool,
) -> WireValue {
    let visible = if hidden_marker {
        rows.columns.len().saturating_sub(1)
    } else {
        rows.columns.len()
    };

    let deleted_index = if hidden_marker {
        Some(visible)
    } else {
        rows.columns
            .iter()
            .position(|name| name.eq_ignore_ascii_case(DELETED_COLUMN))
    };

    let boolean: Vec<bool> = rows.columns[..visible]
        .iter()
        .map(|name| schema.column(name).is_some_and(|c| c.is_boolean()))
        .collect();

    let mut out = Vec::new();
    let mut kept = 0usize;

    for row in rows.rows {
        if let Some(index) = deleted_index {
            if row.get(index).is_some_and(is_set) {
                continue;
            }
        }

        let values: Vec<WireValue> = row
            .iter()
            .take(visible)
            .zip(&boolean)
            .map(|(value, is_boolean)| read_value(value, *is_boolean))
            .collect();

        match shape {
            ResultShape::MultiToSingle => out.extend(values),
            ResultShape::None | ResultShape::ForceMultiDimension => {
                out.push(WireValue::Array(values))
            }
        }
        kept += 1;
    }

    if shape == ResultShape::None && kept == 1 {
        if let Some(single) = out.pop() {
            return single;
        }
    }

    WireValue::Array(out)
}

fn is_set(value: &SqlValue) -> bool {
    match value {
        SqlValue::Integer(i) => *i != 0,
        SqlValue::Real(f) => *f != 0.0,
        SqlValue::Text(s) => s == "1" || s.eq_ignore_ascii_case("true"),
        SqlValue::Null | SqlValue::Blob(_) => false,
    }
}

fn read_value(value: &SqlValue, is_boolean: bool) -> WireValue {
    match value {
        SqlValue::Integer(i) if is_boolean => WireValue::Bool(*i != 0),
        other => from_sql(other.into()),
    }
}
