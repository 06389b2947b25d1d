//! Conversion between wire values and driver values

use rusqlite::types::{Value, ValueRef};

use crate::wire::WireValue;

/// Converts a wire value into a bindable parameter.
///
/// Booleans bind as `0`/`1`, integral numbers as integers and arrays as their
/// wire-encoded text.
pub fn to_sql(value: &WireValue) -> Value {
    match value {
        WireValue::Null => Value::Null,
        WireValue::Bool(b) => Value::Integer(i64::from(*b)),
        WireValue::Number(n) => match value.as_integer() {
            Some(i) => Value::Integer(i),
            None => Value::Real(*n),
        },
        WireValue::String(s) => Value::Text(s.clone()),
        WireValue::Array(_) => Value::Text(value.encode()),
    }
}

/// Converts a column value read from the store into a wire value
pub fn from_sql(value: ValueRef<'_>) -> WireValue {
    match value {
        ValueRef::Null => WireValue::Null,
        ValueRef::Integer(i) => WireValue::Number(i as f64),
        ValueRef::Real(f) => WireValue::Number(f),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            WireValue::String(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}
