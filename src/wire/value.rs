//! Tagged value tree carried across the call boundary

use std::fmt;

use super::codec;

/// A decoded wire value
///
/// Values are immutable once built; arrays may nest arbitrarily.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    /// The `nil` token
    Null,
    /// Bare `true` / `false`
    Bool(bool),
    /// Any number; the host has no integer type
    Number(f64),
    /// Quoted string
    String(String),
    /// Ordered sequence of values
    Array(Vec<WireValue>),
}

impl WireValue {
    /// Empty array
    pub fn empty_array() -> Self {
        WireValue::Array(Vec::new())
    }

    /// Returns the tag name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            WireValue::Null => "nil",
            WireValue::Bool(_) => "bool",
            WireValue::Number(_) => "number",
            WireValue::String(_) => "string",
            WireValue::Array(_) => "array",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, WireValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            WireValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            WireValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the number as an integer when it has no fractional part
    /// and fits in an `i64`.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            WireValue::Number(n) => integral(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            WireValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[WireValue]> {
        match self {
            WireValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Consumes the value, returning the array elements if it is an array
    pub fn into_array(self) -> Option<Vec<WireValue>> {
        match self {
            WireValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Encodes the value in wire format
    pub fn encode(&self) -> String {
        codec::encode(self)
    }
}

/// Converts a float to `i64` when it is integral and in range.
fn integral(n: f64) -> Option<i64> {
    // 2^63 is exactly representable; anything at or above it overflows.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if n.is_finite() && n.fract() == 0.0 && n >= -LIMIT && n < LIMIT {
        Some(n as i64)
    } else {
        None
    }
}

impl fmt::Display for WireValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::encode(self))
    }
}

impl From<bool> for WireValue {
    fn from(value: bool) -> Self {
        WireValue::Bool(value)
    }
}

impl From<f64> for WireValue {
    fn from(value: f64) -> Self {
        WireValue::Number(value)
    }
}

impl From<i64> for WireValue {
    fn from(value: i64) -> Self {
        WireValue::Number(value as f64)
    }
}

impl From<i32> for WireValue {
    fn from(value: i32) -> Self {
        WireValue::Number(f64::from(value))
    }
}

impl From<usize> for WireValue {
    fn from(value: usize) -> Self {
        WireValue::Number(value as f64)
    }
}

impl From<u64> for WireValue {
    fn from(value: u64) -> Self {
        WireValue::Number(value as f64)
    }
}

impl From<&str> for WireValue {
    fn from(value: &str) -> Self {
        WireValue::String(value.to_string())
    }
}

impl From<String> for WireValue {
    fn from(value: String) -> Self {
        WireValue::String(value)
    }
}

impl From<Vec<WireValue>> for WireValue {
    fn from(value: Vec<WireValue>) -> Self {
        WireValue::Array(value)
    }
}

impl<T: Into<WireValue>> From<Option<T>> for WireValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(WireValue::Null, Into::into)
    }
}
