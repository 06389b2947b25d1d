//! Statement and query descriptions

use crate::store::SqlValue;
use crate::wire::WireValue;

/// How read results are arranged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultShape {
    /// A single surviving row is returned flat; otherwise an array of rows
    #[default]
    None,
    /// Always an array of rows, even for one row
    ForceMultiDimension,
    /// All rows concatenated into one flat array
    MultiToSingle,
}

/// A parameterized statement ready for the store
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl Statement {
    pub fn new(sql: impl Into<String>, params: Vec<SqlValue>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }
}

/// Where an inserted row's key comes from
#[derive(Debug, Clone, PartialEq)]
pub enum InsertKey {
    /// Supplied by the caller or generated before the insert
    Known(WireValue),
    /// Assigned by the store; read back after the insert
    StoreAssigned,
}

/// An insert statement plus the key it will produce
#[derive(Debug, Clone, PartialEq)]
pub struct InsertPlan {
    pub statement: Statement,
    pub key: InsertKey,
}

/// A read request.
///
/// `columns` and `predicate` are SQL fragments written by operation code;
/// host-supplied values travel only through `params`, bound as `?1`, `?2`...
#[derive(Debug, Clone, PartialEq)]
pub struct ReadQuery {
    pub table: String,
    pub columns: String,
    pub predicate: String,
    pub params: Vec<WireValue>,
    pub shape: ResultShape,
}

impl ReadQuery {
    /// All columns, all rows, default shape
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: "*".to_string(),
            predicate: "*".to_string(),
            params: Vec::new(),
            shape: ResultShape::None,
        }
    }

    pub fn columns(mut self, columns: impl Into<String>) -> Self {
        self.columns = columns.into();
        self
    }

    pub fn filter(mut self, predicate: impl Into<String>, params: Vec<WireValue>) -> Self {
        self.predicate = predicate.into();
        self.params = params;
        self
    }

    pub fn shape(mut self, shape: ResultShape) -> Self {
        self.shape = shape;
        self
    }

    /// Whether the predicate restricts rows at all
    pub fn has_predicate(&self) -> bool {
        let predicate = self.predicate.trim();
        !predicate.is_empty() && predicate != "*"
    }
}
