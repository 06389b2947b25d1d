//! Persistence Gateway
//!
//! Generates parameterized statements from the schema catalog and runs them
//! through the store driver.
//!
//! # Row conventions
//!
//! - The first column of every table is its primary key
//! - Insert and update take one value per column, in declaration order,
//!   excluding the soft-deletion pair
//! - Insert may omit a generatable key; update never may
//! - Rows whose `Deleted` column is set are never returned by reads

mod database;
mod errors;
mod generator;
mod shape;
mod statement;

pub use database::Database;
pub use errors::{PersistenceError, PersistenceResult};
pub use generator::{ReadPlan, StatementGenerator};
pub use shape::shape_rows;
pub use statement::{InsertKey, InsertPlan, ReadQuery, ResultShape, Statement};
