//! hive-bridge - a native bridge between a game-server scripting host and a
//! relational store
//!
//! The host calls one exported function with a nested-array call string;
//! the router resolves it to an operation, which may read or write the
//! database through statements generated from the introspected schema.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod context;
pub mod entry;
pub mod observability;
pub mod operations;
pub mod persistence;
pub mod router;
pub mod store;
pub mod tasks;
pub mod wire;

pub use context::AppContext;
pub use entry::call_extension;
pub use router::{CallError, CallResult, Router};
pub use wire::WireValue;
