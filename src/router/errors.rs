//! Call errors
//!
//! Every subsystem error converges here. The router turns any of them into
//! a `[false]` reply; only `Bootstrap` is fatal to the process.

use thiserror::Error;

use crate::config::ConfigError;
use crate::persistence::PersistenceError;
use crate::tasks::TaskError;
use crate::wire::WireError;

/// Result type for call handling
pub type CallResult<T> = Result<T, CallError>;

#[derive(Debug, Error)]
pub enum CallError {
    #[error("malformed call text: {0}")]
    Protocol(#[from] WireError),

    #[error("malformed call: {0}")]
    MalformedCall(String),

    #[error("unknown operation `{0}`")]
    Routing(String),

    #[error("operation `{0}` is not available before setup completes")]
    NotReady(String),

    #[error("operation `{0}` is registered twice")]
    DuplicateOperation(String),

    #[error("`{operation}` takes {expected} argument(s), got {supplied}")]
    ArgumentCount {
        operation: String,
        expected: usize,
        supplied: usize,
    },

    #[error("`{operation}` argument {index} must be {expected}, got {found}")]
    UnsupportedParameterType {
        operation: String,
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Task(#[from] TaskError),

    /// A polled task has no value to report yet (or never will)
    #[error("task {id} is {state}")]
    TaskUnavailable { id: i64, state: &'static str },

    #[error("operation failed: {0}")]
    Operation(String),

    #[error("bootstrap failed: {0}")]
    Bootstrap(#[source] Box<CallError>),
}

impl CallError {
    pub fn code(&self) -> &'static str {
        match self {
            CallError::Protocol(e) => e.code(),
            CallError::MalformedCall(_) => "HIVE_PROTOCOL_ERROR",
            CallError::Routing(_) | CallError::NotReady(_) => "HIVE_ROUTING_ERROR",
            CallError::DuplicateOperation(_) => "HIVE_DUPLICATE_OPERATION",
            CallError::ArgumentCount { .. } => "HIVE_ARGUMENT_COUNT",
            CallError::UnsupportedParameterType { .. } => "HIVE_UNSUPPORTED_PARAMETER_TYPE",
            CallError::Persistence(e) => e.code(),
            CallError::Config(e) => e.code(),
            CallError::Task(e) => e.code(),
            CallError::TaskUnavailable { .. } => "HIVE_TASK_UNAVAILABLE",
            CallError::Operation(_) => "HIVE_OPERATION_FAILED",
            CallError::Bootstrap(_) => "HIVE_BOOTSTRAP_FAILED",
        }
    }

    /// Whether the process must stop
    pub fn is_fatal(&self) -> bool {
        match self {
            CallError::Bootstrap(_) => true,
            CallError::Persistence(e) => e.is_fatal(),
            _ => false,
        }
    }

    /// Wraps a failure raised during bootstrap
    pub fn bootstrap(err: CallError) -> Self {
        match err {
            CallError::Bootstrap(_) => err,
            other => CallError::Bootstrap(Box::new(other)),
        }
    }
}
