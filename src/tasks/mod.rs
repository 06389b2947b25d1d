//! Task Registry
//!
//! Tracked operations run on the worker pool and report through a
//! per-task completion channel; the host polls by id. Detached operations
//! use the same pool and leave nothing behind.

mod errors;
mod pool;
mod registry;

pub use errors::{TaskError, TaskResult};
pub use pool::WorkerPool;
pub use registry::{PollOutcome, TaskId, TaskOutput, TaskRegistry};
