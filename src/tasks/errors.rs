//! Task errors

use thiserror::Error;

/// Result type for task infrastructure
pub type TaskResult<T> = Result<T, TaskError>;

/// Failures of the worker pool itself; task outcomes are reported by polling
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("failed to start worker pool: {0}")]
    PoolStart(#[from] std::io::Error),
}

impl TaskError {
    pub fn code(&self) -> &'static str {
        match self {
            TaskError::PoolStart(_) => "HIVE_TASK_ERROR",
        }
    }
}
