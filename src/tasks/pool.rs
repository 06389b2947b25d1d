//! Worker pool for asynchronous operations

use tokio::runtime::{Builder, Runtime};
use tokio::sync::oneshot;

use super::errors::TaskResult;

/// Runs operation bodies off the host's calling thread.
///
/// Bodies are blocking (every database statement is), so they go through
/// `spawn_blocking` on a dedicated multi-thread runtime.
#[derive(Debug)]
pub struct WorkerPool {
    // Taken on drop
    runtime: Option<Runtime>,
}

impl WorkerPool {
    pub fn new(threads: usize) -> TaskResult<Self> {
        let threads = threads.max(1);
        let runtime = Builder::new_multi_thread()
            .worker_threads(threads)
            .max_blocking_threads(threads)
            .thread_name("hive-worker")
            .enable_all()
            .build()?;
        Ok(Self {
            runtime: Some(runtime),
        })
    }

    fn runtime(&self) -> &Runtime {
        match &self.runtime {
            Some(runtime) => runtime,
            None => unreachable!("runtime is only taken on drop"),
        }
    }

    /// Runs `job` and returns a receiver for its output.
    ///
    /// If the job panics the sender is dropped and the receiver reports
    /// the channel closed.
    pub fn submit<T, F>(&self, job: F) -> oneshot::Receiver<T>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        self.runtime().spawn_blocking(move || {
            // The receiver may already be gone if the task was removed.
            let _ = tx.send(job());
        });
        rx
    }

    /// Runs `job` with nothing observable afterwards
    pub fn detach<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.runtime().spawn_blocking(job);
    }
}

impl Drop for WorkerPool {
    /// Stops without waiting for running jobs. The last handle to the pool
    /// may be released by one of its own workers, which cannot wait on
    /// itself.
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}
