//! Tracked task registry

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::{debug, warn};

use crate::wire::WireValue;

use super::pool::WorkerPool;

/// Identifier handed to the host for a tracked task
pub type TaskId = u64;

/// Output of a tracked body: a value, or a failure description
pub type TaskOutput = Result<WireValue, String>;

/// Result of polling a task
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    NotFound,
    NotReady,
    Faulted,
    Completed(WireValue),
}

impl PollOutcome {
    /// Wire label for every outcome other than `Completed`
    pub fn label(&self) -> &'static str {
        match self {
            PollOutcome::NotFound => "NotFound",
            PollOutcome::NotReady => "NotReady",
            PollOutcome::Faulted => "Faulted",
            PollOutcome::Completed(_) => "Completed",
        }
    }
}

#[derive(Debug)]
enum TaskSlot {
    Running(oneshot::Receiver<TaskOutput>),
    Completed(WireValue),
    Faulted,
}

/// In-flight and finished tracked tasks, keyed by id.
///
/// The lock is held only for map access; bodies run on the worker pool.
/// Entries live until removed.
#[derive(Debug)]
pub struct TaskRegistry {
    pool: WorkerPool,
    next_id: AtomicU64,
    slots: Mutex<HashMap<TaskId, TaskSlot>>,
}

impl TaskRegistry {
    pub fn new(pool: WorkerPool) -> Self {
        Self {
            pool,
            next_id: AtomicU64::new(1),
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Starts a tracked body and returns its id
    pub fn submit<F>(&self, work: F) -> TaskId
    where
        F: FnOnce() -> TaskOutput + Send + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let receiver = self.pool.submit(work);
        self.slots.lock().insert(id, TaskSlot::Running(receiver));
        debug!(task_id = id, "task submitted");
        id
    }

    /// Starts an untracked body
    pub fn detach<F>(&self, work: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.pool.detach(work);
    }

    /// Reports a task's state without blocking.
    ///
    /// A finished result is cached in the slot, so polling again returns the
    /// same outcome.
    pub fn poll(&self, id: TaskId) -> PollOutcome {
        let mut slots = self.slots.lock();
        let Some(slot) = slots.get_mut(&id) else {
            return PollOutcome::NotFound;
        };

        if let TaskSlot::Running(receiver) = slot {
            match receiver.try_recv() {
                Err(TryRecvError::Empty) => return PollOutcome::NotReady,
                Ok(Ok(value)) => *slot = TaskSlot::Completed(value),
                Ok(Err(reason)) => {
                    warn!(task_id = id, reason = %reason, "task faulted");
                    *slot = TaskSlot::Faulted;
                }
                Err(TryRecvError::Closed) => {
                    warn!(task_id = id, "task panicked");
                    *slot = TaskSlot::Faulted;
                }
            }
        }

        match slot {
            TaskSlot::Completed(value) => PollOutcome::Completed(value.clone()),
            TaskSlot::Faulted => PollOutcome::Faulted,
            TaskSlot::Running(_) => PollOutcome::NotReady,
        }
    }

    /// Forgets a task. Returns whether it existed.
    pub fn remove(&self, id: TaskId) -> bool {
        self.slots.lock().remove(&id).is_some()
    }

    /// Number of tasks not yet removed
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::{Duration, Instant};

    fn registry() -> TaskRegistry {
        TaskRegistry::new(WorkerPool::new(2).unwrap())
    }

    fn wait(registry: &TaskRegistry, id: TaskId) -> PollOutcome {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let outcome = registry.poll(id);
            if outcome != PollOutcome::NotReady || Instant::now() > deadline {
                return outcome;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_not_ready_until_body_finishes() {
        let registry = registry();
        let (release_tx, release_rx) = mpsc::channel::<()>();

        let id = registry.submit(move || {
            release_rx.recv().map_err(|e| e.to_string())?;
            Ok(WireValue::from("done"))
        });

        assert_eq!(registry.poll(id), PollOutcome::NotReady);
        assert_eq!(registry.poll(id), PollOutcome::NotReady);

        release_tx.send(()).unwrap();
        assert_eq!(wait(&registry, id), PollOutcome::Completed(WireValue::from("done")));
        // Idempotent after completion
        assert_eq!(registry.poll(id), PollOutcome::Completed(WireValue::from("done")));
    }

    #[test]
    fn test_failed_and_panicking_bodies_fault() {
        let registry = registry();
        let failed = registry.submit(|| Err("no such table".to_string()));
        let panicked = registry.submit(|| panic!("boom"));

        assert_eq!(wait(&registry, failed), PollOutcome::Faulted);
        assert_eq!(wait(&registry, panicked), PollOutcome::Faulted);
        assert_eq!(registry.poll(failed), PollOutcome::Faulted);
    }

    #[test]
    fn test_unknown_and_removed_ids() {
        let registry = registry();
        assert_eq!(registry.poll(999), PollOutcome::NotFound);

        let id = registry.submit(|| Ok(WireValue::Null));
        assert_eq!(registry.len(), 1);
        assert!(registry.remove(id));
        assert!(!registry.remove(id));
        assert_eq!(registry.poll(id), PollOutcome::NotFound);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_ids_are_distinct() {
        let registry = registry();
        let a = registry.submit(|| Ok(WireValue::from(1i64)));
        let b = registry.submit(|| Ok(WireValue::from(2i64)));
        assert_ne!(a, b);
        assert_eq!(wait(&registry, a), PollOutcome::Completed(WireValue::from(1i64)));
        assert_eq!(wait(&registry, b), PollOutcome::Completed(WireValue::from(2i64)));
    }
}
