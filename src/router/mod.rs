//! Call Router
//!
//! Resolves `["group","operation", args...]` calls against an explicit
//! operation registry, marshals arguments to the declared parameter shape
//! and runs the body under its declared discipline.
//!
//! # Replies
//!
//! | outcome | reply |
//! |---|---|
//! | value operation | `[true, value]` |
//! | void operation | `[true, true]` |
//! | tracked value operation | `[true, task_id]` |
//! | fire-and-forget value operation | `[true]` |
//! | task polled before it has a value | `[false, "NotReady" \| "Faulted" \| "NotFound"]` |
//! | any other failure | `[false]` |
//!
//! `System.TaskStatus` is the only operation whose failure carries a result
//! element: the task state, so pollers can tell waiting from lost.

mod dispatch;
mod envelope;
mod errors;
mod marshal;
mod operation;
mod registry;

pub use dispatch::{CallOutcome, Router};
pub use envelope::{CallEnvelope, Reply};
pub use errors::{CallError, CallResult};
pub use marshal::{marshal, Args};
pub use operation::{
    BootstrapHandler, Discipline, Handler, OperationDescriptor, OperationHandler, ParamKind,
    ParamShape, ReturnKind,
};
pub use registry::OperationRegistry;
