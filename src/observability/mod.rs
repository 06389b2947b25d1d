//! Observability
//!
//! Structured logging through `tracing`. The subscriber is installed once
//! at bootstrap from the configured severity and sink; every module logs
//! through the `tracing` macros with key/value fields.

mod severity;
mod subscriber;

pub use severity::{LogSink, Severity};
pub use subscriber::install;
