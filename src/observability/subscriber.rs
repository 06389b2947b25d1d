//! Log subscriber installation

use tracing_subscriber::EnvFilter;

use super::severity::{LogSink, Severity};

/// Installs the global subscriber.
///
/// `RUST_LOG` overrides the configured severity when set. Returns `false`
/// when a subscriber was already installed, which leaves the existing one
/// in place.
pub fn install(severity: Severity, sink: LogSink) -> bool {
    let filter = EnvFilter::builder()
        .with_default_directive(severity.level_filter().into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true);

    match sink {
        LogSink::Stdout => builder.with_writer(std::io::stdout).try_init().is_ok(),
        LogSink::Stderr => builder.with_writer(std::io::stderr).try_init().is_ok(),
        LogSink::None => builder.with_writer(std::io::sink).try_init().is_ok(),
    }
}
