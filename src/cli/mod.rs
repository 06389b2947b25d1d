//! Command-line runner
//!
//! Exercises the same call boundary the host uses:
//! - call: setup, then one call
//! - demo: setup, then a scripted pass over the Example operations

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{build_call, run, run_command};
pub use errors::{CliError, CliErrorCode, CliResult};
