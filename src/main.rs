//! hive-runner entry point
//!
//! Parses arguments, delegates to `cli::run`, prints errors to stderr and
//! exits non-zero on failure.

use hive_bridge::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
