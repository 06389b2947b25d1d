//! Runner arguments
//!
//! Commands:
//! - hive-runner call <group> <operation> [<wire-args>]
//! - hive-runner demo

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Drives the extension's call boundary from the command line
#[derive(Parser, Debug)]
#[command(name = "hive-runner")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory holding hive.json (development mode)
    #[arg(long, default_value = ".")]
    pub workdir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run setup, then a single call, and print the reply
    Call {
        /// Operation group, e.g. Example
        group: String,
        /// Operation name, e.g. GetSingle
        operation: String,
        /// Argument in wire format, e.g. 5 or '["abc",1.5,[]]'
        args: Option<String>,
    },

    /// Walk through the Example operations
    Demo,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
