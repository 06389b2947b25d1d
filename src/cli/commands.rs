//! Runner commands
//!
//! Each command builds its own router, runs `System.Setup(false)` (so
//! `hive.json` is read from the working directory) and then issues calls
//! exactly as the host would.

use std::thread;
use std::time::Duration;

use crate::operations;
use crate::router::{Reply, Router};
use crate::wire::{self, WireValue};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

const SETUP_CALL: &str = r#"["System","Setup",false]"#;
const POLL_ATTEMPTS: usize = 100;
const POLL_INTERVAL: Duration = Duration::from_millis(20);

pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli)
}

pub fn run_command(cli: Cli) -> CliResult<()> {
    std::env::set_current_dir(&cli.workdir)?;
    let router = Router::new(operations::registry()?);
    setup(&router)?;

    match cli.command {
        Command::Call {
            group,
            operation,
            args,
        } => {
            let call = build_call(&group, &operation, args.as_deref())?;
            println!("{}", router.call(&call).encode());
            Ok(())
        }
        Command::Demo => demo(&router),
    }
}

/// Builds `["group","operation"]` or `["group","operation",<args>]`
pub fn build_call(group: &str, operation: &str, args: Option<&str>) -> CliResult<String> {
    let mut items = vec![WireValue::from(group), WireValue::from(operation)];
    if let Some(text) = args {
        let value = wire::decode(text)
            .map_err(|e| CliError::invalid_arguments(format!("`{}`: {}", text, e)))?;
        items.push(value);
    }
    Ok(WireValue::Array(items).encode())
}

fn setup(router: &Router) -> CliResult<()> {
    let outcome = router.call(SETUP_CALL);
    if outcome.fatal || !outcome.reply.success {
        return Err(CliError::boot_failed(
            "System.Setup failed; check hive.json and the database file",
        ));
    }
    Ok(())
}

fn step(router: &Router, operation: &str, args: Option<WireValue>) -> Reply {
    let mut items = vec![WireValue::from("Example"), WireValue::from(operation)];
    items.extend(args);
    let call = WireValue::Array(items).encode();
    step_raw(router, &call)
}

fn step_raw(router: &Router, call: &str) -> Reply {
    println!("> {}", call);
    let reply = router.call(call).reply;
    println!("< {}", reply.encode());
    reply
}

fn expect_value(reply: Reply, what: &str) -> CliResult<WireValue> {
    match reply {
        Reply {
            success: true,
            result: Some(value),
        } => Ok(value),
        _ => Err(CliError::call_failed(format!("{} failed", what))),
    }
}

fn demo(router: &Router) -> CliResult<()> {
    let row = WireValue::Array(vec![
        WireValue::from("demo"),
        WireValue::from(12.5),
        WireValue::Array(vec![
            WireValue::from(1i64),
            WireValue::from("two"),
            WireValue::Bool(true),
        ]),
    ]);
    let id = expect_value(step(router, "Create", Some(row)), "Example.Create")?;

    step(router, "GetSingle", Some(id.clone()));

    let changes = WireValue::Array(vec![
        id.clone(),
        WireValue::from("demo (updated)"),
        WireValue::Null,
        WireValue::Null,
        WireValue::Null,
    ]);
    step(router, "Update", Some(changes));
    // Update is fire-and-forget; give it a moment before reading back
    thread::sleep(Duration::from_millis(200));

    step(router, "GetAll", None);

    let task = expect_value(step(router, "Strings", None), "Example.Strings")?;
    let poll = WireValue::Array(vec![
        WireValue::from("System"),
        WireValue::from("TaskStatus"),
        task.clone(),
    ])
    .encode();
    for _ in 0..POLL_ATTEMPTS {
        let reply = step_raw(router, &poll);
        if reply.success || reply.result != Some(WireValue::from("NotReady")) {
            break;
        }
        thread::sleep(POLL_INTERVAL);
    }
    let remove = WireValue::Array(vec![
        WireValue::from("System"),
        WireValue::from("RemoveTask"),
        task,
    ])
    .encode();
    step_raw(router, &remove);

    expect_value(step(router, "Delete", Some(id)), "Example.Delete")?;
    Ok(())
}
