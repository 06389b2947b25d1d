//! Setup and task polling

use crate::config::Config;
use crate::context::AppContext;
use crate::observability;
use crate::router::{
    Args, CallError, CallResult, Discipline, OperationDescriptor, ParamKind, ParamShape,
};
use crate::tasks::PollOutcome;
use crate::wire::WireValue;

pub fn operations() -> Vec<OperationDescriptor> {
    vec![
        OperationDescriptor::bootstrap("System", "Setup", ParamShape::one(ParamKind::Bool), setup),
        OperationDescriptor::value(
            "System",
            "TaskStatus",
            ParamShape::one(ParamKind::Integer),
            Discipline::Synchronous,
            task_status,
        ),
        OperationDescriptor::void(
            "System",
            "RemoveTask",
            ParamShape::one(ParamKind::Integer),
            Discipline::Synchronous,
            remove_task,
        ),
    ]
}

/// `System.Setup(is_production)`
fn setup(args: Args) -> CallResult<AppContext> {
    let is_production = args.bool(0)?;
    let config = Config::discover(is_production)?;
    observability::install(config.log_level, config.log_sink);
    tracing::info!(is_production, "setup");
    AppContext::open(config)
}

/// `System.TaskStatus(id)`: the task's value, or why there is none
fn task_status(context: &AppContext, args: Args) -> CallResult<WireValue> {
    let id = args.integer(0)?;
    let outcome = match u64::try_from(id) {
        Ok(task_id) => context.tasks.poll(task_id),
        Err(_) => PollOutcome::NotFound,
    };
    match outcome {
        PollOutcome::Completed(value) => Ok(value),
        other => Err(CallError::TaskUnavailable {
            id,
            state: other.label(),
        }),
    }
}

/// `System.RemoveTask(id)`
fn remove_task(context: &AppContext, args: Args) -> CallResult<()> {
    let id = args.integer(0)?;
    if let Ok(task_id) = u64::try_from(id) {
        context.tasks.remove(task_id);
    }
    Ok(())
}
