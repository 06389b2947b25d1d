//! Call dispatch
//!
//! `decode -> resolve -> marshal -> execute -> encode`. Nothing raised past
//! decoding escapes as anything but a `[false]` reply.

use std::sync::{Arc, OnceLock};

use tracing::{debug, error, warn};

use crate::context::AppContext;
use crate::wire::WireValue;

use super::envelope::{CallEnvelope, Reply};
use super::errors::{CallError, CallResult};
use super::marshal::{marshal, Args};
use super::operation::{
    BootstrapHandler, Discipline, Handler, OperationDescriptor, OperationHandler, ReturnKind,
};
use super::registry::OperationRegistry;

/// Result of one call at the boundary
#[derive(Debug, Clone, PartialEq)]
pub struct CallOutcome {
    pub reply: Reply,
    /// The process cannot continue (failed bootstrap)
    pub fatal: bool,
}

impl CallOutcome {
    pub fn encode(&self) -> String {
        self.reply.encode()
    }
}

/// Routes host calls to registered operations.
///
/// Holds the application context once bootstrap has produced it; until then
/// only the bootstrap operation is routable.
pub struct Router {
    registry: OperationRegistry,
    context: OnceLock<Arc<AppContext>>,
}

impl Router {
    pub fn new(registry: OperationRegistry) -> Self {
        Self {
            registry,
            context: OnceLock::new(),
        }
    }

    /// A router that is ready without running bootstrap
    pub fn with_context(registry: OperationRegistry, context: AppContext) -> Self {
        let router = Self::new(registry);
        let _ = router.context.set(Arc::new(context));
        router
    }

    pub fn is_ready(&self) -> bool {
        self.context.get().is_some()
    }

    pub fn context(&self) -> Option<&Arc<AppContext>> {
        self.context.get()
    }

    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    /// Handles one raw call string
    pub fn call(&self, input: &str) -> CallOutcome {
        match self.dispatch(input) {
            Ok(reply) => CallOutcome { reply, fatal: false },
            Err(err) => {
                let fatal = err.is_fatal();
                let reply = match &err {
                    CallError::TaskUnavailable { id, state } => {
                        debug!(task_id = *id, state = *state, "task has no value");
                        Reply::failure_with(WireValue::from(*state))
                    }
                    _ if fatal => {
                        error!(code = err.code(), error = %err, fatal = true, "call failed");
                        Reply::failure()
                    }
                    _ => {
                        error!(code = err.code(), error = %err, "call failed");
                        Reply::failure()
                    }
                };
                CallOutcome { reply, fatal }
            }
        }
    }

    fn dispatch(&self, input: &str) -> CallResult<Reply> {
        let call = CallEnvelope::decode(input)?;
        let descriptor = self.registry.resolve(&call.group, &call.operation)?;
        debug!(operation = %descriptor.qualified_name(), args = call.args.len(), "call");

        match &descriptor.handler {
            OperationHandler::Bootstrap(handler) => self.bootstrap(descriptor, handler, call.args),
            OperationHandler::Standard(handler) => {
                let context = self
                    .context
                    .get()
                    .ok_or_else(|| CallError::NotReady(descriptor.qualified_name()))?;
                let args = marshal(descriptor, call.args)?;
                execute(descriptor, handler, context, args)
            }
        }
    }

    fn bootstrap(
        &self,
        descriptor: &OperationDescriptor,
        handler: &BootstrapHandler,
        args: Vec<WireValue>,
    ) -> CallResult<Reply> {
        if self.is_ready() {
            debug!(operation = %descriptor.qualified_name(), "already set up");
            return Ok(Reply::ack());
        }

        let args = marshal(descriptor, args).map_err(CallError::bootstrap)?;
        let context = handler(args).map_err(CallError::bootstrap)?;
        if self.context.set(Arc::new(context)).is_err() {
            warn!("concurrent setup; keeping the first context");
        }
        Ok(Reply::ack())
    }
}

fn execute(
    descriptor: &OperationDescriptor,
    handler: &Handler,
    context: &Arc<AppContext>,
    args: Args,
) -> CallResult<Reply> {
    match (descriptor.discipline, descriptor.returns) {
        (Discipline::Synchronous, ReturnKind::Value) => {
            Ok(Reply::value(handler(context.as_ref(), args)?))
        }
        (Discipline::Synchronous, ReturnKind::Void) => {
            handler(context.as_ref(), args)?;
            Ok(Reply::ack())
        }
        (Discipline::Tracked, ReturnKind::Value) => {
            let name = descriptor.qualified_name();
            let handler = Arc::clone(handler);
            let ctx = Arc::clone(context);
            let id = context.tasks.submit(move || {
                handler(ctx.as_ref(), args).map_err(|err| {
                    error!(operation = %name, code = err.code(), error = %err, "tracked operation failed");
                    err.to_string()
                })
            });
            Ok(Reply::value(WireValue::from(id)))
        }
        (Discipline::Tracked, ReturnKind::Void) | (Discipline::FireAndForget, _) => {
            let name = descriptor.qualified_name();
            let handler = Arc::clone(handler);
            let ctx = Arc::clone(context);
            context.tasks.detach(move || {
                if let Err(err) = handler(ctx.as_ref(), args) {
                    error!(operation = %name, code = err.code(), error = %err, "detached operation failed");
                }
            });
            Ok(match descriptor.returns {
                ReturnKind::Void => Reply::ack(),
                ReturnKind::Value => Reply::accepted(),
            })
        }
    }
}
