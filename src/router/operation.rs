//! Operation descriptors

use std::fmt;
use std::sync::Arc;

use crate::context::AppContext;
use crate::wire::WireValue;

use super::envelope::operation_key;
use super::errors::CallResult;
use super::marshal::Args;

/// Typed parameter accepted by an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Bool,
    Number,
    /// A number with no fractional part
    Integer,
    String,
    Array,
}

impl ParamKind {
    pub fn name(&self) -> &'static str {
        match self {
            ParamKind::Bool => "bool",
            ParamKind::Number => "number",
            ParamKind::Integer => "integer",
            ParamKind::String => "string",
            ParamKind::Array => "array",
        }
    }

    pub fn accepts(&self, value: &WireValue) -> bool {
        match self {
            ParamKind::Bool => matches!(value, WireValue::Bool(_)),
            ParamKind::Number => matches!(value, WireValue::Number(_)),
            ParamKind::Integer => value.as_integer().is_some(),
            ParamKind::String => matches!(value, WireValue::String(_)),
            ParamKind::Array => matches!(value, WireValue::Array(_)),
        }
    }
}

/// How wire arguments map onto parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamShape {
    /// One wire argument per parameter
    Positional(Vec<ParamKind>),
    /// Every remaining wire argument, as one array
    WholeArray,
}

impl ParamShape {
    pub fn none() -> Self {
        ParamShape::Positional(Vec::new())
    }

    pub fn one(kind: ParamKind) -> Self {
        ParamShape::Positional(vec![kind])
    }
}

/// Where and how an operation body runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discipline {
    /// On the calling thread; the reply carries the result
    Synchronous,
    /// On the worker pool; the reply carries a task id to poll
    Tracked,
    /// On the worker pool; nothing is observable afterwards
    FireAndForget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnKind {
    Value,
    Void,
}

/// Body of a regular operation
pub type Handler = Arc<dyn Fn(&AppContext, Args) -> CallResult<WireValue> + Send + Sync>;

/// Body of the bootstrap operation; produces the context every other
/// operation runs against
pub type BootstrapHandler = Arc<dyn Fn(Args) -> CallResult<AppContext> + Send + Sync>;

#[derive(Clone)]
pub enum OperationHandler {
    Bootstrap(BootstrapHandler),
    Standard(Handler),
}

/// Everything the router needs to serve one `{group, operation}`
#[derive(Clone)]
pub struct OperationDescriptor {
    pub group: &'static str,
    pub name: &'static str,
    pub shape: ParamShape,
    pub discipline: Discipline,
    pub returns: ReturnKind,
    pub handler: OperationHandler,
}

impl OperationDescriptor {
    /// An operation that returns a value
    pub fn value<F>(
        group: &'static str,
        name: &'static str,
        shape: ParamShape,
        discipline: Discipline,
        handler: F,
    ) -> Self
    where
        F: Fn(&AppContext, Args) -> CallResult<WireValue> + Send + Sync + 'static,
    {
        Self {
            group,
            name,
            shape,
            discipline,
            returns: ReturnKind::Value,
            handler: OperationHandler::Standard(Arc::new(handler)),
        }
    }

    /// An operation acknowledged with `true` once dispatched
    pub fn void<F>(
        group: &'static str,
        name: &'static str,
        shape: ParamShape,
        discipline: Discipline,
        handler: F,
    ) -> Self
    where
        F: Fn(&AppContext, Args) -> CallResult<()> + Send + Sync + 'static,
    {
        let handler = move |ctx: &AppContext, args: Args| -> CallResult<WireValue> {
            handler(ctx, args)?;
            Ok(WireValue::Null)
        };
        Self {
            group,
            name,
            shape,
            discipline,
            returns: ReturnKind::Void,
            handler: OperationHandler::Standard(Arc::new(handler)),
        }
    }

    /// The single operation allowed before setup; always synchronous
    pub fn bootstrap<F>(group: &'static str, name: &'static str, shape: ParamShape, handler: F) -> Self
    where
        F: Fn(Args) -> CallResult<AppContext> + Send + Sync + 'static,
    {
        Self {
            group,
            name,
            shape,
            discipline: Discipline::Synchronous,
            returns: ReturnKind::Void,
            handler: OperationHandler::Bootstrap(Arc::new(handler)),
        }
    }

    /// Registry key
    pub fn key(&self) -> String {
        operation_key(self.group, self.name)
    }

    /// `Group.Name`, for logs and errors
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.group, self.name)
    }

    pub fn is_bootstrap(&self) -> bool {
        matches!(self.handler, OperationHandler::Bootstrap(_))
    }
}

impl fmt::Debug for OperationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationDescriptor")
            .field("group", &self.group)
            .field("name", &self.name)
            .field("shape", &self.shape)
            .field("discipline", &self.discipline)
            .field("returns", &self.returns)
            .field("bootstrap", &self.is_bootstrap())
            .finish()
    }
}
