//! Built-in operations
//!
//! `System.*` covers setup and task polling; `Example.*` is the reference
//! operation set over `exampletable1`.

pub mod example;
pub mod system;

use crate::router::{CallResult, OperationRegistry};

/// Registry holding every built-in operation
pub fn registry() -> CallResult<OperationRegistry> {
    let mut registry = OperationRegistry::new();
    for descriptor in system::operations().into_iter().chain(example::operations()) {
        registry.register(descriptor)?;
    }
    Ok(registry)
}
