//! Operation registry

use std::collections::HashMap;

use super::envelope::operation_key;
use super::errors::{CallError, CallResult};
use super::operation::OperationDescriptor;

/// Operations by lower-cased `group.operation`
#[derive(Debug, Default)]
pub struct OperationRegistry {
    operations: HashMap<String, OperationDescriptor>,
}

impl OperationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an operation. Names are case-insensitive, so `A.B` and
    /// `a.b` collide.
    pub fn register(&mut self, descriptor: OperationDescriptor) -> CallResult<()> {
        let key = descriptor.key();
        if self.operations.contains_key(&key) {
            return Err(CallError::DuplicateOperation(descriptor.qualified_name()));
        }
        self.operations.insert(key, descriptor);
        Ok(())
    }

    pub fn resolve(&self, group: &str, operation: &str) -> CallResult<&OperationDescriptor> {
        self.operations
            .get(&operation_key(group, operation))
            .ok_or_else(|| CallError::Routing(format!("{}.{}", group, operation)))
    }

    /// Qualified names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .operations
            .values()
            .map(OperationDescriptor::qualified_name)
            .collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
