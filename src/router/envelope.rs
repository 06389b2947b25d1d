//! Call and reply envelopes

use crate::wire::{self, WireValue};

use super::errors::{CallError, CallResult};

/// A decoded call: `["group","operation", args...]`
#[derive(Debug, Clone, PartialEq)]
pub struct CallEnvelope {
    pub group: String,
    pub operation: String,
    pub args: Vec<WireValue>,
}

impl CallEnvelope {
    pub fn decode(input: &str) -> CallResult<Self> {
        let items = wire::decode(input)?
            .into_array()
            .ok_or_else(|| CallError::MalformedCall("call must be an array".into()))?;

        let mut items = items.into_iter();
        let (group, operation) = match (items.next(), items.next()) {
            (Some(WireValue::String(group)), Some(WireValue::String(operation))) => {
                (group, operation)
            }
            (Some(_), Some(_)) => {
                return Err(CallError::MalformedCall(
                    "group and operation must be strings".into(),
                ))
            }
            _ => {
                return Err(CallError::MalformedCall(
                    "call needs a group and an operation".into(),
                ))
            }
        };

        Ok(Self {
            group,
            operation,
            args: items.collect(),
        })
    }

    /// Lookup key, `group.operation` lower-cased
    pub fn key(&self) -> String {
        operation_key(&self.group, &self.operation)
    }
}

pub(crate) fn operation_key(group: &str, operation: &str) -> String {
    format!("{}.{}", group.to_lowercase(), operation.to_lowercase())
}

/// Reply sent back to the host: `[success]` or `[success, result]`
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub success: bool,
    pub result: Option<WireValue>,
}

impl Reply {
    /// `[true, value]`
    pub fn value(value: WireValue) -> Self {
        Self {
            success: true,
            result: Some(value),
        }
    }

    /// `[true, true]`, the fixed acknowledgement for void operations
    pub fn ack() -> Self {
        Self::value(WireValue::Bool(true))
    }

    /// `[true]`, work accepted with nothing to report
    pub fn accepted() -> Self {
        Self {
            success: true,
            result: None,
        }
    }

    /// `[false]`
    pub fn failure() -> Self {
        Self {
            success: false,
            result: None,
        }
    }

    /// `[false, detail]`
    pub fn failure_with(detail: WireValue) -> Self {
        Self {
            success: false,
            result: Some(detail),
        }
    }

    pub fn encode(&self) -> String {
        let mut items = vec![WireValue::Bool(self.success)];
        if let Some(result) = &self.result {
            items.push(result.clone());
        }
        WireValue::Array(items).encode()
    }
}
