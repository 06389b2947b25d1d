//! Wire arguments to typed parameters

use crate::wire::WireValue;

use super::errors::{CallError, CallResult};
use super::operation::{OperationDescriptor, ParamKind, ParamShape};

/// Arguments that passed marshalling, in parameter order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Args {
    values: Vec<WireValue>,
}

impl Args {
    pub fn new(values: Vec<WireValue>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> CallResult<&WireValue> {
        self.values
            .get(index)
            .ok_or_else(|| CallError::Operation(format!("missing argument {}", index)))
    }

    pub fn bool(&self, index: usize) -> CallResult<bool> {
        let value = self.get(index)?;
        value.as_bool().ok_or_else(|| mismatch(index, ParamKind::Bool, value))
    }

    pub fn number(&self, index: usize) -> CallResult<f64> {
        let value = self.get(index)?;
        value.as_number().ok_or_else(|| mismatch(index, ParamKind::Number, value))
    }

    pub fn integer(&self, index: usize) -> CallResult<i64> {
        let value = self.get(index)?;
        value.as_integer().ok_or_else(|| mismatch(index, ParamKind::Integer, value))
    }

    pub fn string(&self, index: usize) -> CallResult<&str> {
        let value = self.get(index)?;
        value.as_str().ok_or_else(|| mismatch(index, ParamKind::String, value))
    }

    pub fn array(&self, index: usize) -> CallResult<&[WireValue]> {
        let value = self.get(index)?;
        value.as_array().ok_or_else(|| mismatch(index, ParamKind::Array, value))
    }

    /// Takes the whole-array parameter by value
    pub fn into_array(mut self) -> CallResult<Vec<WireValue>> {
        if self.values.len() != 1 {
            return Err(CallError::Operation("expected a single array argument".into()));
        }
        match self.values.pop() {
            Some(WireValue::Array(items)) => Ok(items),
            Some(other) => Err(mismatch(0, ParamKind::Array, &other)),
            None => Err(CallError::Operation("missing argument 0".into())),
        }
    }
}

fn mismatch(index: usize, kind: ParamKind, value: &WireValue) -> CallError {
    CallError::Operation(format!(
        "argument {} is {}, not {}",
        index,
        value.type_name(),
        kind.name()
    ))
}

/// Maps wire arguments onto the operation's declared parameters.
///
/// A whole-array operation receives a lone array argument as-is and wraps
/// any other argument list into one array. Parameterless operations also
/// accept a single empty array.
pub fn marshal(descriptor: &OperationDescriptor, args: Vec<WireValue>) -> CallResult<Args> {
    match &descriptor.shape {
        ParamShape::WholeArray => {
            let array = match <[WireValue; 1]>::try_from(args) {
                Ok([array @ WireValue::Array(_)]) => array,
                Ok([single]) => WireValue::Array(vec![single]),
                Err(args) => WireValue::Array(args),
            };
            Ok(Args::new(vec![array]))
        }
        ParamShape::Positional(kinds) => {
            let empty_array = kinds.is_empty()
                && matches!(args.as_slice(), [WireValue::Array(items)] if items.is_empty());
            let args = if empty_array { Vec::new() } else { args };

            if args.len() != kinds.len() {
                return Err(CallError::ArgumentCount {
                    operation: descriptor.qualified_name(),
                    expected: kinds.len(),
                    supplied: args.len(),
                });
            }

            for (index, (kind, value)) in kinds.iter().zip(&args).enumerate() {
                if !kind.accepts(value) {
                    return Err(CallError::UnsupportedParameterType {
                        operation: descriptor.qualified_name(),
                        index,
                        expected: kind.name(),
                        found: value.type_name(),
                    });
                }
            }

            Ok(Args::new(args))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::Discipline;

    fn op(shape: ParamShape) -> OperationDescriptor {
        OperationDescriptor::value("Test", "Op", shape, Discipline::Synchronous, |_, _| {
            Ok(WireValue::Null)
        })
    }

    #[test]
    fn test_positional() {
        let descriptor = op(ParamShape::Positional(vec![ParamKind::String, ParamKind::Integer]));
        let args = marshal(&descriptor, vec![WireValue::from("a"), WireValue::from(3i64)]).unwrap();
        assert_eq!(args.string(0).unwrap(), "a");
        assert_eq!(args.integer(1).unwrap(), 3);
    }

    #[test]
    fn test_positional_type_mismatch() {
        let descriptor = op(ParamShape::one(ParamKind::Integer));
        let err = marshal(&descriptor, vec![WireValue::from("5")]).unwrap_err();
        assert!(matches!(
            err,
            CallError::UnsupportedParameterType { index: 0, expected: "integer", found: "string", .. }
        ));

        let err = marshal(&descriptor, vec![WireValue::Number(1.5)]).unwrap_err();
        assert!(matches!(err, CallError::UnsupportedParameterType { .. }));
    }

    #[test]
    fn test_arity_mismatch() {
        let descriptor = op(ParamShape::one(ParamKind::Bool));
        let err = marshal(&descriptor, vec![]).unwrap_err();
        assert!(matches!(err, CallError::ArgumentCount { expected: 1, supplied: 0, .. }));

        let err = marshal(&descriptor, vec![WireValue::Bool(true), WireValue::Bool(false)]).unwrap_err();
        assert!(matches!(err, CallError::ArgumentCount { expected: 1, supplied: 2, .. }));
    }

    #[test]
    fn test_parameterless_accepts_empty_array() {
        let descriptor = op(ParamShape::none());
        assert!(marshal(&descriptor, vec![]).unwrap().is_empty());
        assert!(marshal(&descriptor, vec![WireValue::empty_array()]).unwrap().is_empty());
        assert!(marshal(&descriptor, vec![WireValue::from(1i64)]).is_err());
    }

    #[test]
    fn test_whole_array() {
        let descriptor = op(ParamShape::WholeArray);

        let nested = vec![WireValue::Array(vec![WireValue::from("a"), WireValue::from(1i64)])];
        let args = marshal(&descriptor, nested).unwrap();
        assert_eq!(
            args.into_array().unwrap(),
            vec![WireValue::from("a"), WireValue::from(1i64)]
        );

        let spread = vec![WireValue::from("a"), WireValue::from(1i64)];
        let args = marshal(&descriptor, spread).unwrap();
        assert_eq!(
            args.into_array().unwrap(),
            vec![WireValue::from("a"), WireValue::from(1i64)]
        );

        let args = marshal(&descriptor, vec![WireValue::from("solo")]).unwrap();
        assert_eq!(args.into_array().unwrap(), vec![WireValue::from("solo")]);

        let args = marshal(&descriptor, vec![]).unwrap();
        assert!(args.into_array().unwrap().is_empty());
    }
}
