//! Wire codec errors
//!
//! Every decode failure is a protocol error from the router's point of view.

use thiserror::Error;

/// Result type for wire codec operations
pub type WireResult<T> = Result<T, WireError>;

/// Malformed call text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    #[error("unexpected end of input at offset {0}")]
    UnexpectedEnd(usize),

    #[error("unexpected character '{found}' at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    #[error("unterminated string starting at offset {0}")]
    UnterminatedString(usize),

    #[error("unrecognized token '{token}' at offset {offset}")]
    UnknownToken { token: String, offset: usize },

    #[error("trailing input at offset {0}")]
    TrailingInput(usize),

    #[error("arrays nested too deeply at offset {0}")]
    TooDeep(usize),
}

impl WireError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        "HIVE_PROTOCOL_ERROR"
    }

    /// Byte offset in the input where decoding stopped
    pub fn offset(&self) -> usize {
        match self {
            WireError::UnexpectedEnd(offset)
            | WireError::UnterminatedString(offset)
            | WireError::TrailingInput(offset)
            | WireError::TooDeep(offset) => *offset,
            WireError::UnexpectedChar { offset, .. } | WireError::UnknownToken { offset, .. } => {
                *offset
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_is_reported() {
        let err = WireError::UnknownToken {
            token: "maybe".into(),
            offset: 7,
        };
        assert_eq!(err.offset(), 7);
        assert!(err.to_string().contains("maybe"));
    }

    #[test]
    fn test_all_variants_share_protocol_code() {
        assert_eq!(WireError::TrailingInput(3).code(), "HIVE_PROTOCOL_ERROR");
        assert_eq!(WireError::UnexpectedEnd(0).code(), "HIVE_PROTOCOL_ERROR");
    }
}
