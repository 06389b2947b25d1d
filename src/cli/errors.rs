//! Runner error types
//!
//! Every runner error ends the process with a non-zero status.

use std::fmt;
use std::io;

/// Runner error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Working directory could not be entered
    IoError,
    /// Argument text is not valid wire format
    InvalidArguments,
    /// Operation registry could not be built
    RegistryInvalid,
    /// System.Setup failed
    BootFailed,
    /// A demo step returned `[false]`
    CallFailed,
}

impl CliErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::IoError => "HIVE_CLI_IO_ERROR",
            Self::InvalidArguments => "HIVE_CLI_INVALID_ARGUMENTS",
            Self::RegistryInvalid => "HIVE_CLI_REGISTRY_INVALID",
            Self::BootFailed => "HIVE_CLI_BOOT_FAILED",
            Self::CallFailed => "HIVE_CLI_CALL_FAILED",
        }
    }
}

/// Runner error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidArguments, msg)
    }

    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BootFailed, msg)
    }

    pub fn call_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::CallFailed, msg)
    }

    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::new(CliErrorCode::IoError, e.to_string())
    }
}

impl From<crate::router::CallError> for CliError {
    fn from(e: crate::router::CallError) -> Self {
        Self::new(CliErrorCode::RegistryInvalid, e.to_string())
    }
}

/// Runner result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::boot_failed("no hive.json");
        assert_eq!(err.to_string(), "HIVE_CLI_BOOT_FAILED: no hive.json");
        assert_eq!(err.code(), &CliErrorCode::BootFailed);
        assert_eq!(err.message(), "no hive.json");
    }
}
