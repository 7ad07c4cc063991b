//! Error types for function construction.

use fm_core::error::FmError;
use thiserror::Error;

/// Errors that can occur while assembling a function value object.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FunctionError {
    #[error("Invalid working range for {what}: min {min} exceeds max {max}")]
    InvalidRange {
        what: &'static str,
        min: String,
        max: String,
    },

    #[error("Duplicate truth table position: {position}")]
    DuplicatePosition { position: i64 },

    #[error("Duplicate plugin parameter: {name}")]
    DuplicateParam { name: String },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error(transparent)]
    Core(#[from] FmError),
}

pub type FunctionResult<T> = Result<T, FunctionError>;

impl From<FunctionError> for FmError {
    fn from(e: FunctionError) -> Self {
        match e {
            FunctionError::Core(inner) => inner,
            FunctionError::InvalidRange { what, .. } => FmError::InvalidArg { what },
            FunctionError::DuplicatePosition { .. } => FmError::InvalidArg {
                what: "duplicate truth table position",
            },
            FunctionError::DuplicateParam { .. } => FmError::InvalidArg {
                what: "duplicate plugin parameter",
            },
            FunctionError::InvalidArg { what } => FmError::InvalidArg { what },
        }
    }
}
