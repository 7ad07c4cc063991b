use thiserror::Error;

pub type FmResult<T> = Result<T, FmError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FmError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid number for {what}: {text:?}")]
    InvalidNumber { what: &'static str, text: String },

    #[error("Unknown {quantity} unit: {unit:?}")]
    UnknownUnit { quantity: &'static str, unit: String },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
