use thiserror::Error;

/// Errors that can occur while parsing user input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UtilsError {
    #[error("Number cannot be empty")]
    EmptyNumber,
    #[error("Not a valid numbers game number: {0}")]
    InvalidNumber(String),
    #[error("Numbers game numbers must be positive: {0}")]
    ZeroNumber(String),
    #[error("Invalid target range (start must not exceed end): {0}")]
    InvalidRange(String),
}
