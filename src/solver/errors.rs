use thiserror::Error;

use crate::expression::Number;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Need at least one number")]
    NoNumbers,
    #[error("Too many numbers: {count} given, at most {max} supported")]
    TooManyNumbers { count: usize, max: usize },
    #[error("Number at position {0} is zero")]
    ZeroNumber(usize),
    #[error("Invalid target range: {start}-{end}")]
    InvalidRange { start: Number, end: Number },
    #[error("Game has {count} numbers but the search buffers hold {capacity}")]
    CapacityExceeded { count: usize, capacity: usize },
}
