//! Parsing and validation of command-line inputs

mod errors;
mod range;
mod validation;

pub use errors::UtilsError;
pub use range::parse_target;
pub use validation::{parse_number, parse_numbers};
