use log::{debug, warn};

use crate::expression::Number;
use crate::utils::errors::UtilsError;

/// # Errors
///
/// Returns an error if the text is empty, is not a plain decimal integer
/// that fits in 64 bits, or is zero.
pub fn parse_number(text: &str) -> Result<Number, UtilsError> {
    debug!("Parsing number: '{}'", text);

    if text.is_empty() {
        warn!("Number is empty");
        return Err(UtilsError::EmptyNumber);
    }

    if !text.chars().all(|c| c.is_ascii_digit()) {
        warn!("Number contains non-digit characters: '{}'", text);
        return Err(UtilsError::InvalidNumber(text.to_string()));
    }

    let number = text
        .parse::<Number>()
        .map_err(|_| UtilsError::InvalidNumber(text.to_string()))?;
    if number == 0 {
        return Err(UtilsError::ZeroNumber(text.to_string()));
    }

    Ok(number)
}

/// # Errors
///
/// Returns the first error [`parse_number`] reports.
pub fn parse_numbers<S: AsRef<str>>(texts: &[S]) -> Result<Vec<Number>, UtilsError> {
    texts.iter().map(|text| parse_number(text.as_ref())).collect()
}
