use log::debug;

use crate::solver::TargetRange;
use crate::utils::errors::UtilsError;
use crate::utils::validation::parse_number;

/// Parses `N` or an inclusive range `START-END`.
///
/// # Errors
///
/// Returns an error if either bound is not a positive integer or if the
/// start is larger than the end.
pub fn parse_target(text: &str) -> Result<TargetRange, UtilsError> {
    debug!("Parsing target: '{}'", text);

    match text.split_once('-') {
        None => Ok(TargetRange::exact(parse_number(text)?)),
        Some((start, end)) => {
            let start = parse_number(start.trim())?;
            let end = parse_number(end.trim())?;
            TargetRange::new(start, end).map_err(|_| UtilsError::InvalidRange(text.to_string()))
        }
    }
}
