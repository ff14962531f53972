use std::fmt;

use log::debug;

use crate::expression::Number;
use crate::solver::constants::MAX_NUMBERS;
use crate::solver::errors::SolverError;

/// Inclusive range of acceptable results; an exact target has `start == end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetRange {
    start: Number,
    end: Number,
}

impl TargetRange {
    pub fn exact(target: Number) -> Self {
        Self {
            start: target,
            end: target,
        }
    }

    /// # Errors
    ///
    /// Returns an error if `start > end`.
    pub fn new(start: Number, end: Number) -> Result<Self, SolverError> {
        if start > end {
            return Err(SolverError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Number {
        self.start
    }

    pub fn end(&self) -> Number {
        self.end
    }

    pub fn is_exact(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, value: Number) -> bool {
        self.start <= value && value <= self.end
    }
}

impl fmt::Display for TargetRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_exact() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// The immutable inputs of one search, shared read-only by every worker on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    numbers: Vec<Number>,
    target: TargetRange,
}

impl Game {
    /// # Errors
    ///
    /// Returns an error if `numbers` is empty, holds more numbers than fit
    /// in the used-number bitmask, or contains a zero.
    pub fn new(numbers: Vec<Number>, target: TargetRange) -> Result<Self, SolverError> {
        if numbers.is_empty() {
            return Err(SolverError::NoNumbers);
        }
        if numbers.len() > MAX_NUMBERS {
            return Err(SolverError::TooManyNumbers {
                count: numbers.len(),
                max: MAX_NUMBERS,
            });
        }
        if let Some(position) = numbers.iter().position(|&number| number == 0) {
            return Err(SolverError::ZeroNumber(position));
        }

        debug!("Created game {:?} -> {}", numbers, target);
        Ok(Self { numbers, target })
    }

    pub fn numbers(&self) -> &[Number] {
        &self.numbers
    }

    pub fn target(&self) -> TargetRange {
        self.target
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}
