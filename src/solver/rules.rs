//! Folding rules that keep one representative of each family of equivalent
//! expressions.
//!
//! The search only folds `lhs op rhs` with `lhs >= rhs`. On top of that, an
//! operator chain must be written left-deep with non-increasing right
//! operands, and folds that merely reproduce an operand are dropped.

use crate::expression::{Number, Op};
use crate::solver::stacks::FrontierEntry;

/// The operator that produced an operand and that operator's right operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Producer {
    pub op: Op,
    pub inner: Number,
}

/// A frontier entry together with how it was built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operand {
    pub value: Number,
    pub end: usize,
    pub producer: Option<Producer>,
}

impl Operand {
    pub fn literal(value: Number, end: usize) -> Self {
        Self {
            value,
            end,
            producer: None,
        }
    }

    pub fn entry(&self) -> FrontierEntry {
        FrontierEntry {
            value: self.value,
            end: self.end,
        }
    }

    fn produced_by(&self, op: Op) -> Option<Number> {
        self.producer
            .filter(|producer| producer.op == op)
            .map(|producer| producer.inner)
    }

    fn produced_by_any(&self, ops: &[Op]) -> bool {
        self.producer
            .is_some_and(|producer| ops.contains(&producer.op))
    }
}

/// Folds `lhs op rhs`, or returns `None` if the result is invalid or redundant.
pub fn fold(op: Op, lhs: &Operand, rhs: &Operand) -> Option<Number> {
    if lhs.value < rhs.value {
        return None;
    }

    match op {
        Op::Add => {
            // a + (b + c), a + (b - c)
            if rhs.produced_by_any(&[Op::Add, Op::Sub]) {
                return None;
            }
            // (a + b) + c with b < c
            if lhs.produced_by(Op::Add).is_some_and(|inner| inner < rhs.value) {
                return None;
            }
            // (a - b) + c
            if lhs.produced_by(Op::Sub).is_some() {
                return None;
            }
            lhs.value.checked_add(rhs.value)
        }
        Op::Sub => {
            if lhs.value == rhs.value {
                return None;
            }
            // a - (b + c)
            if rhs.produced_by(Op::Add).is_some() {
                return None;
            }
            // a - (b - c) is only needed when (a - b) + c would go negative
            if rhs
                .produced_by(Op::Sub)
                .is_some_and(|inner| lhs.value >= rhs.value.saturating_add(inner))
            {
                return None;
            }
            // (a - b) - c with b < c
            if lhs.produced_by(Op::Sub).is_some_and(|inner| inner < rhs.value) {
                return None;
            }
            let value = lhs.value - rhs.value;
            (value != rhs.value).then_some(value)
        }
        Op::Mul => {
            if rhs.value == 1 {
                return None;
            }
            // a * (b * c), a * (b / c)
            if rhs.produced_by_any(&[Op::Mul, Op::Div]) {
                return None;
            }
            // (a * b) * c with b < c
            if lhs.produced_by(Op::Mul).is_some_and(|inner| inner < rhs.value) {
                return None;
            }
            // (a / b) * c
            if lhs.produced_by(Op::Div).is_some() {
                return None;
            }
            lhs.value.checked_mul(rhs.value)
        }
        Op::Div => {
            if rhs.value == 1 || lhs.value % rhs.value != 0 {
                return None;
            }
            // a / (b * c), a / (b / c)
            if rhs.produced_by_any(&[Op::Mul, Op::Div]) {
                return None;
            }
            // (a / b) / c with b < c
            if lhs.produced_by(Op::Div).is_some_and(|inner| inner < rhs.value) {
                return None;
            }
            let value = lhs.value / rhs.value;
            (value != rhs.value).then_some(value)
        }
    }
}
