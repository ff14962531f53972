use thiserror::Error;

use crate::expression::token::Number;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("Expression is empty")]
    EmptyExpression,
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("Operator {0} is missing an operand")]
    MissingOperand(char),
    #[error("Expression leaves {0} values on the stack")]
    LeftoverOperands(usize),
    #[error("Negative intermediate result: {lhs} - {rhs}")]
    NegativeResult { lhs: Number, rhs: Number },
    #[error("Inexact division: {lhs} / {rhs}")]
    InexactDivision { lhs: Number, rhs: Number },
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Arithmetic overflow")]
    Overflow,
    #[error("Unbalanced parentheses")]
    UnbalancedParentheses,
}
