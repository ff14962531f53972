//! Postfix expression traces: tokens, rendering and evaluation

mod display;
mod errors;
mod eval;
mod token;

pub use display::{PrintStyle, Rendered, SolutionLine, expression_start};
pub use errors::ExpressionError;
pub use eval::{evaluate_infix, evaluate_rpn};
pub use token::{Number, Op, Token};

#[cfg(test)]
mod tests;
