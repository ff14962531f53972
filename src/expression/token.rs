use std::fmt;

use crate::expression::errors::ExpressionError;

/// Input numbers and every intermediate result are non-negative integers
pub type Number = u64;

/// The four binary operators a trace may contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    /// Operators in the order the search tries them
    pub const ALL: [Op; 4] = [Op::Add, Op::Sub, Op::Mul, Op::Div];

    pub fn symbol(self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
            Op::Div => '/',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Op> {
        match symbol {
            '+' => Some(Op::Add),
            '-' => Some(Op::Sub),
            '*' => Some(Op::Mul),
            '/' => Some(Op::Div),
            _ => None,
        }
    }

    /// `+` and `-` bind looser than `*` and `/`
    pub fn precedence(self) -> u8 {
        match self {
            Op::Add | Op::Sub => 1,
            Op::Mul | Op::Div => 2,
        }
    }

    /// Whether `a op (b op' c)` can differ from `a op b op' c` for equal precedence
    pub fn is_left_associative_only(self) -> bool {
        matches!(self, Op::Sub | Op::Div)
    }

    /// Applies the operator under numbers-game rules.
    ///
    /// # Errors
    ///
    /// Returns an error for a negative difference, a division that is not
    /// exact, a division by zero, or a result that does not fit in 64 bits.
    pub fn apply(self, lhs: Number, rhs: Number) -> Result<Number, ExpressionError> {
        match self {
            Op::Add => lhs.checked_add(rhs).ok_or(ExpressionError::Overflow),
            Op::Sub => lhs
                .checked_sub(rhs)
                .ok_or(ExpressionError::NegativeResult { lhs, rhs }),
            Op::Mul => lhs.checked_mul(rhs).ok_or(ExpressionError::Overflow),
            Op::Div => {
                if rhs == 0 {
                    Err(ExpressionError::DivisionByZero)
                } else if lhs % rhs != 0 {
                    Err(ExpressionError::InexactDivision { lhs, rhs })
                } else {
                    Ok(lhs / rhs)
                }
            }
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One entry of a postfix expression trace.
///
/// Operators carry the value they folded to, so any position in a trace
/// knows the value of the subexpression ending there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Literal(Number),
    Operator(Op, Number),
}

impl Token {
    pub fn value(self) -> Number {
        match self {
            Token::Literal(value) | Token::Operator(_, value) => value,
        }
    }

    pub fn op(self) -> Option<Op> {
        match self {
            Token::Literal(_) => None,
            Token::Operator(op, _) => Some(op),
        }
    }
}

impl Default for Token {
    fn default() -> Self {
        Token::Literal(0)
    }
}
