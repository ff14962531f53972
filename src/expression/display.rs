use std::fmt;

use crate::expression::token::{Op, Token};

/// How a solution trace is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrintStyle {
    /// Reverse Polish notation, `3 2 + 4 *`
    Rpn,
    /// Infix with parentheses only where needed, `(3 + 2) * 4`
    #[default]
    Expr,
    /// Infix with every compound operand parenthesized
    Paren,
}

/// Returns the index of the first token of the subexpression ending at `end`.
///
/// A literal is its own subexpression. An operator's right operand ends just
/// before it, and its left operand ends just before the right operand starts,
/// so the boundary is found without any parent links. Returns `None` if the
/// trace is not well-formed postfix up to `end`.
pub fn expression_start(trace: &[Token], end: usize) -> Option<usize> {
    match trace.get(end)? {
        Token::Literal(_) => Some(end),
        Token::Operator(..) => {
            let rhs_start = expression_start(trace, end.checked_sub(1)?)?;
            expression_start(trace, rhs_start.checked_sub(1)?)
        }
    }
}

/// A trace rendered in one of the [`PrintStyle`]s
#[derive(Debug, Clone, Copy)]
pub struct Rendered<'a> {
    trace: &'a [Token],
    style: PrintStyle,
}

impl<'a> Rendered<'a> {
    pub fn new(trace: &'a [Token], style: PrintStyle) -> Self {
        Self { trace, style }
    }
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fn write_rpn(f: &mut fmt::Formatter, trace: &[Token]) -> fmt::Result {
            for (index, token) in trace.iter().enumerate() {
                if index > 0 {
                    write!(f, " ")?;
                }
                match token {
                    Token::Literal(value) => write!(f, "{}", value)?,
                    Token::Operator(op, _) => write!(f, "{}", op)?,
                }
            }
            Ok(())
        }

        fn needs_parens(style: PrintStyle, parent: Op, operand: Token, is_rhs: bool) -> bool {
            let Some(op) = operand.op() else {
                return false;
            };
            if style == PrintStyle::Paren {
                return true;
            }
            op.precedence() < parent.precedence()
                || (is_rhs
                    && op.precedence() == parent.precedence()
                    && parent.is_left_associative_only())
        }

        fn write_with_parens(
            f: &mut fmt::Formatter,
            trace: &[Token],
            end: usize,
            style: PrintStyle,
            need_parens: bool,
        ) -> fmt::Result {
            if need_parens {
                write!(f, "(")?;
                write_infix(f, trace, end, style)?;
                write!(f, ")")
            } else {
                write_infix(f, trace, end, style)
            }
        }

        fn write_infix(
            f: &mut fmt::Formatter,
            trace: &[Token],
            end: usize,
            style: PrintStyle,
        ) -> fmt::Result {
            match trace.get(end).copied() {
                None => Err(fmt::Error),
                Some(Token::Literal(value)) => write!(f, "{}", value),
                Some(Token::Operator(op, _)) => {
                    let rhs_end = end.checked_sub(1).ok_or(fmt::Error)?;
                    let rhs_start = expression_start(trace, rhs_end).ok_or(fmt::Error)?;
                    let lhs_end = rhs_start.checked_sub(1).ok_or(fmt::Error)?;
                    let lhs = trace.get(lhs_end).copied().ok_or(fmt::Error)?;
                    let rhs = trace.get(rhs_end).copied().ok_or(fmt::Error)?;

                    write_with_parens(f, trace, lhs_end, style, needs_parens(style, op, lhs, false))?;
                    write!(f, " {} ", op)?;
                    write_with_parens(f, trace, rhs_end, style, needs_parens(style, op, rhs, true))
                }
            }
        }

        match self.style {
            PrintStyle::Rpn => write_rpn(f, self.trace),
            PrintStyle::Expr | PrintStyle::Paren => match self.trace.len() {
                0 => Ok(()),
                len => write_infix(f, self.trace, len - 1, self.style),
            },
        }
    }
}

/// One output line for a solution, optionally prefixed with `VALUE = `.
///
/// The prefix is used for range targets, where the reached value is not
/// implied by the request.
#[derive(Debug, Clone, Copy)]
pub struct SolutionLine<'a> {
    rendered: Rendered<'a>,
    show_value: bool,
}

impl<'a> SolutionLine<'a> {
    pub fn new(trace: &'a [Token], style: PrintStyle, show_value: bool) -> Self {
        Self {
            rendered: Rendered::new(trace, style),
            show_value,
        }
    }
}

impl fmt::Display for SolutionLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.show_value
            && let Some(last) = self.rendered.trace.last()
        {
            write!(f, "{} = ", last.value())?;
        }
        write!(f, "{}", self.rendered)
    }
}
