use log::debug;

use crate::expression::errors::ExpressionError;
use crate::expression::token::{Number, Op};

/// Evaluates a space-separated RPN line such as `3 2 + 4 *`.
///
/// Every intermediate result is checked the same way the search checks it,
/// so a line that evaluates here never went negative or fractional.
///
/// # Errors
///
/// Returns an error for an empty line, an unknown token, an operator
/// without two operands, more than one value left at the end, or any
/// operation [`Op::apply`] rejects.
pub fn evaluate_rpn(text: &str) -> Result<Number, ExpressionError> {
    debug!("Evaluating RPN: '{}'", text);

    let mut stack: Vec<Number> = Vec::new();
    for word in text.split_whitespace() {
        let mut chars = word.chars();
        let op = match (chars.next(), chars.next()) {
            (Some(symbol), None) => Op::from_symbol(symbol),
            _ => None,
        };

        if let Some(op) = op {
            let rhs = stack.pop().ok_or(ExpressionError::MissingOperand(op.symbol()))?;
            let lhs = stack.pop().ok_or(ExpressionError::MissingOperand(op.symbol()))?;
            stack.push(op.apply(lhs, rhs)?);
        } else {
            let value = word
                .parse::<Number>()
                .map_err(|_| ExpressionError::InvalidToken(word.to_string()))?;
            stack.push(value);
        }
    }

    match stack.as_slice() {
        [] => Err(ExpressionError::EmptyExpression),
        [value] => Ok(*value),
        rest => Err(ExpressionError::LeftoverOperands(rest.len())),
    }
}

/// Evaluates an infix line such as `(3 + 2) * 4` with the usual precedence.
///
/// # Errors
///
/// Returns an error for malformed input, unbalanced parentheses, or any
/// operation [`Op::apply`] rejects.
pub fn evaluate_infix(text: &str) -> Result<Number, ExpressionError> {
    debug!("Evaluating infix: '{}'", text);

    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(ExpressionError::EmptyExpression);
    }

    let mut parser = InfixParser { tokens, pos: 0 };
    let value = parser.expression()?;
    match parser.peek() {
        None => Ok(value),
        Some(InfixToken::Close) => Err(ExpressionError::UnbalancedParentheses),
        Some(other) => Err(ExpressionError::InvalidToken(other.describe())),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum InfixToken {
    Number(Number),
    Op(Op),
    Open,
    Close,
}

impl InfixToken {
    fn describe(self) -> String {
        match self {
            InfixToken::Number(value) => value.to_string(),
            InfixToken::Op(op) => op.symbol().to_string(),
            InfixToken::Open => "(".to_string(),
            InfixToken::Close => ")".to_string(),
        }
    }
}

fn tokenize(text: &str) -> Result<Vec<InfixToken>, ExpressionError> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        match c {
            ' ' | '\t' => {}
            '(' => tokens.push(InfixToken::Open),
            ')' => tokens.push(InfixToken::Close),
            '0'..='9' => {
                let mut end = start + c.len_utf8();
                while let Some(&(index, next)) = chars.peek() {
                    if !next.is_ascii_digit() {
                        break;
                    }
                    end = index + next.len_utf8();
                    chars.next();
                }
                let digits = text.get(start..end).unwrap_or_default();
                let value = digits
                    .parse::<Number>()
                    .map_err(|_| ExpressionError::InvalidToken(digits.to_string()))?;
                tokens.push(InfixToken::Number(value));
            }
            other => match Op::from_symbol(other) {
                Some(op) => tokens.push(InfixToken::Op(op)),
                None => return Err(ExpressionError::InvalidToken(other.to_string())),
            },
        }
    }

    Ok(tokens)
}

struct InfixParser {
    tokens: Vec<InfixToken>,
    pos: usize,
}

impl InfixParser {
    fn peek(&self) -> Option<InfixToken> {
        self.tokens.get(self.pos).copied()
    }

    fn next_op(&mut self, precedence: u8) -> Option<Op> {
        match self.peek() {
            Some(InfixToken::Op(op)) if op.precedence() == precedence => {
                self.pos += 1;
                Some(op)
            }
            _ => None,
        }
    }

    fn expression(&mut self) -> Result<Number, ExpressionError> {
        let mut value = self.term()?;
        while let Some(op) = self.next_op(1) {
            let rhs = self.term_after(op)?;
            value = op.apply(value, rhs)?;
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<Number, ExpressionError> {
        let mut value = self.factor()?;
        while let Some(op) = self.next_op(2) {
            let rhs = self.factor_after(op)?;
            value = op.apply(value, rhs)?;
        }
        Ok(value)
    }

    fn term_after(&mut self, op: Op) -> Result<Number, ExpressionError> {
        if self.peek().is_none() {
            return Err(ExpressionError::MissingOperand(op.symbol()));
        }
        self.term()
    }

    fn factor_after(&mut self, op: Op) -> Result<Number, ExpressionError> {
        if self.peek().is_none() {
            return Err(ExpressionError::MissingOperand(op.symbol()));
        }
        self.factor()
    }

    fn factor(&mut self) -> Result<Number, ExpressionError> {
        let token = self.peek().ok_or(ExpressionError::EmptyExpression)?;
        self.pos += 1;
        match token {
            InfixToken::Number(value) => Ok(value),
            InfixToken::Open => {
                let value = self.expression()?;
                match self.peek() {
                    Some(InfixToken::Close) => {
                        self.pos += 1;
                        Ok(value)
                    }
                    _ => Err(ExpressionError::UnbalancedParentheses),
                }
            }
            InfixToken::Close => Err(ExpressionError::UnbalancedParentheses),
            InfixToken::Op(op) => Err(ExpressionError::MissingOperand(op.symbol())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{InfixToken, tokenize};
    use crate::expression::token::Op;

    #[test]
    fn test_tokenize_multi_digit_numbers() {
        let tokens = tokenize("(100 - 75) * 3");
        assert_eq!(
            tokens,
            Ok(vec![
                InfixToken::Open,
                InfixToken::Number(100),
                InfixToken::Op(Op::Sub),
                InfixToken::Number(75),
                InfixToken::Close,
                InfixToken::Op(Op::Mul),
                InfixToken::Number(3),
            ])
        );
    }

    #[test]
    fn test_tokenize_rejects_unknown_characters() {
        assert!(tokenize("3 ^ 2").is_err());
        assert!(tokenize("3.5").is_err());
    }
}
