use crate::expression::{
    ExpressionError, Op, PrintStyle, Rendered, SolutionLine, Token, evaluate_infix, evaluate_rpn,
    expression_start,
};

fn lit(value: u64) -> Token {
    Token::Literal(value)
}

fn op(op: Op, value: u64) -> Token {
    Token::Operator(op, value)
}

fn render(trace: &[Token], style: PrintStyle) -> String {
    format!("{}", Rendered::new(trace, style))
}

#[test]
fn test_expression_start_of_literal_is_itself() {
    let trace = [lit(3), lit(2), op(Op::Add, 5)];
    assert_eq!(expression_start(&trace, 0), Some(0));
    assert_eq!(expression_start(&trace, 1), Some(1));
}

#[test]
fn test_expression_start_skips_nested_operands() {
    // 4 (3 2 +) * : the right operand of * starts at index 1
    let trace = [lit(4), lit(3), lit(2), op(Op::Add, 5), op(Op::Mul, 20)];
    assert_eq!(expression_start(&trace, 3), Some(1));
    assert_eq!(expression_start(&trace, 4), Some(0));
}

#[test]
fn test_expression_start_rejects_malformed_trace() {
    let trace = [lit(2), op(Op::Add, 2)];
    assert_eq!(expression_start(&trace, 1), None);
    assert_eq!(expression_start(&trace, 5), None);
}

#[test]
fn test_render_rpn() {
    let trace = [lit(10), lit(2), op(Op::Div, 5), lit(3), op(Op::Add, 8)];
    assert_eq!(render(&trace, PrintStyle::Rpn), "10 2 / 3 +");
}

#[test]
fn test_render_single_literal() {
    let trace = [lit(7)];
    assert_eq!(render(&trace, PrintStyle::Rpn), "7");
    assert_eq!(render(&trace, PrintStyle::Expr), "7");
    assert_eq!(render(&trace, PrintStyle::Paren), "7");
}

#[test]
fn test_render_expr_minimal_parentheses() {
    let trace = [lit(3), lit(2), op(Op::Add, 5), lit(4), op(Op::Mul, 20)];
    assert_eq!(render(&trace, PrintStyle::Expr), "(3 + 2) * 4");

    let trace = [lit(4), lit(3), lit(2), op(Op::Add, 5), op(Op::Mul, 20)];
    assert_eq!(render(&trace, PrintStyle::Expr), "4 * (3 + 2)");

    let trace = [lit(10), lit(2), op(Op::Div, 5), lit(3), op(Op::Add, 8)];
    assert_eq!(render(&trace, PrintStyle::Expr), "10 / 2 + 3");
}

#[test]
fn test_render_expr_parenthesizes_right_side_of_subtraction() {
    let trace = [lit(7), lit(5), lit(3), op(Op::Sub, 2), op(Op::Sub, 5)];
    assert_eq!(render(&trace, PrintStyle::Expr), "7 - (5 - 3)");

    let trace = [lit(7), lit(5), op(Op::Sub, 2), lit(1), op(Op::Sub, 1)];
    assert_eq!(render(&trace, PrintStyle::Expr), "7 - 5 - 1");
}

#[test]
fn test_render_paren_wraps_every_compound_operand() {
    let trace = [lit(10), lit(2), op(Op::Div, 5), lit(3), op(Op::Add, 8)];
    assert_eq!(render(&trace, PrintStyle::Paren), "(10 / 2) + 3");

    let trace = [
        lit(25),
        lit(4),
        op(Op::Mul, 100),
        lit(7),
        lit(3),
        op(Op::Sub, 4),
        op(Op::Add, 104),
    ];
    assert_eq!(render(&trace, PrintStyle::Paren), "(25 * 4) + (7 - 3)");
    assert_eq!(render(&trace, PrintStyle::Expr), "25 * 4 + 7 - 3");
}

#[test]
fn test_solution_line_value_prefix() {
    let trace = [lit(2), lit(1), op(Op::Add, 3)];
    let line = format!("{}", SolutionLine::new(&trace, PrintStyle::Expr, true));
    assert_eq!(line, "3 = 2 + 1");

    let line = format!("{}", SolutionLine::new(&trace, PrintStyle::Rpn, false));
    assert_eq!(line, "2 1 +");
}

#[test]
fn test_evaluate_rpn() {
    assert_eq!(evaluate_rpn("3 2 + 4 *"), Ok(20));
    assert_eq!(evaluate_rpn("100 4 / 7 -"), Ok(18));
    assert_eq!(evaluate_rpn("42"), Ok(42));
}

#[test]
fn test_evaluate_rpn_rejects_negative_and_inexact_steps() {
    assert_eq!(
        evaluate_rpn("2 5 -"),
        Err(ExpressionError::NegativeResult { lhs: 2, rhs: 5 })
    );
    assert_eq!(
        evaluate_rpn("7 2 /"),
        Err(ExpressionError::InexactDivision { lhs: 7, rhs: 2 })
    );
    assert_eq!(evaluate_rpn("7 0 /"), Err(ExpressionError::DivisionByZero));
}

#[test]
fn test_evaluate_rpn_malformed() {
    assert_eq!(evaluate_rpn(""), Err(ExpressionError::EmptyExpression));
    assert_eq!(evaluate_rpn("1 +"), Err(ExpressionError::MissingOperand('+')));
    assert_eq!(evaluate_rpn("1 2"), Err(ExpressionError::LeftoverOperands(2)));
    assert_eq!(
        evaluate_rpn("1 x +"),
        Err(ExpressionError::InvalidToken("x".to_string()))
    );
}

#[test]
fn test_evaluate_infix_precedence() {
    assert_eq!(evaluate_infix("2 + 3 * 4"), Ok(14));
    assert_eq!(evaluate_infix("(2 + 3) * 4"), Ok(20));
    assert_eq!(evaluate_infix("7 - 5 - 1"), Ok(1));
    assert_eq!(evaluate_infix("7 - (5 - 3)"), Ok(5));
    assert_eq!(evaluate_infix("100 / 5 / 2"), Ok(10));
}

#[test]
fn test_evaluate_infix_malformed() {
    assert_eq!(evaluate_infix("   "), Err(ExpressionError::EmptyExpression));
    assert_eq!(
        evaluate_infix("(2 + 3"),
        Err(ExpressionError::UnbalancedParentheses)
    );
    assert_eq!(
        evaluate_infix("2 + 3)"),
        Err(ExpressionError::UnbalancedParentheses)
    );
    assert_eq!(evaluate_infix("2 +"), Err(ExpressionError::MissingOperand('+')));
}

#[test]
fn test_rendered_forms_agree_on_value() {
    let traces: [&[Token]; 3] = [
        &[lit(7), lit(5), lit(3), op(Op::Sub, 2), op(Op::Sub, 5)],
        &[lit(4), lit(3), lit(2), op(Op::Add, 5), op(Op::Mul, 20)],
        &[
            lit(75),
            lit(25),
            op(Op::Div, 3),
            lit(50),
            lit(2),
            op(Op::Sub, 48),
            op(Op::Mul, 144),
        ],
    ];

    for trace in traces {
        let expected = trace.last().map(|token| token.value());
        let rpn = evaluate_rpn(&render(trace, PrintStyle::Rpn)).ok();
        let expr = evaluate_infix(&render(trace, PrintStyle::Expr)).ok();
        let paren = evaluate_infix(&render(trace, PrintStyle::Paren)).ok();
        assert_eq!(rpn, expected);
        assert_eq!(expr, expected);
        assert_eq!(paren, expected);
    }
}
