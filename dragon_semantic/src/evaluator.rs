//! Contains the [`evaluate`] function which reduces an expression tree into its value.

use dragon_base::{diagnostic::Handler, source_file::SourceElement};
use dragon_syntax::syntax_tree::{
    expression::{Binary, BinaryOperator, Expression},
    statement::Statement,
};

use crate::error::{ArithmeticOverflow, Error};

/// Evaluates the expression of the given statement.
///
/// # Errors
/// See [`evaluate`].
pub fn evaluate_statement(statement: &Statement, handler: &dyn Handler<Error>) -> Option<u64> {
    evaluate(statement.expression(), handler)
}

/// Evaluates the given expression tree bottom-up, left operand first.
///
/// The left operands of a chain such as `1+1+...+1` are walked with a loop, so only the
/// parenthesized right operands cost a level of recursion.
///
/// # Errors
/// - [`Error::ArithmeticOverflow`]: if any addition or multiplication overflows. Evaluation stops
///   at the first overflowing node.
pub fn evaluate(expression: &Expression, handler: &dyn Handler<Error>) -> Option<u64> {
    let mut spine = Vec::new();
    let mut current = expression;

    let mut value = loop {
        match current {
            Expression::Numeric(numeric) => break numeric.value(),
            Expression::Binary(binary) => {
                spine.push(binary);
                current = binary.left_operand();
            }
        }
    };

    for binary in spine.into_iter().rev() {
        let right_value = evaluate(binary.right_operand(), handler)?;
        value = apply_binary(binary, value, right_value, handler)?;
    }

    Some(value)
}

fn apply_binary(
    binary: &Binary,
    left_value: u64,
    right_value: u64,
    handler: &dyn Handler<Error>,
) -> Option<u64> {
    let value = match binary.operator() {
        BinaryOperator::Add(..) => left_value.checked_add(right_value),
        BinaryOperator::Multiply(..) => left_value.checked_mul(right_value),
    };

    if value.is_none() {
        handler.receive(Error::ArithmeticOverflow(ArithmeticOverflow {
            span: binary.span(),
            left_value,
            right_value,
        }));
    }

    value
}
