//! Save gate: is an internal expression complete enough to persist?

use layout_expr_interchange::is_well_formed;

use crate::error::NotSavableReason;
use crate::model::{ComplexExpression, InternalExpression};

/// `true` when [`crate::commit`] would accept the expression.
pub fn can_be_saved(expr: &InternalExpression) -> bool {
    check_savable(expr).is_ok()
}

/// Like [`can_be_saved`], with the first reason the expression is blocked.
///
/// A complex expression must be well-formed JSON; otherwise there must be
/// at least one condition and every condition needs a function. Missing
/// operand values never block saving.
pub fn check_savable(expr: &InternalExpression) -> Result<(), NotSavableReason> {
    if let Some(complex) = &expr.complex_expression {
        return match complex {
            ComplexExpression::Wire(value) if is_well_formed(value) => Ok(()),
            ComplexExpression::Wire(_) => Err(NotSavableReason::MalformedComplex),
            ComplexExpression::Draft(_) => match complex.parsed() {
                Some(value) if is_well_formed(&value) => Ok(()),
                Some(_) => Err(NotSavableReason::MalformedComplex),
                None => Err(NotSavableReason::DraftNotJson),
            },
        };
    }

    if expr.sub_expressions.is_empty() {
        return Err(NotSavableReason::NoSubExpressions);
    }

    let subs = &expr.sub_expressions;
    if let Some(index) = subs.iter().position(|s| s.function.is_none()) {
        return Err(NotSavableReason::MissingFunction { index });
    }

    let count = subs.len();
    if count > 1 && expr.operator.is_none() {
        return Err(NotSavableReason::MissingOperator { count });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;
    use serde_json::json;

    fn with_subs(subs: Vec<SubExpression>) -> InternalExpression {
        let mut expr = InternalExpression::new(ExpressionProperty::Hidden);
        expr.sub_expressions = subs;
        expr
    }

    fn equals() -> SubExpression {
        SubExpression {
            function: Some(ExpressionFunction::Equals),
            ..SubExpression::default()
        }
    }

    #[test]
    fn sub_expression_without_function_blocks_saving() {
        let expr = with_subs(vec![SubExpression::default()]);
        assert!(!can_be_saved(&expr));
        assert_eq!(
            check_savable(&expr),
            Err(NotSavableReason::MissingFunction { index: 0 })
        );
    }

    #[test]
    fn function_without_operands_is_savable() {
        assert!(can_be_saved(&with_subs(vec![equals()])));
    }

    #[test]
    fn empty_expression_is_not_savable() {
        assert_eq!(
            check_savable(&InternalExpression::new(ExpressionProperty::Hidden)),
            Err(NotSavableReason::NoSubExpressions)
        );
    }

    #[test]
    fn several_conditions_need_an_operator() {
        let mut expr = with_subs(vec![equals(), equals()]);
        assert_eq!(
            check_savable(&expr),
            Err(NotSavableReason::MissingOperator { count: 2 })
        );
        expr.operator = Some(Operator::And);
        assert!(can_be_saved(&expr));
    }

    #[test]
    fn complex_expressions() {
        let wire = InternalExpression::complex(
            ExpressionProperty::Hidden,
            ComplexExpression::Wire(json!(["concat", ["dataModel", "a"], "b"])),
        );
        assert!(can_be_saved(&wire));

        let object = InternalExpression::complex(
            ExpressionProperty::Hidden,
            ComplexExpression::Wire(json!({"equals": [1, 2]})),
        );
        let malformed = Err(NotSavableReason::MalformedComplex);
        assert_eq!(check_savable(&object), malformed);

        let bad_draft = InternalExpression::complex(
            ExpressionProperty::Hidden,
            ComplexExpression::Draft("[\"equals\", 1".to_string()),
        );
        let not_json = Err(NotSavableReason::DraftNotJson);
        assert_eq!(check_savable(&bad_draft), not_json);

        let healed_draft = InternalExpression::complex(
            ExpressionProperty::Hidden,
            ComplexExpression::Draft("[\"equals\", 1, 2]".to_string()),
        );
        assert!(can_be_saved(&healed_draft));
    }

    #[test]
    fn complex_wins_over_stale_sub_expressions() {
        let mut expr = with_subs(vec![SubExpression::default()]);
        expr.complex_expression = Some(ComplexExpression::Wire(json!(true)));
        assert!(can_be_saved(&expr));
    }
}
