//! Editing operations on the expression model.
//!
//! Every function takes the current value by reference and returns a new
//! one, so a UI layer can detect changes by comparison. Invalid calls
//! (e.g. an index past the end) return the input unchanged.

use layout_expr_interchange::Literal;
use serde_json::Value;
use tracing::trace;

use crate::model::*;
use crate::parser::try_parse;

// ── Expression-level operations ─────────────────────────────────────

/// Append an empty condition. Sets `operator` when this creates the
/// second condition and none was chosen yet.
pub fn add_sub_expression(expr: &InternalExpression, operator: Operator) -> InternalExpression {
    let mut next = expr.clone();
    next.sub_expressions.push(SubExpression::default());
    if next.sub_expressions.len() > 1 && next.operator.is_none() {
        next.operator = Some(operator);
    }
    next
}

/// Remove the first condition equal to `target`.
pub fn remove_sub_expression(
    expr: &InternalExpression,
    target: &SubExpression,
) -> InternalExpression {
    match expr.sub_expressions.iter().position(|s| s == target) {
        Some(index) => remove_sub_expression_at(expr, index),
        None => {
            trace!("remove_sub_expression: no matching condition");
            expr.clone()
        }
    }
}

/// Remove the condition at `index`. Clears `operator` once at most one
/// condition is left.
pub fn remove_sub_expression_at(expr: &InternalExpression, index: usize) -> InternalExpression {
    let mut next = expr.clone();
    if index >= next.sub_expressions.len() {
        trace!(index, "remove_sub_expression_at: index out of range");
        return next;
    }
    next.sub_expressions.remove(index);
    if next.sub_expressions.len() <= 1 {
        next.operator = None;
    }
    next
}

pub fn update_operator(expr: &InternalExpression, operator: Operator) -> InternalExpression {
    InternalExpression {
        operator: Some(operator),
        ..expr.clone()
    }
}

/// Replace the condition at `index`, leaving the others untouched.
pub fn update_sub_expression_at(
    expr: &InternalExpression,
    index: usize,
    sub: SubExpression,
) -> InternalExpression {
    let mut next = expr.clone();
    match next.sub_expressions.get_mut(index) {
        Some(slot) => *slot = sub,
        None => trace!(index, "update_sub_expression_at: index out of range"),
    }
    next
}

/// Point the expression at another layout property.
pub fn update_property(
    expr: &InternalExpression,
    property: ExpressionProperty,
) -> InternalExpression {
    InternalExpression {
        property,
        ..expr.clone()
    }
}

/// Store free text typed in the complex editor. Text that parses as JSON
/// is kept as a value, anything else verbatim as a draft.
pub fn set_complex_expression(expr: &InternalExpression, raw: &str) -> InternalExpression {
    InternalExpression {
        complex_expression: Some(ComplexExpression::from_text(raw)),
        ..expr.clone()
    }
}

/// Store an already parsed value as the complex expression.
pub fn set_complex_wire(expr: &InternalExpression, value: Value) -> InternalExpression {
    InternalExpression {
        complex_expression: Some(ComplexExpression::Wire(value)),
        ..expr.clone()
    }
}

/// Leave free-text mode by re-deriving the conditions from the complex
/// expression. A value the editor cannot represent comes back as the
/// same complex expression; an unparseable draft is left as it is.
pub fn clear_complex_expression(expr: &InternalExpression) -> InternalExpression {
    let Some(complex) = &expr.complex_expression else {
        return expr.clone();
    };
    match complex.parsed() {
        Some(value) => try_parse(&value, expr.property),
        None => {
            trace!(property = %expr.property, "draft is not valid JSON");
            expr.clone()
        }
    }
}

// ── Condition-level operations ──────────────────────────────────────

/// Set or clear the function of a condition. Operands are kept.
pub fn with_function(sub: &SubExpression, function: Option<ExpressionFunction>) -> SubExpression {
    SubExpression {
        function,
        ..sub.clone()
    }
}

/// Choose the data source of one operand.
///
/// Clearing the source clears the value too. Re-selecting the current
/// source resets the value. Choosing `Boolean` preselects `true`; any
/// other new source starts without a value.
pub fn with_data_source(
    sub: &SubExpression,
    side: OperandSide,
    source: Option<DataSource>,
) -> SubExpression {
    let mut next = sub.clone();
    let current = sub.data_source(side);
    let (slot_source, slot_value) = next.slots_mut(side);
    match source {
        None => {
            *slot_source = None;
            *slot_value = None;
        }
        Some(source) if current == Some(source) => {
            *slot_value = None;
        }
        Some(source) => {
            *slot_source = Some(source);
            *slot_value = match source {
                DataSource::Boolean => Some(OperandValue::Literal(Literal::Bool(true))),
                _ => None,
            };
        }
    }
    next
}

/// Set the value of one operand from the text a dropdown or input produced,
/// converted according to the operand's data source.
pub fn with_data_source_value(
    sub: &SubExpression,
    side: OperandSide,
    text: Option<&str>,
) -> SubExpression {
    let mut next = sub.clone();
    let source = sub.data_source(side);
    let (_, slot_value) = next.slots_mut(side);
    *slot_value = text.and_then(|text| convert_value(source, text));
    next
}

fn convert_value(source: Option<DataSource>, text: &str) -> Option<OperandValue> {
    let literal = match source {
        Some(DataSource::Boolean) => Literal::Bool(text == "true"),
        Some(DataSource::Number) => Literal::Number(parse_number(text)?),
        Some(DataSource::Null) => Literal::Null,
        Some(source) if source.is_reference() => {
            return Some(OperandValue::Reference(vec![text.to_string()]));
        }
        _ => Literal::String(text.to_string()),
    };
    Some(OperandValue::Literal(literal))
}

fn parse_number(text: &str) -> Option<serde_json::Number> {
    let text = text.trim();
    if let Ok(n) = text.parse::<i64>() {
        return Some(n.into());
    }
    text.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
}

/// Human-readable operand value for dropdown labels.
pub fn display_value(value: Option<&OperandValue>) -> String {
    match value {
        None => "null".to_string(),
        Some(value) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lit(v: Value) -> Option<OperandValue> {
        Literal::from_json(&v).map(OperandValue::Literal)
    }

    fn component_equals_string() -> SubExpression {
        SubExpression {
            function: Some(ExpressionFunction::Equals),
            data_source: Some(DataSource::Component),
            value: Some(OperandValue::Reference(vec!["comp-1".to_string()])),
            comparable_data_source: Some(DataSource::String),
            comparable_value: lit(json!("yes")),
        }
    }

    fn set_comparable(sub: &SubExpression, text: Option<&str>) -> Option<OperandValue> {
        let next = with_data_source_value(sub, OperandSide::Comparable, text);
        next.comparable_value
    }

    fn two_conditions() -> InternalExpression {
        let mut expr = InternalExpression::new(ExpressionProperty::Hidden);
        expr.operator = Some(Operator::Or);
        expr.sub_expressions = vec![
            component_equals_string(),
            with_function(&SubExpression::default(), Some(ExpressionFunction::Not)),
        ];
        expr
    }

    #[test]
    fn first_added_condition_has_no_operator() {
        let empty = InternalExpression::new(ExpressionProperty::Hidden);
        let expr = add_sub_expression(&empty, Operator::Or);
        assert_eq!(expr.sub_expressions, vec![SubExpression::default()]);
        assert_eq!(expr.operator, None);
    }

    #[test]
    fn second_added_condition_sets_operator() {
        let empty = InternalExpression::new(ExpressionProperty::Hidden);
        let one = add_sub_expression(&empty, Operator::Or);
        let two = add_sub_expression(&one, Operator::And);
        assert_eq!(two.sub_expressions.len(), 2);
        assert_eq!(two.operator, Some(Operator::And));
        let three = add_sub_expression(&two, Operator::Or);
        assert_eq!(three.operator, Some(Operator::And));
    }

    #[test]
    fn removing_down_to_one_condition_clears_operator() {
        let expr = two_conditions();
        let removed = remove_sub_expression(&expr, &expr.sub_expressions[1]);
        assert_eq!(removed.sub_expressions, vec![component_equals_string()]);
        assert_eq!(removed.operator, None);
    }

    #[test]
    fn removing_from_three_keeps_operator() {
        let expr = add_sub_expression(&two_conditions(), Operator::And);
        let removed = remove_sub_expression_at(&expr, 2);
        assert_eq!(removed.operator, Some(Operator::Or));
        assert_eq!(removed.sub_expressions, two_conditions().sub_expressions);
    }

    #[test]
    fn removing_missing_condition_is_a_no_op() {
        let expr = two_conditions();
        let empty = SubExpression::default();
        let target = with_function(&empty, Some(ExpressionFunction::LessThan));
        assert_eq!(remove_sub_expression(&expr, &target), expr);
        assert_eq!(remove_sub_expression_at(&expr, 9), expr);
    }

    #[test]
    fn update_at_index_replaces_only_that_entry() {
        let expr = two_conditions();
        let empty = SubExpression::default();
        let replacement = with_function(&empty, Some(ExpressionFunction::GreaterThan));
        let updated = update_sub_expression_at(&expr, 1, replacement.clone());
        assert_eq!(updated.sub_expressions[0], expr.sub_expressions[0]);
        assert_eq!(updated.sub_expressions[1], replacement);
        let untouched = &expr.sub_expressions[1];
        assert_eq!(untouched.function, Some(ExpressionFunction::Not));
        assert_eq!(update_sub_expression_at(&expr, 5, empty), expr);
    }

    #[test]
    fn operator_and_property_updates() {
        let expr = two_conditions();
        let and = update_operator(&expr, Operator::And);
        assert_eq!(and.operator, Some(Operator::And));
        let moved = update_property(&expr, ExpressionProperty::Required);
        assert_eq!(moved.property, ExpressionProperty::Required);
        assert_eq!(moved.sub_expressions, expr.sub_expressions);
    }

    #[test]
    fn complex_text_round_trip_through_modes() {
        let expr = InternalExpression::new(ExpressionProperty::Hidden);

        let draft = set_complex_expression(&expr, "[\"equals\", 1");
        assert_eq!(
            draft.complex_expression,
            Some(ComplexExpression::Draft("[\"equals\", 1".to_string()))
        );
        assert_eq!(clear_complex_expression(&draft), draft);

        let typed = set_complex_expression(&draft, "[\"equals\", [\"component\", \"a\"], 1]");
        let structured = clear_complex_expression(&typed);
        assert!(structured.complex_expression.is_none());
        assert_eq!(structured.sub_expressions.len(), 1);
        let left = structured.sub_expressions[0].data_source;
        assert_eq!(left, Some(DataSource::Component));
    }

    #[test]
    fn clearing_unfriendly_complex_keeps_it() {
        let expr = set_complex_wire(
            &InternalExpression::new(ExpressionProperty::Hidden),
            json!(["concat", "a", "b"]),
        );
        let cleared = clear_complex_expression(&expr);
        assert_eq!(cleared.complex_expression, expr.complex_expression);
    }

    #[test]
    fn clearing_combined_complex_restores_operator() {
        let expr = set_complex_wire(
            &InternalExpression::new(ExpressionProperty::Hidden),
            json!(["and", ["equals", 1, 1], ["notEquals", "a", "b"]]),
        );
        let cleared = clear_complex_expression(&expr);
        assert_eq!(cleared.operator, Some(Operator::And));
        assert_eq!(cleared.sub_expressions.len(), 2);
    }

    #[test]
    fn function_can_be_set_and_cleared() {
        let sub = component_equals_string();
        let not = with_function(&sub, Some(ExpressionFunction::Not));
        assert_eq!(not.function, Some(ExpressionFunction::Not));
        assert_eq!(not.value, sub.value);
        assert_eq!(not.comparable_value, sub.comparable_value);
        assert_eq!(with_function(&sub, None).function, None);
    }

    #[test]
    fn data_source_cleared() {
        let sub = component_equals_string();
        let cleared = with_data_source(&sub, OperandSide::Comparable, None);
        assert_eq!(cleared.comparable_data_source, None);
        assert_eq!(cleared.comparable_value, None);
        assert_eq!(cleared.data_source, sub.data_source);
        assert_eq!(cleared.value, sub.value);

        let cleared = with_data_source(&sub, OperandSide::Left, None);
        assert_eq!(cleared.data_source, None);
        assert_eq!(cleared.value, None);
        assert_eq!(cleared.comparable_value, sub.comparable_value);
    }

    #[test]
    fn same_data_source_resets_value() {
        let sub = component_equals_string();
        let reset = with_data_source(&sub, OperandSide::Left, Some(DataSource::Component));
        assert_eq!(reset.data_source, Some(DataSource::Component));
        assert_eq!(reset.value, None);
    }

    #[test]
    fn boolean_source_preselects_true() {
        let sub = component_equals_string();
        let b = with_data_source(&sub, OperandSide::Comparable, Some(DataSource::Boolean));
        assert_eq!(b.comparable_data_source, Some(DataSource::Boolean));
        assert_eq!(b.comparable_value, lit(json!(true)));
        assert_eq!(b.value, sub.value);
    }

    #[test]
    fn other_source_starts_empty() {
        let sub = component_equals_string();
        let n = with_data_source(&sub, OperandSide::Left, Some(DataSource::Number));
        assert_eq!(n.data_source, Some(DataSource::Number));
        assert_eq!(n.value, None);
        assert_eq!(n.comparable_value, sub.comparable_value);
    }

    #[test]
    fn values_are_converted_by_source() {
        let mut sub = component_equals_string();

        assert_eq!(set_comparable(&sub, None), None);

        sub.comparable_data_source = Some(DataSource::Boolean);
        assert_eq!(set_comparable(&sub, Some("true")), lit(json!(true)));
        assert_eq!(set_comparable(&sub, Some("false")), lit(json!(false)));

        sub.comparable_data_source = Some(DataSource::Number);
        assert_eq!(set_comparable(&sub, Some("123.45")), lit(json!(123.45)));
        assert_eq!(set_comparable(&sub, Some("18")), lit(json!(18)));
        assert_eq!(set_comparable(&sub, Some("abc")), None);

        sub.comparable_data_source = Some(DataSource::String);
        assert_eq!(set_comparable(&sub, Some("Kari")), lit(json!("Kari")));

        let updated = with_data_source_value(&sub, OperandSide::Left, Some("comp-2"));
        assert_eq!(
            updated.value,
            Some(OperandValue::Reference(vec!["comp-2".to_string()]))
        );
    }

    #[test]
    fn display_values() {
        assert_eq!(display_value(None), "null");
        assert_eq!(display_value(lit(json!(null)).as_ref()), "null");
        assert_eq!(display_value(lit(json!(true)).as_ref()), "true");
        assert_eq!(display_value(lit(json!(2.5)).as_ref()), "2.5");
        assert_eq!(display_value(lit(json!("abc")).as_ref()), "abc");
        let reference = OperandValue::Reference(vec!["age".to_string(), "model".to_string()]);
        assert_eq!(display_value(Some(&reference)), "age/model");
    }
}
