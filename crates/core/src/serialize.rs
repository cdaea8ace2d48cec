//! Editor model → wire expression.
//!
//! [`to_wire`] is the exact inverse of [`crate::parser::try_parse`] for
//! every expression that parser flattened. Output is deterministic.

use layout_expr_interchange::{DataReference, DataSourceTag, Literal};
use serde_json::Value;

use crate::model::*;

/// Render an internal expression in the wire grammar.
///
/// A complex expression is passed through untouched. A draft renders as
/// its parsed value once it is valid JSON, and as a JSON string before
/// that. One sub-expression renders as a bare call, more than one are
/// wrapped in the operator. Absent operands render as `null`.
pub fn to_wire(expr: &InternalExpression) -> Value {
    if let Some(complex) = &expr.complex_expression {
        return match complex {
            ComplexExpression::Wire(value) => value.clone(),
            ComplexExpression::Draft(text) => complex
                .parsed()
                .unwrap_or_else(|| Value::String(text.clone())),
        };
    }

    match expr.sub_expressions.as_slice() {
        [] => Value::Array(Vec::new()),
        [single] => sub_expression_to_wire(single),
        subs => {
            let head = expr
                .operator
                .map(|op| Value::String(op.tag().as_str().to_owned()))
                .unwrap_or(Value::Null);
            let mut items = Vec::with_capacity(subs.len() + 1);
            items.push(head);
            items.extend(subs.iter().map(sub_expression_to_wire));
            Value::Array(items)
        }
    }
}

/// Render one sub-expression as `[function, left, right]` (`[not, left]`).
pub fn sub_expression_to_wire(sub: &SubExpression) -> Value {
    let head = sub
        .function
        .map(|f| Value::String(f.tag().as_str().to_owned()))
        .unwrap_or(Value::Null);

    let mut items = vec![head, render_operand(sub.data_source, sub.value.as_ref())];
    if !sub.function.is_some_and(ExpressionFunction::is_unary) {
        let comparable = sub.comparable_value.as_ref();
        items.push(render_operand(sub.comparable_data_source, comparable));
    }
    Value::Array(items)
}

fn render_operand(source: Option<DataSource>, value: Option<&OperandValue>) -> Value {
    let (Some(source), Some(value)) = (source, value) else {
        return Value::Null;
    };

    match (source.reference_tag(), value) {
        (None, OperandValue::Literal(lit)) => lit.to_json(),
        (Some(tag), OperandValue::Reference(args)) => reference_to_wire(tag, args),
        // Hand-built models may carry the reference key as a plain string.
        (Some(tag), OperandValue::Literal(Literal::String(key))) => {
            reference_to_wire(tag, std::slice::from_ref(key))
        }
        _ => Value::Null,
    }
}

/// `[source, ...args]`, or `null` when the arguments would not decode as
/// a data reference.
fn reference_to_wire(source: DataSourceTag, args: &[String]) -> Value {
    if args.is_empty() || args.len() > 2 {
        return Value::Null;
    }
    DataReference {
        source,
        args: args.to_vec(),
    }
    .to_json()
}
