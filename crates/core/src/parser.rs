//! Wire expression → editor model.
//!
//! The structured editor can only show one combinator over a flat list
//! of leaf comparisons. [`try_parse`] maps a wire expression onto that
//! shape when it fits exactly and otherwise keeps the whole value as a
//! complex expression. There is no partial flattening: either every
//! node maps cleanly or nothing does.

use layout_expr_interchange::{from_wire, FunctionCall, WireExpression};
use serde_json::Value;
use tracing::debug;

use crate::error::FlattenError;
use crate::model::*;

/// The structured part of a successfully flattened expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Flattened {
    pub operator: Option<Operator>,
    pub sub_expressions: Vec<SubExpression>,
}

/// Parse a wire expression for editing. Never fails.
pub fn try_parse(wire: &Value, property: ExpressionProperty) -> InternalExpression {
    match flatten(wire) {
        Ok(flat) => InternalExpression {
            property,
            operator: flat.operator,
            sub_expressions: flat.sub_expressions,
            complex_expression: None,
        },
        Err(reason) => {
            debug!(%property, %reason, "keeping expression as complex");
            InternalExpression::complex(property, ComplexExpression::Wire(wire.clone()))
        }
    }
}

/// Flatten a wire expression, or explain why it cannot be.
pub fn flatten(wire: &Value) -> Result<Flattened, FlattenError> {
    let call = match from_wire(wire)? {
        WireExpression::Call(call) => call,
        other => return Err(not_a_condition(&other)),
    };

    let Some(operator) = Operator::from_tag(call.function) else {
        return Ok(Flattened {
            operator: None,
            sub_expressions: vec![leaf(&call)?],
        });
    };

    if call.operands.len() < 2 {
        return Err(FlattenError::SingleOperand { operator });
    }

    let sub_expressions = call
        .operands
        .iter()
        .map(|operand| match operand {
            WireExpression::Call(inner) => leaf(inner),
            other => Err(not_a_condition(other)),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Flattened {
        operator: Some(operator),
        sub_expressions,
    })
}

/// Map one comparison or `not` call onto a sub-expression.
///
/// Arity has already been checked by the wire decoder.
fn leaf(call: &FunctionCall) -> Result<SubExpression, FlattenError> {
    let Some(function) = ExpressionFunction::from_tag(call.function) else {
        return Err(FlattenError::NestedCombinator {
            function: call.function,
        });
    };

    let mut sub = SubExpression {
        function: Some(function),
        ..SubExpression::default()
    };

    let mut operands = call.operands.iter();
    if let Some(left) = operands.next() {
        let (source, value) = operand(left)?;
        sub.data_source = Some(source);
        sub.value = Some(value);
    }
    if let Some(right) = operands.next() {
        let (source, value) = operand(right)?;
        sub.comparable_data_source = Some(source);
        sub.comparable_value = Some(value);
    }

    Ok(sub)
}

fn operand(expr: &WireExpression) -> Result<(DataSource, OperandValue), FlattenError> {
    match expr {
        WireExpression::Literal(lit) => Ok((
            DataSource::for_literal(lit),
            OperandValue::Literal(lit.clone()),
        )),
        WireExpression::Reference(r) => Ok((
            DataSource::from_reference(r.source),
            OperandValue::Reference(r.args.clone()),
        )),
        WireExpression::Call(call) => Err(FlattenError::NestedCall {
            function: call.function,
        }),
    }
}

fn not_a_condition(expr: &WireExpression) -> FlattenError {
    let found = match expr {
        WireExpression::Literal(_) => "literal",
        WireExpression::Reference(_) => "data reference",
        WireExpression::Call(_) => "function call",
    };
    FlattenError::NotACondition { found }
}
