//! Studio-friendliness classification.

use serde_json::Value;

use crate::model::{ComplexExpression, InternalExpression};
use crate::parser::flatten;

/// Whether the structured editor can represent `wire` without loss.
///
/// Holds exactly when `try_parse` does not fall back to a complex
/// expression, which in turn means `to_wire(try_parse(wire))` returns
/// `wire` unchanged.
pub fn is_studio_friendly(wire: &Value) -> bool {
    flatten(wire).is_ok()
}

/// Whether a model in free-text mode may be switched back to structured
/// editing. Models already in structured mode always can.
pub fn can_switch_to_structured(expr: &InternalExpression) -> bool {
    match &expr.complex_expression {
        None => true,
        Some(ComplexExpression::Wire(value)) => is_studio_friendly(value),
        Some(draft @ ComplexExpression::Draft(_)) => {
            draft.parsed().as_ref().is_some_and(is_studio_friendly)
        }
    }
}
