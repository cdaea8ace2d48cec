//! layout-expr-core: structured editing of layout conditional expressions.
//!
//! Converts between the nested-array wire format stored in form layouts
//! and a flat, dropdown-editable model, and decides which expressions the
//! structured editor can show without loss.
//!
//! # Public API
//!
//! - [`load_for_editing()`] -- wire expression → [`InternalExpression`]
//! - [`commit()`] -- [`InternalExpression`] → wire expression, gated by
//!   [`can_be_saved()`]
//! - [`is_studio_friendly()`] -- can the structured editor show it?
//! - [`edit`] -- pure editing operations on the model
//! - [`layout`] -- locate and write expressions on layout items
//!
//! Nothing here performs I/O or evaluates expressions.

pub mod classify;
pub mod edit;
pub mod error;
pub mod layout;
pub mod model;
pub mod parser;
pub mod serialize;
pub mod validate;

pub use classify::{can_switch_to_structured, is_studio_friendly};
pub use error::{CommitError, FlattenError, LayoutError, NotSavableReason};
pub use model::{
    ComplexExpression, DataSource, ExpressionFunction, ExpressionProperty, InternalExpression,
    LayoutItemKind, OperandSide, OperandValue, Operator, SubExpression,
};
pub use parser::{flatten, try_parse, Flattened};
pub use serialize::to_wire;
pub use validate::{can_be_saved, check_savable};

use serde_json::Value;

/// Start an editing session for the expression stored on `property`.
pub fn load_for_editing(wire: &Value, property: ExpressionProperty) -> InternalExpression {
    try_parse(wire, property)
}

/// Produce the wire expression to persist: [`to_wire`] behind the save
/// gate.
///
/// Callers are expected to check [`can_be_saved`] first; an incomplete
/// expression is rejected with [`CommitError::NotSavable`].
pub fn commit(expr: &InternalExpression) -> Result<Value, CommitError> {
    check_savable(expr).map_err(|reason| CommitError::NotSavable {
        property: expr.property,
        reason,
    })?;
    Ok(to_wire(expr))
}
