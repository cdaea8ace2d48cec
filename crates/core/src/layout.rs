//! Reading and writing expressions on layout items.
//!
//! A layout item is a component or container object from a form layout
//! file. Expressions live directly on the item (`hidden`, `required`,
//! `readOnly`) or, for repeating groups, inside its `edit` object
//! (`edit.addButton` → `item.edit.addButton`). A plain boolean in one of
//! those places is a static setting, not an expression.

use serde_json::{Map, Value};

use crate::error::LayoutError;
use crate::model::{ExpressionProperty, InternalExpression, LayoutItemKind};
use crate::parser::try_parse;

/// Components of a layout document: `data.layout`, or a bare array.
pub fn layout_items(document: &Value) -> &[Value] {
    document
        .pointer("/data/layout")
        .unwrap_or(document)
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

pub fn item_id(item: &Value) -> Option<&str> {
    item.get("id").and_then(Value::as_str)
}

/// Containers are marked by `itemType: "CONTAINER"` or `type: "Group"`.
pub fn item_kind(item: &Value) -> LayoutItemKind {
    let is_container = item.get("itemType").and_then(Value::as_str) == Some("CONTAINER")
        || item.get("type").and_then(Value::as_str) == Some("Group");
    if is_container {
        LayoutItemKind::Container
    } else {
        LayoutItemKind::Component
    }
}

fn raw_property(item: &Value, property: ExpressionProperty) -> Option<&Value> {
    match property.edit_key() {
        Some(key) => item.get("edit")?.get(key),
        None => item.get(property.as_str()),
    }
}

/// Properties present on the item that its kind allows expressions on.
pub fn expression_properties(item: &Value) -> Vec<ExpressionProperty> {
    ExpressionProperty::for_item(item_kind(item))
        .iter()
        .copied()
        .filter(|p| raw_property(item, *p).is_some())
        .collect()
}

/// The stored expression, or `None` when absent or a plain boolean.
pub fn external_expression(item: &Value, property: ExpressionProperty) -> Option<&Value> {
    raw_property(item, property).filter(|v| !v.is_boolean())
}

pub fn properties_with_expression(item: &Value) -> Vec<ExpressionProperty> {
    expression_properties(item)
        .into_iter()
        .filter(|p| external_expression(item, *p).is_some())
        .collect()
}

/// Load every expression on the item for editing.
pub fn load_expressions(item: &Value) -> Vec<InternalExpression> {
    properties_with_expression(item)
        .into_iter()
        .filter_map(|p| external_expression(item, p).map(|wire| try_parse(wire, p)))
        .collect()
}

/// Commit `expr` and write it to its property on a copy of `item`.
pub fn apply_expression(item: &Value, expr: &InternalExpression) -> Result<Value, LayoutError> {
    let wire = crate::commit(expr)?;
    let mut next = item.clone();
    let fields = next.as_object_mut().ok_or(LayoutError::NotAnObject)?;

    match expr.property.edit_key() {
        Some(key) => {
            let edit = fields
                .entry("edit")
                .or_insert_with(|| Value::Object(Map::new()))
                .as_object_mut()
                .ok_or(LayoutError::EditNotAnObject)?;
            edit.insert(key.to_string(), wire);
        }
        None => {
            fields.insert(expr.property.as_str().to_string(), wire);
        }
    }
    Ok(next)
}

/// Remove the property from a copy of `item`. Missing properties are fine.
pub fn remove_expression(item: &Value, property: ExpressionProperty) -> Value {
    let mut next = item.clone();
    match property.edit_key() {
        Some(key) => {
            if let Some(edit) = next.get_mut("edit").and_then(Value::as_object_mut) {
                edit.remove(key);
            }
        }
        None => {
            if let Some(fields) = next.as_object_mut() {
                fields.remove(property.as_str());
            }
        }
    }
    next
}
