//! Decoding from wire JSON into typed expressions.
//!
//! The main entry point is [`from_wire`], which takes a
//! `&serde_json::Value` and produces a [`WireExpression`]. Decoding is
//! strict: unknown functions, wrong arity and malformed references are
//! errors. [`is_well_formed`] is the permissive counterpart used for
//! expressions the editor only carries as opaque JSON.

use std::fmt;

use serde_json::Value;

use crate::types::*;

/// Errors during strict wire decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// An object appeared where an expression was expected.
    NotAnExpression { found: String },
    /// `[]`.
    EmptyCall,
    /// The head of an array is not a string.
    NonStringHead { found: String },
    /// The head names a function outside the supported grammar.
    UnknownFunction { name: String },
    /// A supported function with the wrong number of operands.
    Arity {
        function: FunctionTag,
        expected: Arity,
        found: usize,
    },
    /// A data reference whose arguments are not one or two strings.
    InvalidReference {
        source: DataSourceTag,
        message: String,
    },
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireError::NotAnExpression { found } => write!(f, "not an expression: {}", found),
            WireError::EmptyCall => write!(f, "empty expression array"),
            WireError::NonStringHead { found } => {
                write!(f, "expression head must be a string, got {}", found)
            }
            WireError::UnknownFunction { name } => write!(f, "unsupported function '{}'", name),
            WireError::Arity {
                function,
                expected,
                found,
            } => write!(f, "'{function}' takes {expected} operand(s), got {found}"),
            WireError::InvalidReference { source, message } => {
                write!(f, "invalid '{}' reference: {}", source, message)
            }
        }
    }
}

impl std::error::Error for WireError {}

/// Decode a wire expression into the typed grammar.
pub fn from_wire(value: &Value) -> Result<WireExpression, WireError> {
    if let Some(lit) = Literal::from_json(value) {
        return Ok(WireExpression::Literal(lit));
    }

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(WireError::NotAnExpression {
                found: json_kind(other).to_string(),
            });
        }
    };

    let (head, rest) = items.split_first().ok_or(WireError::EmptyCall)?;
    let tag = head.as_str().ok_or_else(|| WireError::NonStringHead {
        found: json_kind(head).to_string(),
    })?;

    if let Some(source) = DataSourceTag::from_tag(tag) {
        return parse_reference(source, rest).map(WireExpression::Reference);
    }

    let function = FunctionTag::from_tag(tag).ok_or_else(|| WireError::UnknownFunction {
        name: tag.to_string(),
    })?;

    let expected = function.arity();
    if !expected.accepts(rest.len()) {
        return Err(WireError::Arity {
            function,
            expected,
            found: rest.len(),
        });
    }

    let operands = rest.iter().map(from_wire).collect::<Result<Vec<_>, _>>()?;
    Ok(WireExpression::Call(FunctionCall { function, operands }))
}

fn parse_reference(source: DataSourceTag, args: &[Value]) -> Result<DataReference, WireError> {
    if args.is_empty() || args.len() > 2 {
        return Err(WireError::InvalidReference {
            source,
            message: format!("expected 1 or 2 arguments, got {}", args.len()),
        });
    }

    let args = args
        .iter()
        .map(|a| {
            a.as_str()
                .map(|s| s.to_string())
                .ok_or_else(|| WireError::InvalidReference {
                    source,
                    message: format!("arguments must be strings, got {}", json_kind(a)),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DataReference { source, args })
}

/// Permissive structural check for any expression the runtime could accept.
///
/// Literals are well-formed. Arrays must be non-empty with a string head
/// and every nested array must itself be well-formed. Objects never are.
/// Function names are not checked.
pub fn is_well_formed(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => true,
        Value::Object(_) => false,
        Value::Array(items) => match items.split_first() {
            Some((Value::String(_), rest)) => rest.iter().all(|v| match v {
                Value::Object(_) => false,
                Value::Array(_) => is_well_formed(v),
                _ => true,
            }),
            _ => false,
        },
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
