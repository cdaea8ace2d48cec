//! Typed structs representing the layout expression wire grammar.
//!
//! Only the functions and data sources the structured editor can express
//! are modelled here. The runtime understands many more functions
//! (`concat`, `if`, `contains`, ...); those never decode into these
//! types and are carried around as raw `serde_json::Value` instead.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Function tags ───────────────────────────────────────────────────

/// Head tag of a function call array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FunctionTag {
    #[serde(rename = "and")]
    And,
    #[serde(rename = "or")]
    Or,
    #[serde(rename = "not")]
    Not,
    #[serde(rename = "equals")]
    Equals,
    #[serde(rename = "notEquals")]
    NotEquals,
    #[serde(rename = "greaterThan")]
    GreaterThan,
    /// Serialized as `greaterThanEq`, the spelling the form runtime uses.
    #[serde(rename = "greaterThanEq")]
    GreaterThanEquals,
    #[serde(rename = "lessThan")]
    LessThan,
    /// Serialized as `lessThanEq`, the spelling the form runtime uses.
    #[serde(rename = "lessThanEq")]
    LessThanEquals,
}

impl FunctionTag {
    pub const ALL: [FunctionTag; 9] = [
        FunctionTag::And,
        FunctionTag::Or,
        FunctionTag::Not,
        FunctionTag::Equals,
        FunctionTag::NotEquals,
        FunctionTag::GreaterThan,
        FunctionTag::GreaterThanEquals,
        FunctionTag::LessThan,
        FunctionTag::LessThanEquals,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FunctionTag::And => "and",
            FunctionTag::Or => "or",
            FunctionTag::Not => "not",
            FunctionTag::Equals => "equals",
            FunctionTag::NotEquals => "notEquals",
            FunctionTag::GreaterThan => "greaterThan",
            FunctionTag::GreaterThanEquals => "greaterThanEq",
            FunctionTag::LessThan => "lessThan",
            FunctionTag::LessThanEquals => "lessThanEq",
        }
    }

    /// Look up a tag by its wire spelling.
    pub fn from_tag(tag: &str) -> Option<FunctionTag> {
        FunctionTag::ALL.into_iter().find(|f| f.as_str() == tag)
    }

    /// `and` / `or`.
    pub fn is_logical(self) -> bool {
        matches!(self, FunctionTag::And | FunctionTag::Or)
    }

    /// Binary comparison functions (everything except `and`, `or`, `not`).
    pub fn is_comparison(self) -> bool {
        !self.is_logical() && self != FunctionTag::Not
    }

    pub fn arity(self) -> Arity {
        match self {
            FunctionTag::And | FunctionTag::Or => Arity::AtLeast(1),
            FunctionTag::Not => Arity::Exactly(1),
            _ => Arity::Exactly(2),
        }
    }
}

impl fmt::Display for FunctionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of operands a function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, operands: usize) -> bool {
        match self {
            Arity::Exactly(n) => operands == n,
            Arity::AtLeast(n) => operands >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "exactly {}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

// ── Data source tags ────────────────────────────────────────────────

/// Head tag of a data reference array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataSourceTag {
    DataModel,
    Component,
    InstanceContext,
    ApplicationSettings,
}

impl DataSourceTag {
    pub const ALL: [DataSourceTag; 4] = [
        DataSourceTag::DataModel,
        DataSourceTag::Component,
        DataSourceTag::InstanceContext,
        DataSourceTag::ApplicationSettings,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DataSourceTag::DataModel => "dataModel",
            DataSourceTag::Component => "component",
            DataSourceTag::InstanceContext => "instanceContext",
            DataSourceTag::ApplicationSettings => "applicationSettings",
        }
    }

    pub fn from_tag(tag: &str) -> Option<DataSourceTag> {
        DataSourceTag::ALL.into_iter().find(|d| d.as_str() == tag)
    }
}

impl fmt::Display for DataSourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Literals ────────────────────────────────────────────────────────

/// A scalar JSON value used directly as an operand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

impl Literal {
    /// Returns `None` for arrays and objects.
    pub fn from_json(value: &Value) -> Option<Literal> {
        match value {
            Value::Null => Some(Literal::Null),
            Value::Bool(b) => Some(Literal::Bool(*b)),
            Value::Number(n) => Some(Literal::Number(n.clone())),
            Value::String(s) => Some(Literal::String(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Literal::Null => Value::Null,
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Number(n) => Value::Number(n.clone()),
            Literal::String(s) => Value::String(s.clone()),
        }
    }

    /// JSON type name of the literal (`"null"`, `"boolean"`, `"number"`, `"string"`).
    pub fn type_name(&self) -> &'static str {
        match self {
            Literal::Null => "null",
            Literal::Bool(_) => "boolean",
            Literal::Number(_) => "number",
            Literal::String(_) => "string",
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => f.write_str("null"),
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Number(n) => write!(f, "{}", n),
            Literal::String(s) => f.write_str(s),
        }
    }
}

// ── Expression tree ─────────────────────────────────────────────────

/// `[source, ...args]`, e.g. `["component", "chk1"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataReference {
    pub source: DataSourceTag,
    /// One or two identifying strings (field path, component id, key).
    pub args: Vec<String>,
}

impl DataReference {
    pub fn to_json(&self) -> Value {
        let mut items = Vec::with_capacity(self.args.len() + 1);
        items.push(Value::String(self.source.as_str().to_owned()));
        items.extend(self.args.iter().cloned().map(Value::String));
        Value::Array(items)
    }
}

/// `[function, ...operands]`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub function: FunctionTag,
    pub operands: Vec<WireExpression>,
}

impl FunctionCall {
    pub fn to_json(&self) -> Value {
        let mut items = Vec::with_capacity(self.operands.len() + 1);
        items.push(Value::String(self.function.as_str().to_owned()));
        items.extend(self.operands.iter().map(WireExpression::to_json));
        Value::Array(items)
    }
}

/// A decoded wire expression.
#[derive(Debug, Clone, PartialEq)]
pub enum WireExpression {
    Literal(Literal),
    Reference(DataReference),
    Call(FunctionCall),
}

impl WireExpression {
    /// Encode back into the nested-array JSON form.
    pub fn to_json(&self) -> Value {
        match self {
            WireExpression::Literal(lit) => lit.to_json(),
            WireExpression::Reference(r) => r.to_json(),
            WireExpression::Call(call) => call.to_json(),
        }
    }

    pub fn as_call(&self) -> Option<&FunctionCall> {
        match self {
            WireExpression::Call(call) => Some(call),
            _ => None,
        }
    }
}

impl fmt::Display for WireExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}
