//! Editable expression model.
//!
//! An [`InternalExpression`] is what the structured editor works on: one
//! layout property, an optional combinator and a flat list of leaf
//! comparisons. Anything the editor cannot represent lives in
//! [`ComplexExpression`] instead, which wins over the sub-expressions
//! whenever it is set.

use std::fmt;
use std::str::FromStr;

use layout_expr_interchange::{DataSourceTag, FunctionTag, Literal};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ── Properties ──────────────────────────────────────────────────────

/// Kind of layout item an expression is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutItemKind {
    Component,
    Container,
}

/// Layout property that holds a dynamic expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExpressionProperty {
    #[serde(rename = "hidden")]
    Hidden,
    #[serde(rename = "required")]
    Required,
    #[serde(rename = "readOnly")]
    ReadOnly,
    #[serde(rename = "edit.addButton")]
    EditAddButton,
    #[serde(rename = "edit.deleteButton")]
    EditDeleteButton,
    #[serde(rename = "edit.saveButton")]
    EditSaveButton,
    #[serde(rename = "edit.saveAndNextButton")]
    EditSaveAndNextButton,
}

const COMPONENT_PROPERTIES: &[ExpressionProperty] = &[
    ExpressionProperty::Hidden,
    ExpressionProperty::Required,
    ExpressionProperty::ReadOnly,
];

const CONTAINER_PROPERTIES: &[ExpressionProperty] = &[
    ExpressionProperty::Hidden,
    ExpressionProperty::Required,
    ExpressionProperty::ReadOnly,
    ExpressionProperty::EditAddButton,
    ExpressionProperty::EditDeleteButton,
    ExpressionProperty::EditSaveButton,
    ExpressionProperty::EditSaveAndNextButton,
];

impl ExpressionProperty {
    pub const ALL: [ExpressionProperty; 7] = [
        ExpressionProperty::Hidden,
        ExpressionProperty::Required,
        ExpressionProperty::ReadOnly,
        ExpressionProperty::EditAddButton,
        ExpressionProperty::EditDeleteButton,
        ExpressionProperty::EditSaveButton,
        ExpressionProperty::EditSaveAndNextButton,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ExpressionProperty::Hidden => "hidden",
            ExpressionProperty::Required => "required",
            ExpressionProperty::ReadOnly => "readOnly",
            ExpressionProperty::EditAddButton => "edit.addButton",
            ExpressionProperty::EditDeleteButton => "edit.deleteButton",
            ExpressionProperty::EditSaveButton => "edit.saveButton",
            ExpressionProperty::EditSaveAndNextButton => "edit.saveAndNextButton",
        }
    }

    pub fn from_tag(tag: &str) -> Option<ExpressionProperty> {
        ExpressionProperty::ALL
            .into_iter()
            .find(|p| p.as_str() == tag)
    }

    /// Key inside a container's `edit` object, for the `edit.*` properties.
    pub fn edit_key(self) -> Option<&'static str> {
        self.as_str().strip_prefix("edit.")
    }

    /// Properties that may carry an expression on the given item kind.
    pub fn for_item(kind: LayoutItemKind) -> &'static [ExpressionProperty] {
        match kind {
            LayoutItemKind::Component => COMPONENT_PROPERTIES,
            LayoutItemKind::Container => CONTAINER_PROPERTIES,
        }
    }
}

impl fmt::Display for ExpressionProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpressionProperty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExpressionProperty::from_tag(s).ok_or_else(|| {
            let known = ExpressionProperty::ALL.map(ExpressionProperty::as_str);
            let known = known.join(", ");
            format!("unknown expression property '{s}' (expected one of: {known})")
        })
    }
}

// ── Tags used by the editor ─────────────────────────────────────────

/// Combinator joining more than one sub-expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    And,
    Or,
}

impl Operator {
    pub fn tag(self) -> FunctionTag {
        match self {
            Operator::And => FunctionTag::And,
            Operator::Or => FunctionTag::Or,
        }
    }

    pub fn from_tag(tag: FunctionTag) -> Option<Operator> {
        match tag {
            FunctionTag::And => Some(Operator::And),
            FunctionTag::Or => Some(Operator::Or),
            _ => None,
        }
    }
}

/// Function of a single sub-expression. `and`/`or` are deliberately absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpressionFunction {
    #[serde(rename = "equals")]
    Equals,
    #[serde(rename = "notEquals")]
    NotEquals,
    #[serde(rename = "greaterThan")]
    GreaterThan,
    #[serde(rename = "greaterThanEq")]
    GreaterThanEquals,
    #[serde(rename = "lessThan")]
    LessThan,
    #[serde(rename = "lessThanEq")]
    LessThanEquals,
    #[serde(rename = "not")]
    Not,
}

impl ExpressionFunction {
    pub fn tag(self) -> FunctionTag {
        match self {
            ExpressionFunction::Equals => FunctionTag::Equals,
            ExpressionFunction::NotEquals => FunctionTag::NotEquals,
            ExpressionFunction::GreaterThan => FunctionTag::GreaterThan,
            ExpressionFunction::GreaterThanEquals => FunctionTag::GreaterThanEquals,
            ExpressionFunction::LessThan => FunctionTag::LessThan,
            ExpressionFunction::LessThanEquals => FunctionTag::LessThanEquals,
            ExpressionFunction::Not => FunctionTag::Not,
        }
    }

    pub fn from_tag(tag: FunctionTag) -> Option<ExpressionFunction> {
        match tag {
            FunctionTag::Equals => Some(ExpressionFunction::Equals),
            FunctionTag::NotEquals => Some(ExpressionFunction::NotEquals),
            FunctionTag::GreaterThan => Some(ExpressionFunction::GreaterThan),
            FunctionTag::GreaterThanEquals => Some(ExpressionFunction::GreaterThanEquals),
            FunctionTag::LessThan => Some(ExpressionFunction::LessThan),
            FunctionTag::LessThanEquals => Some(ExpressionFunction::LessThanEquals),
            FunctionTag::Not => Some(ExpressionFunction::Not),
            FunctionTag::And | FunctionTag::Or => None,
        }
    }

    /// `not` has no comparable operand.
    pub fn is_unary(self) -> bool {
        self == ExpressionFunction::Not
    }
}

/// Kind of an operand: a data reference, or a literal of a JSON type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataSource {
    DataModel,
    Component,
    InstanceContext,
    ApplicationSettings,
    String,
    Number,
    Boolean,
    Null,
}

impl DataSource {
    pub fn reference_tag(self) -> Option<DataSourceTag> {
        match self {
            DataSource::DataModel => Some(DataSourceTag::DataModel),
            DataSource::Component => Some(DataSourceTag::Component),
            DataSource::InstanceContext => Some(DataSourceTag::InstanceContext),
            DataSource::ApplicationSettings => Some(DataSourceTag::ApplicationSettings),
            DataSource::String | DataSource::Number | DataSource::Boolean | DataSource::Null => {
                None
            }
        }
    }

    pub fn is_reference(self) -> bool {
        self.reference_tag().is_some()
    }

    pub fn from_reference(tag: DataSourceTag) -> DataSource {
        match tag {
            DataSourceTag::DataModel => DataSource::DataModel,
            DataSourceTag::Component => DataSource::Component,
            DataSourceTag::InstanceContext => DataSource::InstanceContext,
            DataSourceTag::ApplicationSettings => DataSource::ApplicationSettings,
        }
    }

    pub fn for_literal(lit: &Literal) -> DataSource {
        match lit {
            Literal::Null => DataSource::Null,
            Literal::Bool(_) => DataSource::Boolean,
            Literal::Number(_) => DataSource::Number,
            Literal::String(_) => DataSource::String,
        }
    }
}

// ── Expression model ────────────────────────────────────────────────

/// Concrete value of one operand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OperandValue {
    Literal(Literal),
    /// Arguments of a data reference, e.g. `["age"]` for `["dataModel", "age"]`.
    Reference(Vec<String>),
}

impl fmt::Display for OperandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperandValue::Literal(lit) => write!(f, "{}", lit),
            OperandValue::Reference(args) => f.write_str(&args.join("/")),
        }
    }
}

/// Which operand of a sub-expression an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandSide {
    Left,
    Comparable,
}

/// One leaf comparison. Every field is optional while the user is editing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubExpression {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<ExpressionFunction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<DataSource>,
    #[serde(default, deserialize_with = "present_operand")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<OperandValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparable_data_source: Option<DataSource>,
    #[serde(default, deserialize_with = "present_operand")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparable_value: Option<OperandValue>,
}

/// A present operand field is always `Some`, so an explicit `null` reads
/// back as the null literal. Absent fields fall back to `None`.
fn present_operand<'de, D>(deserializer: D) -> Result<Option<OperandValue>, D::Error>
where
    D: Deserializer<'de>,
{
    OperandValue::deserialize(deserializer).map(Some)
}

impl SubExpression {
    pub fn data_source(&self, side: OperandSide) -> Option<DataSource> {
        match side {
            OperandSide::Left => self.data_source,
            OperandSide::Comparable => self.comparable_data_source,
        }
    }

    pub fn value(&self, side: OperandSide) -> Option<&OperandValue> {
        match side {
            OperandSide::Left => self.value.as_ref(),
            OperandSide::Comparable => self.comparable_value.as_ref(),
        }
    }

    pub(crate) fn slots_mut(
        &mut self,
        side: OperandSide,
    ) -> (&mut Option<DataSource>, &mut Option<OperandValue>) {
        let SubExpression {
            data_source,
            value,
            comparable_data_source,
            comparable_value,
            ..
        } = self;
        match side {
            OperandSide::Left => (data_source, value),
            OperandSide::Comparable => (comparable_data_source, comparable_value),
        }
    }
}

/// Expression the structured editor cannot represent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexExpression {
    /// A parsed JSON value, stored verbatim.
    Wire(Value),
    /// Free text that is not (yet) valid JSON.
    Draft(String),
}

impl ComplexExpression {
    /// Parse free text typed by the user. Invalid JSON is kept as a draft.
    pub fn from_text(text: &str) -> ComplexExpression {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => ComplexExpression::Wire(value),
            Err(_) => ComplexExpression::Draft(text.to_string()),
        }
    }

    /// The JSON value, parsing a draft if it has become valid JSON since.
    pub fn parsed(&self) -> Option<Value> {
        match self {
            ComplexExpression::Wire(value) => Some(value.clone()),
            ComplexExpression::Draft(text) => serde_json::from_str(text).ok(),
        }
    }
}

/// The editable expression bound to one layout property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalExpression {
    pub property: ExpressionProperty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_expressions: Vec<SubExpression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complex_expression: Option<ComplexExpression>,
}

impl InternalExpression {
    /// Fresh expression with no conditions.
    pub fn new(property: ExpressionProperty) -> Self {
        InternalExpression {
            property,
            operator: None,
            sub_expressions: Vec::new(),
            complex_expression: None,
        }
    }

    pub fn complex(property: ExpressionProperty, complex: ComplexExpression) -> Self {
        InternalExpression {
            property,
            operator: None,
            sub_expressions: Vec::new(),
            complex_expression: Some(complex),
        }
    }

    pub fn is_complex(&self) -> bool {
        self.complex_expression.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn property_tags_and_edit_keys() {
        for p in ExpressionProperty::ALL {
            assert_eq!(ExpressionProperty::from_tag(p.as_str()), Some(p));
        }
        let add = ExpressionProperty::EditAddButton;
        assert_eq!(add.edit_key(), Some("addButton"));
        assert_eq!(ExpressionProperty::Hidden.edit_key(), None);
        assert!("visible".parse::<ExpressionProperty>().is_err());
        assert_eq!(
            "readOnly".parse::<ExpressionProperty>(),
            Ok(ExpressionProperty::ReadOnly)
        );
    }

    #[test]
    fn item_kinds_restrict_properties() {
        let component = ExpressionProperty::for_item(LayoutItemKind::Component);
        assert_eq!(component.len(), 3);
        assert!(!component.contains(&ExpressionProperty::EditSaveButton));
        let container = ExpressionProperty::for_item(LayoutItemKind::Container);
        assert!(container.contains(&ExpressionProperty::EditSaveButton));
    }

    #[test]
    fn function_tags_exclude_combinators() {
        assert_eq!(ExpressionFunction::from_tag(FunctionTag::And), None);
        assert_eq!(
            ExpressionFunction::from_tag(FunctionTag::LessThanEquals),
            Some(ExpressionFunction::LessThanEquals)
        );
        assert_eq!(Operator::from_tag(FunctionTag::Not), None);
        assert_eq!(Operator::Or.tag(), FunctionTag::Or);
    }

    #[test]
    fn data_source_mapping() {
        let source = DataSource::from_reference(DataSourceTag::InstanceContext);
        assert_eq!(source.reference_tag(), Some(DataSourceTag::InstanceContext));
        assert!(!DataSource::Boolean.is_reference());
        assert_eq!(DataSource::for_literal(&Literal::Null), DataSource::Null);
    }

    #[test]
    fn complex_text_is_parsed_or_kept() {
        assert_eq!(
            ComplexExpression::from_text(r#"["equals", 1, 1]"#),
            ComplexExpression::Wire(json!(["equals", 1, 1]))
        );
        let draft = ComplexExpression::from_text(r#"["equals", 1"#);
        let text = r#"["equals", 1"#.to_string();
        assert_eq!(draft, ComplexExpression::Draft(text));
        assert_eq!(draft.parsed(), None);
    }

    #[test]
    fn internal_expression_serde_shape() {
        let expr = InternalExpression {
            property: ExpressionProperty::Hidden,
            operator: None,
            sub_expressions: vec![SubExpression {
                function: Some(ExpressionFunction::GreaterThanEquals),
                data_source: Some(DataSource::DataModel),
                value: Some(OperandValue::Reference(vec!["age".to_string()])),
                comparable_data_source: Some(DataSource::Number),
                comparable_value: Some(OperandValue::Literal(Literal::Number(18.into()))),
            }],
            complex_expression: None,
        };
        let v = serde_json::to_value(&expr).unwrap();
        assert_eq!(
            v,
            json!({
                "property": "hidden",
                "subExpressions": [{
                    "function": "greaterThanEq",
                    "dataSource": "dataModel",
                    "value": ["age"],
                    "comparableDataSource": "number",
                    "comparableValue": 18
                }]
            })
        );
        let back: InternalExpression = serde_json::from_value(v).unwrap();
        assert_eq!(back, expr);
    }

    #[test]
    fn explicit_null_operand_survives_serde() {
        let wire = json!(["equals", ["component", "a"], null]);
        let expr = crate::load_for_editing(&wire, ExpressionProperty::Hidden);
        let null = Some(OperandValue::Literal(Literal::Null));
        assert_eq!(expr.sub_expressions[0].comparable_value, null);

        let v = serde_json::to_value(&expr).unwrap();
        assert_eq!(v["subExpressions"][0]["comparableValue"], Value::Null);
        let back: InternalExpression = serde_json::from_value(v).unwrap();
        assert_eq!(back, expr);
    }

    #[test]
    fn missing_operand_stays_absent() {
        let only_function = json!({"function": "not"});
        let sub: SubExpression = serde_json::from_value(only_function).unwrap();
        assert_eq!(sub.value, None);
        assert_eq!(sub.comparable_value, None);
    }

    #[test]
    fn complex_serde_is_explicitly_tagged() {
        let expr = InternalExpression::complex(
            ExpressionProperty::Required,
            ComplexExpression::Draft("[\"equals\"".to_string()),
        );
        let v = serde_json::to_value(&expr).unwrap();
        assert_eq!(
            v,
            json!({"property": "required", "complexExpression": {"draft": "[\"equals\""}})
        );
    }
}
