use layout_expr_interchange::{FunctionTag, WireError};

use crate::model::{ExpressionProperty, Operator};

/// Why a wire expression could not be flattened into the editor model.
///
/// Not a failure from the caller's point of view: the expression is
/// simply kept as a complex expression.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FlattenError {
    /// Rejected by the strict wire grammar.
    #[error(transparent)]
    Wire(#[from] WireError),
    /// A literal or data reference where a condition was expected.
    #[error("{found} is not a condition")]
    NotACondition { found: &'static str },
    /// `and`/`or` with a single operand would lose its combinator on save.
    #[error("'{}' with a single operand", .operator.tag())]
    SingleOperand { operator: Operator },
    /// `and`/`or` nested below the top level.
    #[error("nested '{function}' cannot be flattened")]
    NestedCombinator { function: FunctionTag },
    /// An operand that is itself a function call.
    #[error("operand '{function}' is a function call, not a value")]
    NestedCall { function: FunctionTag },
}

/// Why an internal expression is not complete enough to persist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotSavableReason {
    #[error("complex expression is not valid JSON")]
    DraftNotJson,
    #[error("complex expression is not a well-formed expression")]
    MalformedComplex,
    #[error("expression has no conditions")]
    NoSubExpressions,
    #[error("condition {index} has no function")]
    MissingFunction { index: usize },
    #[error("{count} conditions but no operator")]
    MissingOperator { count: usize },
}

/// Returned by [`crate::commit`] when the save gate was not checked first.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommitError {
    #[error("expression for '{property}' cannot be saved: {reason}")]
    NotSavable {
        property: ExpressionProperty,
        reason: NotSavableReason,
    },
}

/// Errors while reading or writing expressions on a layout item.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("layout item is not a JSON object")]
    NotAnObject,
    #[error("'edit' on layout item is not a JSON object")]
    EditNotAnObject,
    #[error(transparent)]
    Commit(#[from] CommitError),
}
