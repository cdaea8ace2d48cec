//! layout-expr-interchange: wire grammar for layout conditional expressions.
//!
//! Form layouts store dynamic properties (`hidden`, `required`, ...) as
//! Lisp-like nested JSON arrays, e.g.
//! `["equals", ["dataModel", "age"], 18]`. This crate provides the typed
//! tags and AST for the subset of that language the structured editor
//! understands, a strict decoder from `serde_json::Value` into that AST,
//! and a permissive well-formedness check for everything else the form
//! runtime accepts.
//!
//! Consumers decode with [`from_wire`] and re-encode with
//! [`WireExpression::to_json`]. Values that fail strict decoding are
//! still valid layout content; they are just opaque to the editor.

pub mod deserialize;
pub mod types;

pub use deserialize::{from_wire, is_well_formed, WireError};
pub use types::*;
