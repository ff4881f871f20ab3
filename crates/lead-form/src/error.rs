//! Error types for form handling

use crate::field::{FieldKind, FieldName};

/// Errors raised while manipulating a form snapshot
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// Field name not part of the canonical field list
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// Value kind does not match the field kind
    #[error("field {field} expects a {expected} value")]
    TypeMismatch {
        /// Target field
        field: FieldName,
        /// Kind the field accepts
        expected: FieldKind,
    },

    /// Value is not part of a closed enumeration
    #[error("'{value}' is not a valid {kind}")]
    NotInCatalog {
        /// Enumeration name
        kind: &'static str,
        /// Rejected value
        value: String,
    },
}
