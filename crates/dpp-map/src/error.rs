//! Error types for interactive mapping edits.

use thiserror::Error;

/// Errors from editing a [`MappingState`](crate::MappingState).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MappingError {
    /// Header not present in the loaded CSV.
    #[error("header not found: {0}")]
    HeaderNotFound(String),
    /// Path does not name a schema field once indices are stripped.
    #[error("field not found: {0}")]
    FieldNotFound(String),
    /// Non-array field already bound to another header.
    #[error("field '{field}' is already mapped from header '{header}'")]
    FieldAlreadyMapped { field: String, header: String },
}

impl MappingError {
    /// The header involved, if any.
    pub fn header(&self) -> Option<&str> {
        match self {
            Self::HeaderNotFound(header) => Some(header),
            Self::FieldAlreadyMapped { header, .. } => Some(header),
            Self::FieldNotFound(_) => None,
        }
    }

    /// The field path involved, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::FieldNotFound(field) => Some(field),
            Self::FieldAlreadyMapped { field, .. } => Some(field),
            Self::HeaderNotFound(_) => None,
        }
    }
}
