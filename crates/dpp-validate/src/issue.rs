//! Validation issue types.
//!
//! The Issue enum provides type-safe issue creation where each variant
//! carries only its needed data. Issues are advisory; callers decide whether
//! an error blocks record generation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Issue severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    /// Generated records would be incomplete or contradictory.
    Error,
    /// Should review
    Warning,
}

impl Severity {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validation issue - each variant carries only its needed data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Issue {
    /// Required field left unpopulated in a constructed object
    MissingRequired { path: String },
    /// Two members of one oneOf group populated in the same object instance
    OneOfConflict { scope: String, paths: Vec<String> },
    /// Column content cannot populate the field's declared type
    TypeMismatch {
        header: String,
        path: String,
        column_type: String,
        field_type: String,
    },
    /// Values outside the field's enumeration
    InvalidEnum {
        header: String,
        path: String,
        /// Rows carrying an invalid value
        invalid_count: u64,
        /// Distinct invalid values (up to 5)
        samples: Vec<String>,
    },
}

impl Issue {
    /// Field path the issue is about. Conflicts report their first path.
    pub fn path(&self) -> &str {
        match self {
            Issue::MissingRequired { path } => path,
            Issue::OneOfConflict { paths, scope } => {
                paths.first().map_or(scope.as_str(), String::as_str)
            }
            Issue::TypeMismatch { path, .. } => path,
            Issue::InvalidEnum { path, .. } => path,
        }
    }

    /// CSV header involved, if the issue comes from one column.
    pub fn header(&self) -> Option<&str> {
        match self {
            Issue::TypeMismatch { header, .. } | Issue::InvalidEnum { header, .. } => {
                Some(header)
            }
            Issue::MissingRequired { .. } | Issue::OneOfConflict { .. } => None,
        }
    }

    /// Severity for this issue type.
    pub fn severity(&self) -> Severity {
        match self {
            Issue::TypeMismatch { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Format message with issue-specific data.
    pub fn message(&self) -> String {
        match self {
            Issue::MissingRequired { path } => {
                format!("Required field {path} is not mapped")
            }

            Issue::OneOfConflict { scope, paths } => {
                let scope_str = if scope.is_empty() {
                    "the record root".to_string()
                } else {
                    scope.clone()
                };
                format!(
                    "Fields {} are mutually exclusive within {}",
                    paths.join(", "),
                    scope_str
                )
            }

            Issue::TypeMismatch {
                header,
                path,
                column_type,
                field_type,
            } => {
                format!(
                    "Column {header} holds {column_type} values but field {path} expects {field_type}"
                )
            }

            Issue::InvalidEnum {
                header,
                path,
                invalid_count,
                samples,
            } => {
                let sample_str = if samples.is_empty() {
                    String::new()
                } else {
                    format!(" (e.g., {})", samples.join(", "))
                };
                format!(
                    "Column {header} has {invalid_count} values not allowed for {path}{sample_str}"
                )
            }
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity(), self.message())
    }
}
