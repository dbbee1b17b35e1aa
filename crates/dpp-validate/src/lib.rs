//! Advisory validation of a header-to-field mapping.
//!
//! This crate checks a finished (or in-progress) mapping against the schema:
//!
//! - **Required fields**: required leaves of every object the mapping builds
//! - **oneOf conflicts**: mutually exclusive fields populated in one instance
//! - **Type compatibility**: profiled column types against declared types
//! - **Enumerations**: row values against allowed values
//!
//! Results are data, not control flow. Use [`has_errors`] to decide whether
//! record generation should be blocked.
//!
//! # Example
//!
//! ```ignore
//! use dpp_validate::{validate_mapping, ValidationInput};
//!
//! let issues = validate_mapping(&ValidationInput::new(&mapping, &fields));
//! for issue in &issues {
//!     println!("[{}] {}", issue.severity(), issue.message());
//! }
//! ```

mod checks;
mod issue;

use std::collections::BTreeMap;

use dpp_model::{ColumnTypeInfo, Mapping, Row, SchemaField};

pub use checks::conflicts::{ConflictGroup, find_conflicts};
pub use checks::required::find_missing_required_fields;
pub use checks::values::validate_value;
pub use issue::{Issue, Severity};

/// Everything the checks look at. Column profiles and rows are optional;
/// the checks that need them are skipped when absent.
#[derive(Debug, Clone, Copy)]
pub struct ValidationInput<'a> {
    pub mapping: &'a Mapping,
    pub fields: &'a [SchemaField],
    pub column_types: Option<&'a BTreeMap<String, ColumnTypeInfo>>,
    pub rows: Option<&'a [Row]>,
}

impl<'a> ValidationInput<'a> {
    pub fn new(mapping: &'a Mapping, fields: &'a [SchemaField]) -> Self {
        Self {
            mapping,
            fields,
            column_types: None,
            rows: None,
        }
    }

    #[must_use]
    pub fn with_column_types(
        mut self,
        column_types: &'a BTreeMap<String, ColumnTypeInfo>,
    ) -> Self {
        self.column_types = Some(column_types);
        self
    }

    #[must_use]
    pub fn with_rows(mut self, rows: &'a [Row]) -> Self {
        self.rows = Some(rows);
        self
    }
}

/// Validate a mapping.
///
/// Runs all checks:
/// - Required fields per constructed object and array item
/// - oneOf conflicts per instance scope
/// - Column type against field type (warnings)
/// - Enumerated values
pub fn validate_mapping(input: &ValidationInput<'_>) -> Vec<Issue> {
    checks::run_all(input)
}

/// True when any issue is an error rather than a warning.
pub fn has_errors(issues: &[Issue]) -> bool {
    issues
        .iter()
        .any(|issue| issue.severity() == Severity::Error)
}
