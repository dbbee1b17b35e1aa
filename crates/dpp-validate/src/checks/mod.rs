//! Individual mapping checks.

pub mod conflicts;
pub mod required;
pub mod values;

use dpp_model::field_map;
use tracing::debug;

use crate::ValidationInput;
use crate::issue::Issue;

/// Runs every check in a fixed order: required, conflicts, types, enums.
pub fn run_all(input: &ValidationInput<'_>) -> Vec<Issue> {
    let fields = field_map(input.fields);
    let mut issues = Vec::new();

    let missing = required::find_missing_required_fields(input.mapping, input.fields);
    debug!(missing = missing.len(), "required field check");
    issues.extend(
        missing
            .into_iter()
            .map(|path| Issue::MissingRequired { path }),
    );

    let conflicts = conflicts::find_conflicts(input.mapping, &fields);
    debug!(conflicts = conflicts.len(), "oneOf conflict check");
    issues.extend(conflicts.into_iter().map(|group| Issue::OneOfConflict {
        scope: group.scope,
        paths: group.paths,
    }));

    if let Some(column_types) = input.column_types {
        issues.extend(values::check_types(input.mapping, &fields, column_types));
    }
    if let Some(rows) = input.rows {
        issues.extend(values::check_enums(input.mapping, &fields, rows));
    }
    issues
}
