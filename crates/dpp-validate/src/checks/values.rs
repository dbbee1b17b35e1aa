//! Per-column checks: declared type compatibility and enumerated values.

use std::collections::{BTreeMap, BTreeSet};

use dpp_map::is_compatible;
use dpp_model::{ColumnTypeInfo, Mapping, Row, SchemaField, mapped_paths, strip_indices};

use crate::issue::Issue;

const MAX_INVALID_VALUES: usize = 5;

/// Whether a single cell value is acceptable for `field`.
///
/// Absent and empty values are always valid; required-ness is checked
/// elsewhere. Fields with an enumeration (declared on the field, or failing
/// that on its ontology) accept only its members.
pub fn validate_value(value: Option<&str>, field: &SchemaField) -> bool {
    let Some(value) = value.filter(|value| !value.is_empty()) else {
        return true;
    };
    match allowed_values(field) {
        Some(allowed) => allowed.iter().any(|allowed| allowed == value),
        None => true,
    }
}

fn allowed_values(field: &SchemaField) -> Option<&[String]> {
    field
        .enum_values
        .as_deref()
        .or_else(|| field.ontology.as_ref()?.enum_values.as_deref())
}

/// Flags mapped columns whose profile cannot populate the target field.
pub fn check_types(
    mapping: &Mapping,
    fields: &BTreeMap<String, SchemaField>,
    column_types: &BTreeMap<String, ColumnTypeInfo>,
) -> Vec<Issue> {
    let mut issues = Vec::new();
    for (header, path) in mapped_paths(mapping) {
        let Some(field) = fields.get(&strip_indices(path)) else {
            continue;
        };
        let Some(column) = column_types.get(header) else {
            continue;
        };
        if is_compatible(Some(column), Some(field)) {
            continue;
        }
        issues.push(Issue::TypeMismatch {
            header: header.to_string(),
            path: path.to_string(),
            column_type: column.to_string(),
            field_type: describe_field_type(field),
        });
    }
    issues
}

/// Flags mapped columns carrying values outside the field's enumeration.
pub fn check_enums(
    mapping: &Mapping,
    fields: &BTreeMap<String, SchemaField>,
    rows: &[Row],
) -> Vec<Issue> {
    let mut issues = Vec::new();
    for (header, path) in mapped_paths(mapping) {
        let Some(field) = fields.get(&strip_indices(path)) else {
            continue;
        };
        if allowed_values(field).is_none() {
            continue;
        }

        let mut invalid_count = 0u64;
        let mut invalid = BTreeSet::new();
        for value in rows.iter().filter_map(|row| row.get(header)) {
            if !validate_value(Some(value), field) {
                invalid_count += 1;
                invalid.insert(value.clone());
            }
        }
        if invalid_count == 0 {
            continue;
        }

        issues.push(Issue::InvalidEnum {
            header: header.to_string(),
            path: path.to_string(),
            invalid_count,
            samples: invalid.into_iter().take(MAX_INVALID_VALUES).collect(),
        });
    }
    issues
}

fn describe_field_type(field: &SchemaField) -> String {
    if let Some(range) = field.ontology.as_ref().and_then(|o| o.range_local_name()) {
        return range.to_string();
    }
    match (field.field_type, field.format) {
        (Some(field_type), Some(format)) => format!("{field_type} ({format})"),
        (Some(field_type), None) => field_type.to_string(),
        (None, _) => "any".to_string(),
    }
}
