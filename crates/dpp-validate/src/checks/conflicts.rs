//! Mutual-exclusion ("oneOf") conflict detection.
//!
//! A oneOf group allows at most one of its member indices per object
//! instance. Instances are told apart by the concrete array indices in the
//! mapped paths, so `items[0]` and `items[1]` never conflict with each other.

use std::collections::{BTreeMap, BTreeSet};

use dpp_model::{Mapping, SchemaField, mapped_paths, strip_indices};
use serde::{Deserialize, Serialize};

/// Co-mapped paths that violate one oneOf group in one object instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictGroup {
    pub group_id: String,
    /// Instance scope such as `""` (record root), `items`, or `items[1]`.
    pub scope: String,
    /// Contributing paths, deduplicated, in mapping order.
    pub paths: Vec<String>,
}

#[derive(Default)]
struct GroupState {
    indices: BTreeSet<u32>,
    paths: Vec<String>,
}

/// Finds every oneOf group populated by two or more member indices within
/// the same instance scope.
pub fn find_conflicts(
    mapping: &Mapping,
    fields: &BTreeMap<String, SchemaField>,
) -> Vec<ConflictGroup> {
    let mut groups: BTreeMap<(String, String), GroupState> = BTreeMap::new();
    for (_, path) in mapped_paths(mapping) {
        let Some(field) = fields.get(&strip_indices(path)) else {
            continue;
        };
        for tag in &field.one_of {
            let scope = instance_scope(path, tag.owner());
            let state = groups
                .entry((scope, tag.group_id.clone()))
                .or_default();
            state.indices.insert(tag.index);
            if !state.paths.iter().any(|seen| seen == path) {
                state.paths.push(path.to_string());
            }
        }
    }

    groups
        .into_iter()
        .filter(|(_, state)| state.indices.len() >= 2)
        .map(|((scope, group_id), state)| ConflictGroup {
            group_id,
            scope,
            paths: state.paths,
        })
        .collect()
}

/// The concrete occurrence of `owner` addressed by `path`.
///
/// Walks the mapped path until its unindexed prefix equals `owner` and returns
/// that prefix with its indices intact. Falls back to `owner` itself.
fn instance_scope(path: &str, owner: &str) -> String {
    if owner.is_empty() {
        return String::new();
    }
    let mut raw = String::with_capacity(path.len());
    for segment in path.split('.') {
        if !raw.is_empty() {
            raw.push('.');
        }
        raw.push_str(segment);
        if strip_indices(&raw) == owner {
            return raw;
        }
    }
    owner.to_string()
}
