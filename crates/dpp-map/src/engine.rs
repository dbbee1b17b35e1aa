//! Greedy header-to-field auto-mapping.
//!
//! Every (header, field) pair is scored, hopeless pairs are pruned, and the
//! survivors are assigned cheapest first. The result is greedy, not a globally
//! optimal matching; ties resolve in header-then-field enumeration order.
//!
//! Array fields may collect several headers. Once assignment is done those
//! headers are spread over item indices, keyed by the number embedded in the
//! header text (`Doc 1 Title` -> `documents[0].title`).

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use dpp_model::{Mapping, SchemaField, index_under_root};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::profile::DEFAULT_SAMPLE_LIMIT;
use crate::score::score;
use crate::utils::first_number;

/// Pairs scoring at or above this are never considered.
pub const DEFAULT_CANDIDATE_CUTOFF: f64 = 5.0;

/// Tuning knobs for the auto-mapper.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapperOptions {
    /// Candidates must score strictly below this value.
    pub candidate_cutoff: f64,
    /// Non-empty values inspected per column when profiling.
    pub sample_limit: usize,
}

impl Default for MapperOptions {
    fn default() -> Self {
        Self {
            candidate_cutoff: DEFAULT_CANDIDATE_CUTOFF,
            sample_limit: DEFAULT_SAMPLE_LIMIT,
        }
    }
}

impl MapperOptions {
    #[must_use]
    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.candidate_cutoff = cutoff;
        self
    }

    #[must_use]
    pub fn with_sample_limit(mut self, limit: usize) -> Self {
        self.sample_limit = limit;
        self
    }
}

struct Candidate<'a> {
    header: &'a str,
    field: &'a SchemaField,
    score: f64,
}

/// Builds a mapping for every header using the default options.
///
/// Unmatched headers map to `""`.
pub fn build_mapping(headers: &[String], fields: &[SchemaField]) -> Mapping {
    build_mapping_with(headers, fields, &MapperOptions::default())
}

/// Builds a mapping for every header.
///
/// A header is bound to at most one path, and a non-array field to at most one
/// header. Array fields accept any number of headers; their paths are then
/// rewritten with resolved item indices.
pub fn build_mapping_with(
    headers: &[String],
    fields: &[SchemaField],
    options: &MapperOptions,
) -> Mapping {
    let mut candidates = Vec::new();
    for header in headers {
        for field in fields {
            let score = score(header, &field.path);
            if score < options.candidate_cutoff {
                candidates.push(Candidate {
                    header: header.as_str(),
                    field,
                    score,
                });
            }
        }
    }
    debug!(
        headers = headers.len(),
        fields = fields.len(),
        candidates = candidates.len(),
        "scored header/field pairs"
    );

    // `sort_by` is stable, so equal scores keep enumeration order.
    candidates.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal));

    let mut assigned: BTreeMap<&str, &SchemaField> = BTreeMap::new();
    let mut taken_fields: BTreeSet<&str> = BTreeSet::new();
    for candidate in candidates {
        if assigned.contains_key(candidate.header) {
            continue;
        }
        let field = candidate.field;
        if !field.is_array_field() && taken_fields.contains(field.path.as_str()) {
            continue;
        }
        trace!(
            header = candidate.header,
            path = %field.path,
            score = candidate.score,
            "assigned"
        );
        taken_fields.insert(field.path.as_str());
        assigned.insert(candidate.header, field);
    }

    let mut mapping: Mapping = headers
        .iter()
        .map(|header| (header.clone(), String::new()))
        .collect();

    let mut by_root: BTreeMap<&str, Vec<(&str, &SchemaField)>> = BTreeMap::new();
    for header in headers {
        let Some(&field) = assigned.get(header.as_str()) else {
            continue;
        };
        match field.array_root() {
            Some(root) => by_root
                .entry(root)
                .or_default()
                .push((header.as_str(), field)),
            None => {
                mapping.insert(header.clone(), field.path.clone());
            }
        }
    }
    for (root, members) in by_root {
        for (header, field, index) in resolve_indices(members) {
            debug!(header, root, index, "resolved array index");
            mapping.insert(header.to_string(), field.indexed_path(index));
        }
    }

    debug!(mapped = assigned.len(), "auto-mapping complete");
    mapping
}

/// Spreads the headers bound to one array root over item indices.
///
/// Headers embedding a number are grouped by the first digit run; distinct
/// numbers in ascending order become indices `0..k`. Headers without digits
/// follow alphabetically from index `k`, opening a new index whenever the same
/// field path would repeat within the current one.
fn resolve_indices<'a>(
    members: Vec<(&'a str, &'a SchemaField)>,
) -> Vec<(&'a str, &'a SchemaField, usize)> {
    let mut numbered: BTreeMap<u64, Vec<(&str, &SchemaField)>> = BTreeMap::new();
    let mut plain = Vec::new();
    for (header, field) in members {
        match first_number(header) {
            Some(number) => numbered.entry(number).or_default().push((header, field)),
            None => plain.push((header, field)),
        }
    }

    let mut resolved = Vec::new();
    for (index, group) in numbered.values().enumerate() {
        resolved.extend(group.iter().map(|&(header, field)| (header, field, index)));
    }

    plain.sort_by(|a, b| a.0.cmp(b.0));
    let mut index = numbered.len();
    let mut current: BTreeSet<&str> = BTreeSet::new();
    for (header, field) in plain {
        if !current.insert(field.path.as_str()) {
            index += 1;
            current.clear();
            current.insert(field.path.as_str());
        }
        resolved.push((header, field, index));
    }
    resolved
}

/// Item indices already used under `root` anywhere in the mapping.
pub fn find_used_indices(mapping: &Mapping, root: &str) -> BTreeSet<usize> {
    mapping
        .values()
        .filter_map(|path| index_under_root(path, root))
        .collect()
}

/// How an [`IndexedPathSuggestion`] relates to the current mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    /// The field is not repeated; the path is used as is.
    Scalar,
    /// An item that some header already populates.
    Existing,
    /// The next free item.
    New,
}

/// One concrete path a header could be bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedPathSuggestion {
    pub value: String,
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    /// `None` for scalar fields.
    pub index: Option<usize>,
}

/// Lists the paths a header could take for `field`.
///
/// Scalar fields yield their own path. Array fields yield one entry per used
/// index in ascending order, then a fresh index one past the largest.
pub fn suggest_indexed_paths(
    field: &SchemaField,
    used_indices: &BTreeSet<usize>,
) -> Vec<IndexedPathSuggestion> {
    if !field.is_array_field() {
        return vec![IndexedPathSuggestion {
            value: field.path.clone(),
            kind: SuggestionKind::Scalar,
            index: None,
        }];
    }
    let mut suggestions: Vec<IndexedPathSuggestion> = used_indices
        .iter()
        .map(|&index| IndexedPathSuggestion {
            value: field.indexed_path(index),
            kind: SuggestionKind::Existing,
            index: Some(index),
        })
        .collect();
    let next = used_indices.last().map_or(0, |max| max + 1);
    suggestions.push(IndexedPathSuggestion {
        value: field.indexed_path(next),
        kind: SuggestionKind::New,
        index: Some(next),
    });
    suggestions
}
