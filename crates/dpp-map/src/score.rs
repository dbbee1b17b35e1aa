//! Heuristic scoring of a free-text header against a dotted field path.
//!
//! Scores are distances: `0.0` is a perfect match, lower is better, and
//! [`f64::INFINITY`] means no usable signal. Tiers are evaluated in order:
//!
//! 1. Exact match of the normalized path (`0.0`)
//! 2. Synonym table hit (`0.05`)
//! 3. Exact match of the normalized leaf segment (`0.1`)
//! 4. Fuzzy edit distance to the leaf or full path (`1.0 + distance`)
//! 5. Acronym match (`1.0 + distance`)
//! 6. Token-set Jaccard similarity (`0.2 + (1 - jaccard) * 5`)
//!
//! The first three short-circuit; tiers 4-6 all contribute candidates and the
//! lowest wins. Tiers 4-6 are also evaluated on the header with bracketed
//! annotations removed, so `Weight (kg)` still reaches `physicalDimensions.weight`.
//! The token tier drops pure-digit tokens and expands a short token to the
//! path token it prefixes, so `Doc 1 Title` scores against `documents.title`
//! as if the item number and abbreviation were absent.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use dpp_model::{ColumnTypeInfo, SchemaField, leaf_segment};
use rapidfuzz::distance::levenshtein;
use serde::{Deserialize, Serialize};

use crate::compat::is_compatible;
use crate::patterns::is_synonym;
use crate::utils::{field_acronym, header_acronym, normalize, strip_annotations, tokenize};

const EXACT_SCORE: f64 = 0.0;
const SYNONYM_SCORE: f64 = 0.05;
const LEAF_SCORE: f64 = 0.1;
const EDIT_BASE: f64 = 1.0;
const TOKEN_BASE: f64 = 0.2;
const TOKEN_WEIGHT: f64 = 5.0;
const TOKEN_MIN_JACCARD: f64 = 0.4;
/// Header acronyms shorter than this are too ambiguous to compare.
const HEADER_ACRONYM_MIN_LEN: usize = 3;
/// Minimum length of a header token that may abbreviate a path token.
const ABBREVIATION_MIN_LEN: usize = 3;

/// Which heuristic produced a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchTier {
    Exact,
    Synonym,
    Leaf,
    Fuzzy,
    Acronym,
    Token,
}

impl MatchTier {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Synonym => "synonym",
            Self::Leaf => "leaf",
            Self::Fuzzy => "fuzzy",
            Self::Acronym => "acronym",
            Self::Token => "token",
        }
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Score of one (header, path) pair and the tier that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub score: f64,
    /// `None` when no tier produced a candidate.
    pub tier: Option<MatchTier>,
}

impl MatchScore {
    pub const fn none() -> Self {
        Self {
            score: f64::INFINITY,
            tier: None,
        }
    }

    const fn of(score: f64, tier: MatchTier) -> Self {
        Self {
            score,
            tier: Some(tier),
        }
    }

    pub fn is_match(&self) -> bool {
        self.score.is_finite()
    }

    /// Keeps the lower score; on ties the earlier candidate wins.
    fn min(self, other: Self) -> Self {
        if other.score < self.score { other } else { self }
    }

    /// Human-readable explanation of the score.
    pub fn explain(&self) -> String {
        match self.tier {
            Some(tier) => format!("{tier} match ({:.2})", self.score),
            None => "no match".to_string(),
        }
    }
}

/// Scores `header` against `path`. See the module docs for the tiers.
pub fn score(header: &str, path: &str) -> f64 {
    score_match(header, path).score
}

/// Scores `header` against `path`, reporting the winning tier.
pub fn score_match(header: &str, path: &str) -> MatchScore {
    let normalized_header = normalize(header);
    if normalize(path) == normalized_header {
        return MatchScore::of(EXACT_SCORE, MatchTier::Exact);
    }
    if is_synonym(&normalized_header, path) {
        return MatchScore::of(SYNONYM_SCORE, MatchTier::Synonym);
    }
    let leaf = leaf_segment(path);
    if normalize(leaf) == normalized_header {
        return MatchScore::of(LEAF_SCORE, MatchTier::Leaf);
    }

    let mut best = heuristic_score(header, path, leaf);
    let core = strip_annotations(header);
    if !core.is_empty() && core != header.trim() {
        best = best.min(heuristic_score(&core, path, leaf));
    }
    best
}

fn heuristic_score(header: &str, path: &str, leaf: &str) -> MatchScore {
    let normalized_header = normalize(header);
    if normalized_header.is_empty() {
        return MatchScore::none();
    }
    let mut best = MatchScore::none();
    if let Some(candidate) = fuzzy_candidate(&normalized_header, path, leaf) {
        best = best.min(candidate);
    }
    if let Some(candidate) = acronym_candidate(header, &normalized_header, path) {
        best = best.min(candidate);
    }
    if let Some(candidate) = token_candidate(header, path) {
        best = best.min(candidate);
    }
    best
}

fn edit_distance(left: &str, right: &str) -> usize {
    levenshtein::distance(left.chars(), right.chars())
}

fn fuzzy_candidate(normalized_header: &str, path: &str, leaf: &str) -> Option<MatchScore> {
    let distance = edit_distance(normalized_header, &normalize(leaf))
        .min(edit_distance(normalized_header, &normalize(path)));
    let threshold = match normalized_header.len() {
        0..=4 => 0,
        5..=8 => 1,
        _ => 3,
    };
    (distance <= threshold).then(|| MatchScore::of(EDIT_BASE + distance as f64, MatchTier::Fuzzy))
}

fn acronym_candidate(header: &str, normalized_header: &str, path: &str) -> Option<MatchScore> {
    let field_acronym = normalize(&field_acronym(path));
    if field_acronym.is_empty() {
        return None;
    }
    let mut distance = edit_distance(normalized_header, &field_acronym);
    let header_acronym = normalize(&header_acronym(header));
    if header_acronym.len() >= HEADER_ACRONYM_MIN_LEN {
        distance = distance.min(edit_distance(&header_acronym, &field_acronym));
    }
    let acronym_len = field_acronym.len();
    let threshold = if acronym_len < 4 {
        0
    } else {
        (acronym_len / 3).min(2)
    };
    (distance <= threshold)
        .then(|| MatchScore::of(EDIT_BASE + distance as f64, MatchTier::Acronym))
}

fn token_candidate(header: &str, path: &str) -> Option<MatchScore> {
    let path_tokens = tokenize(path);
    let header_set: BTreeSet<String> = tokenize(header)
        .into_iter()
        .filter(|token| !token.chars().all(|ch| ch.is_ascii_digit()))
        .map(|token| expand_abbreviation(token, &path_tokens))
        .collect();
    let path_set: BTreeSet<String> = path_tokens.into_iter().collect();

    let union = header_set.union(&path_set).count();
    if union == 0 {
        return None;
    }
    let shared = header_set.intersection(&path_set).count();
    let jaccard = shared as f64 / union as f64;
    (jaccard >= TOKEN_MIN_JACCARD)
        .then(|| MatchScore::of(TOKEN_BASE + (1.0 - jaccard) * TOKEN_WEIGHT, MatchTier::Token))
}

/// Maps an abbreviated header token (`doc`) onto the path token it prefixes
/// (`documents`). Pure-digit tokens never reach here; they mark array items.
fn expand_abbreviation(token: String, path_tokens: &[String]) -> String {
    if token.len() < ABBREVIATION_MIN_LEN || path_tokens.contains(&token) {
        return token;
    }
    path_tokens
        .iter()
        .find(|candidate| candidate.starts_with(token.as_str()))
        .cloned()
        .unwrap_or(token)
}

/// Sorts fields by ascending score for an autocomplete list.
///
/// Every field with a finite score is returned, compatible or not; the
/// `compatible` flag lets a UI dim weakly-typed suggestions instead of hiding
/// them. Ties keep the input order.
pub fn rank_fields<'a>(
    header: &str,
    fields: &'a [SchemaField],
    column: Option<&ColumnTypeInfo>,
) -> Vec<RankedField<'a>> {
    let mut ranked: Vec<RankedField<'a>> = fields
        .iter()
        .filter_map(|field| {
            let score = score_match(header, &field.path);
            score.is_match().then(|| RankedField {
                field,
                score,
                compatible: is_compatible(column, Some(field)),
            })
        })
        .collect();
    ranked.sort_by(|a, b| {
        a.score
            .score
            .partial_cmp(&b.score.score)
            .unwrap_or(Ordering::Equal)
    });
    ranked
}

/// A field suggestion for one header.
#[derive(Debug, Clone)]
pub struct RankedField<'a> {
    pub field: &'a SchemaField,
    pub score: MatchScore,
    pub compatible: bool,
}

#[cfg(test)]
mod tests {
    use dpp_model::{ColumnType, FieldType};

    use super::*;
    use crate::patterns::SYNONYMS;

    #[test]
    fn exact_path_scores_zero() {
        assert_eq!(score("physicalDimensions.weight", "physicalDimensions.weight"), 0.0);
        assert_eq!(score("Identifiers GTIN", "identifiers.gtin"), 0.0);
    }

    #[test]
    fn every_synonym_hits_its_target() {
        for (key, target) in SYNONYMS {
            let result = score_match(key, target);
            assert_eq!(result.score, 0.05, "{key} -> {target}");
            assert_eq!(result.tier, Some(MatchTier::Synonym));
        }
    }

    #[test]
    fn leaf_match() {
        let result = score_match("Title", "documents.title");
        assert_eq!(result, MatchScore::of(0.1, MatchTier::Leaf));
    }

    #[test]
    fn fuzzy_match_within_threshold() {
        let result = score_match("Brand Nme", "brandName");
        assert_eq!(result, MatchScore::of(2.0, MatchTier::Fuzzy));
    }

    #[test]
    fn acronym_match() {
        let result = score_match("GTIN", "global.tradeItemNumber");
        assert_eq!(result, MatchScore::of(1.0, MatchTier::Acronym));
    }

    #[test]
    fn token_match_ignores_item_numbers() {
        let result = score_match("Doc 1 Title", "documents.title");
        assert_eq!(result, MatchScore::of(0.2, MatchTier::Token));
    }

    #[test]
    fn unit_annotation_does_not_hide_match() {
        let result = score_match("Weight (kg)", "physicalDimensions.weight");
        assert_eq!(result, MatchScore::of(1.0, MatchTier::Fuzzy));
    }

    #[test]
    fn unrelated_header_has_no_signal() {
        let result = score_match("Zzzz", "identifiers.gtin");
        assert!(!result.is_match());
        assert_eq!(result.tier, None);
        assert_eq!(result.explain(), "no match");
        assert_eq!(score("", "identifiers.gtin"), f64::INFINITY);
    }

    #[test]
    fn explain_names_the_tier() {
        assert_eq!(
            score_match("EAN", "identifiers.gtin").explain(),
            "synonym match (0.05)"
        );
    }

    #[test]
    fn ranked_fields_keep_incompatible_entries() {
        let fields = vec![
            SchemaField::new("brandName", FieldType::String),
            SchemaField::new("documents.title", FieldType::String),
            SchemaField::new("title", FieldType::Number),
        ];
        let column = ColumnTypeInfo::new(ColumnType::String);
        let ranked = rank_fields("Title", &fields, Some(&column));
        let summary: Vec<(&str, f64, bool)> = ranked
            .iter()
            .map(|entry| (entry.field.path.as_str(), entry.score.score, entry.compatible))
            .collect();
        assert_eq!(
            summary,
            vec![("title", 0.0, false), ("documents.title", 0.1, true)]
        );
    }
}
