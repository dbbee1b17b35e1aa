//! Header-to-field matching for DPP record assembly.
//!
//! - [`profile`] infers a type and format for each CSV column.
//! - [`score`] rates how well a header names a field path.
//! - [`compat`] decides whether a profiled column may fill a field.
//! - [`engine`] turns scores into a one-to-one mapping with array indices.
//! - [`state`] holds a mapping under interactive edits.

pub mod compat;
pub mod engine;
pub mod error;
pub mod patterns;
pub mod profile;
pub mod score;
pub mod state;
pub mod utils;

pub use compat::is_compatible;
pub use engine::{
    DEFAULT_CANDIDATE_CUTOFF, IndexedPathSuggestion, MapperOptions, SuggestionKind,
    build_mapping, build_mapping_with, find_used_indices, suggest_indexed_paths,
};
pub use error::MappingError;
pub use profile::{
    DEFAULT_SAMPLE_LIMIT, analyze, analyze_all, analyze_all_with_limit, analyze_with_limit,
};
pub use score::{MatchScore, MatchTier, RankedField, rank_fields, score, score_match};
pub use state::{MappingState, MappingSummary};
