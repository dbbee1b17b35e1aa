use std::path::PathBuf;

use dpp_map::{MappingSummary, MatchScore};
use dpp_model::ColumnTypeInfo;
use dpp_validate::Issue;
use serde_json::Value;

#[derive(Debug)]
pub struct MapResult {
    pub columns: Vec<MappedColumn>,
    pub summary: MappingSummary,
    pub output: Option<PathBuf>,
}

#[derive(Debug)]
pub struct MappedColumn {
    pub header: String,
    /// Empty when the header is unmapped.
    pub path: String,
    pub score: MatchScore,
    pub column_type: ColumnTypeInfo,
}

#[derive(Debug)]
pub struct ValidateResult {
    pub issues: Vec<Issue>,
    pub summary: MappingSummary,
    pub has_errors: bool,
}

#[derive(Debug)]
pub struct GenerateResult {
    pub records: Vec<Value>,
    pub issues: Vec<Issue>,
    pub output: Option<PathBuf>,
    /// Generation was refused because of validation errors.
    pub blocked: bool,
}
