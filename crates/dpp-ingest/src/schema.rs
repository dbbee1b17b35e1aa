//! Flattened schema field lists.
//!
//! The schema loader that flattens a DPP schema and its ontology lives
//! outside this workspace; its output is a JSON list of field descriptors,
//! either bare or wrapped as `{"fields": [...]}`.

use std::path::Path;

use dpp_model::SchemaField;
use serde::Deserialize;

use crate::error::{IngestError, Result};

#[derive(Deserialize)]
#[serde(untagged)]
enum FieldList {
    Bare(Vec<SchemaField>),
    Wrapped { fields: Vec<SchemaField> },
}

/// Loads a field list from a JSON file.
pub fn load_schema_fields(path: &Path) -> Result<Vec<SchemaField>> {
    let text = std::fs::read_to_string(path).map_err(|e| IngestError::open(path, e))?;
    parse_schema_fields(&text, path)
}

/// Parses a field list. `path` is only used in errors.
pub fn parse_schema_fields(text: &str, path: &Path) -> Result<Vec<SchemaField>> {
    let list: FieldList = serde_json::from_str(text).map_err(|e| IngestError::SchemaParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let fields = match list {
        FieldList::Bare(fields) | FieldList::Wrapped { fields } => fields,
    };
    let fields: Vec<SchemaField> = fields
        .into_iter()
        .filter(|field| {
            let keep = !field.path.trim().is_empty();
            if !keep {
                tracing::warn!(path = %path.display(), "skipping schema field with empty path");
            }
            keep
        })
        .collect();
    tracing::debug!(path = %path.display(), fields = fields.len(), "loaded schema fields");
    Ok(fields)
}
