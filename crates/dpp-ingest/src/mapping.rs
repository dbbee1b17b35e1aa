//! Saved header-to-path mappings.

use std::path::Path;

use dpp_model::Mapping;
use serde_json::Value;

use crate::error::{IngestError, Result};

/// Loads a mapping saved as a JSON object of header to path.
pub fn load_mapping(path: &Path) -> Result<Mapping> {
    let text = std::fs::read_to_string(path).map_err(|e| IngestError::open(path, e))?;
    parse_mapping(&text, path)
}

/// Parses a saved mapping. `null` values mean unmapped. `path` is only used
/// in errors.
pub fn parse_mapping(text: &str, path: &Path) -> Result<Mapping> {
    let parse_error = |message: String| IngestError::MappingParse {
        path: path.to_path_buf(),
        message,
    };
    let value: Value = serde_json::from_str(text).map_err(|e| parse_error(e.to_string()))?;
    let Value::Object(entries) = value else {
        return Err(parse_error("expected a JSON object".to_string()));
    };

    let mut mapping = Mapping::new();
    for (header, target) in entries {
        let target = match target {
            Value::String(target) => target.trim().to_string(),
            Value::Null => String::new(),
            other => {
                return Err(parse_error(format!(
                    "header '{header}' maps to {other}, expected a string"
                )));
            }
        };
        mapping.insert(header, target);
    }
    Ok(mapping)
}
