//! Mapping state management for interactive mapping workflows.
//!
//! [`MappingState`] owns the mutable header-to-path mapping for one loaded CSV
//! and the field list it targets. Conflicts and missing fields are derived
//! data and are recomputed by the validator after every edit; nothing derived
//! is cached here.

use std::collections::BTreeSet;

use dpp_model::{Mapping, SchemaField, mapped_paths, strip_indices};
use serde::Serialize;
use tracing::debug;

use crate::engine::{
    IndexedPathSuggestion, MapperOptions, build_mapping_with, find_used_indices,
    suggest_indexed_paths,
};
use crate::error::MappingError;

/// Mapping of one CSV onto one field list.
#[derive(Debug, Clone)]
pub struct MappingState {
    headers: Vec<String>,
    fields: Vec<SchemaField>,
    mapping: Mapping,
    options: MapperOptions,
}

impl MappingState {
    /// Creates a state with every header unmapped.
    pub fn new(headers: Vec<String>, fields: Vec<SchemaField>) -> Self {
        let mapping = headers
            .iter()
            .map(|header| (header.clone(), String::new()))
            .collect();
        Self {
            headers,
            fields,
            mapping,
            options: MapperOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: MapperOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the whole mapping with the auto-mapper's proposal.
    pub fn auto_map(&mut self) {
        self.mapping = build_mapping_with(&self.headers, &self.fields, &self.options);
    }

    /// Replaces the whole mapping, keeping only known headers.
    ///
    /// Headers missing from `mapping` become unmapped.
    pub fn load(&mut self, mapping: &Mapping) {
        for header in &self.headers {
            let path = mapping.get(header).cloned().unwrap_or_default();
            self.mapping.insert(header.clone(), path);
        }
    }

    /// Binds `header` to `path`, which may carry item indices.
    ///
    /// An empty `path` clears the header.
    pub fn assign(&mut self, header: &str, path: &str) -> Result<(), MappingError> {
        if !self.mapping.contains_key(header) {
            return Err(MappingError::HeaderNotFound(header.to_string()));
        }
        if path.is_empty() {
            self.clear(header);
            return Ok(());
        }
        let field = self
            .field(&strip_indices(path))
            .ok_or_else(|| MappingError::FieldNotFound(path.to_string()))?;
        if !field.is_array_field()
            && let Some((other, _)) = mapped_paths(&self.mapping)
                .find(|(other, mapped)| *other != header && *mapped == path)
        {
            return Err(MappingError::FieldAlreadyMapped {
                field: path.to_string(),
                header: other.to_string(),
            });
        }
        debug!(header, path, "mapping assigned");
        self.mapping.insert(header.to_string(), path.to_string());
        Ok(())
    }

    /// Unmaps `header`. Returns whether it was mapped before.
    pub fn clear(&mut self, header: &str) -> bool {
        match self.mapping.get_mut(header) {
            Some(path) if !path.is_empty() => {
                path.clear();
                true
            }
            _ => false,
        }
    }

    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    /// Looks up a field by its unindexed path.
    pub fn field(&self, path: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|field| field.path == path)
    }

    /// Headers without a path, in CSV order.
    pub fn unmapped_headers(&self) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|header| self.mapping.get(*header).is_none_or(String::is_empty))
            .map(String::as_str)
            .collect()
    }

    /// Concrete paths `header` could be bound to for the field at `path`.
    pub fn suggest_paths(&self, path: &str) -> Result<Vec<IndexedPathSuggestion>, MappingError> {
        let field = self
            .field(path)
            .ok_or_else(|| MappingError::FieldNotFound(path.to_string()))?;
        let used = field
            .array_root()
            .map(|root| find_used_indices(&self.mapping, root))
            .unwrap_or_default();
        Ok(suggest_indexed_paths(field, &used))
    }

    /// Get summary counts.
    pub fn summary(&self) -> MappingSummary {
        let mapped_fields: BTreeSet<String> = mapped_paths(&self.mapping)
            .map(|(_, path)| strip_indices(path))
            .collect();
        let mapped = self
            .headers
            .iter()
            .filter(|header| self.mapping.get(*header).is_some_and(|path| !path.is_empty()))
            .count();
        let required = self.fields.iter().filter(|field| field.required);
        MappingSummary {
            total_headers: self.headers.len(),
            mapped,
            unmapped: self.headers.len() - mapped,
            required_total: required.clone().count(),
            required_mapped: required
                .filter(|field| mapped_fields.contains(&field.path))
                .count(),
        }
    }
}

/// Summary of mapping counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MappingSummary {
    /// Number of CSV headers.
    pub total_headers: usize,
    /// Headers bound to a path.
    pub mapped: usize,
    /// Headers left unmapped.
    pub unmapped: usize,
    /// Fields flagged required anywhere in the schema.
    pub required_total: usize,
    /// Required fields populated by at least one header.
    pub required_mapped: usize,
}

#[cfg(test)]
mod tests {
    use dpp_model::FieldType;

    use super::*;

    fn state() -> MappingState {
        MappingState::new(
            vec!["EAN".to_string(), "Title".to_string(), "Notes".to_string()],
            vec![
                SchemaField::new("identifiers.gtin", FieldType::String).required(),
                SchemaField::new("documents.title", FieldType::String).array(),
                SchemaField::new("brandName", FieldType::String).required(),
            ],
        )
    }

    #[test]
    fn starts_unmapped() {
        let state = state();
        assert_eq!(state.unmapped_headers(), vec!["EAN", "Title", "Notes"]);
        assert_eq!(
            state.summary(),
            MappingSummary {
                total_headers: 3,
                mapped: 0,
                unmapped: 3,
                required_total: 2,
                required_mapped: 0,
            }
        );
    }

    #[test]
    fn auto_map_then_edit() {
        let mut state = state();
        state.auto_map();
        assert_eq!(state.mapping()["EAN"], "identifiers.gtin");
        assert_eq!(state.mapping()["Title"], "documents[0].title");

        state.assign("Notes", "documents[1].title").unwrap();
        assert!(state.clear("EAN"));
        assert!(!state.clear("EAN"));
        assert_eq!(state.unmapped_headers(), vec!["EAN"]);
        assert_eq!(state.summary().required_mapped, 0);
    }

    #[test]
    fn assign_rejects_unknown_header_and_field() {
        let mut state = state();
        let err = state.assign("Missing", "brandName").unwrap_err();
        assert_eq!(err, MappingError::HeaderNotFound("Missing".to_string()));
        assert_eq!(err.header(), Some("Missing"));

        let err = state.assign("EAN", "identifiers.ean").unwrap_err();
        assert_eq!(err.field(), Some("identifiers.ean"));
    }

    #[test]
    fn scalar_field_takes_one_header() {
        let mut state = state();
        state.assign("EAN", "brandName").unwrap();
        let err = state.assign("Notes", "brandName").unwrap_err();
        assert_eq!(
            err,
            MappingError::FieldAlreadyMapped {
                field: "brandName".to_string(),
                header: "EAN".to_string(),
            }
        );
        // Re-assigning the same header is fine.
        state.assign("EAN", "brandName").unwrap();
    }

    #[test]
    fn array_paths_are_suggested_from_current_mapping() {
        let mut state = state();
        state.assign("Title", "documents[0].title").unwrap();
        state.assign("Notes", "documents[0].title").unwrap();
        let values: Vec<String> = state
            .suggest_paths("documents.title")
            .unwrap()
            .into_iter()
            .map(|suggestion| suggestion.value)
            .collect();
        assert_eq!(values, vec!["documents[0].title", "documents[1].title"]);
    }

    #[test]
    fn load_ignores_unknown_headers() {
        let mut state = state();
        let mut mapping = Mapping::new();
        mapping.insert("EAN".to_string(), "identifiers.gtin".to_string());
        mapping.insert("Ghost".to_string(), "brandName".to_string());
        state.load(&mapping);
        assert_eq!(state.mapping().len(), 3);
        assert_eq!(state.summary().required_mapped, 1);
    }
}
