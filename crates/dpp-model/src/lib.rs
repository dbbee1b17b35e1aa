//! Core data model for mapping CSV exports onto a DPP record schema.
//!
//! The schema arrives as a flattened list of [`SchemaField`] descriptors;
//! columns are described by [`ColumnTypeInfo`]; a [`Mapping`] binds each CSV
//! header to a field path (or to `""` when the header is unmapped).

pub mod column;
pub mod error;
pub mod field;
pub mod path;

use std::collections::BTreeMap;

pub use column::{ColumnType, ColumnTypeInfo};
pub use error::{ModelError, Result};
pub use field::{FieldType, OneOfTag, Ontology, SchemaField, StringFormat, field_map};
pub use path::{
    PathSegment, ancestors, index_under_root, is_child_of, leaf_segment, parent_path,
    parse_segments, strip_indices,
};

/// Header to mapped path. An empty path means the header is unmapped.
pub type Mapping = BTreeMap<String, String>;

/// One CSV row as header to raw cell text. Absent headers are absent keys.
pub type Row = BTreeMap<String, String>;

/// Iterates the non-empty mapped paths of a mapping.
pub fn mapped_paths(mapping: &Mapping) -> impl Iterator<Item = (&str, &str)> {
    mapping
        .iter()
        .filter(|(_, path)| !path.is_empty())
        .map(|(header, path)| (header.as_str(), path.as_str()))
}
