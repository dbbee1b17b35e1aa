//! Required field checks.
//!
//! `required` is scoped to the immediate parent object: a required field is
//! only missing when its parent object is being built at all. Inside arrays
//! the check runs per populated item.

use std::collections::{BTreeMap, BTreeSet};

use dpp_map::find_used_indices;
use dpp_model::{
    Mapping, SchemaField, ancestors, is_child_of, mapped_paths, parent_path, strip_indices,
};

/// Lists required paths that the mapping leaves unpopulated.
///
/// With nothing mapped only root-level required fields are reported. Missing
/// array items are reported with their concrete index (`documents[1].title`).
pub fn find_missing_required_fields(mapping: &Mapping, fields: &[SchemaField]) -> Vec<String> {
    let mapped: Vec<&str> = mapped_paths(mapping).map(|(_, path)| path).collect();
    if mapped.is_empty() {
        let root_level = fields
            .iter()
            .filter(|field| field.required && !field.path.contains('.'))
            .map(|field| field.path.clone());
        return dedupe(root_level);
    }

    let stripped: BTreeSet<String> = mapped.iter().map(|path| strip_indices(path)).collect();
    let by_path: BTreeMap<&str, &SchemaField> = fields
        .iter()
        .map(|field| (field.path.as_str(), field))
        .collect();

    let mut missing = Vec::new();
    for field in fields.iter().filter(|field| field.required) {
        let parent = parent_path(&field.path);
        match array_parent(field, parent, &by_path) {
            Some(root) => {
                let min_items = by_path
                    .get(root)
                    .and_then(|array| array.min_items)
                    .unwrap_or(0);
                missing.extend(missing_in_items(
                    field, root, min_items, mapping, &mapped, &stripped,
                ));
            }
            None => {
                if field.allows_empty_array() {
                    continue;
                }
                if is_constructed(parent, &stripped) && !is_populated(&field.path, &stripped) {
                    missing.push(field.path.clone());
                }
            }
        }
    }
    dedupe(missing)
}

/// The array root when `field`'s immediate parent is a repeated object.
fn array_parent<'a>(
    field: &'a SchemaField,
    parent: &'a str,
    by_path: &BTreeMap<&str, &SchemaField>,
) -> Option<&'a str> {
    if parent.is_empty() {
        return None;
    }
    if field.array_root() == Some(parent) {
        return Some(parent);
    }
    by_path
        .get(parent)
        .filter(|parent_field| parent_field.is_array_field())
        .map(|_| parent)
}

fn missing_in_items(
    field: &SchemaField,
    root: &str,
    min_items: u32,
    mapping: &Mapping,
    mapped: &[&str],
    stripped: &BTreeSet<String>,
) -> Vec<String> {
    let mut indices = find_used_indices(mapping, root);
    if indices.is_empty() {
        // Object-style mapping without indices.
        let touched = stripped
            .iter()
            .any(|path| path == root || is_child_of(path, root));
        if touched && !is_populated(&field.path, stripped) {
            return vec![field.path.clone()];
        }
        return Vec::new();
    }
    indices.extend(0..min_items as usize);

    let rest = &field.path[root.len()..];
    indices
        .into_iter()
        .map(|index| format!("{root}[{index}]{rest}"))
        .filter(|target| {
            !mapped
                .iter()
                .any(|path| path == target || is_child_of(path, target))
        })
        .collect()
}

/// Whether `path` or something below it is mapped.
fn is_populated(path: &str, stripped: &BTreeSet<String>) -> bool {
    stripped.contains(path) || stripped.iter().any(|mapped| is_child_of(mapped, path))
}

/// Whether the object at `parent` will exist in the generated record.
///
/// An object is built when it or any ancestor is mapped directly or has
/// something mapped below it.
fn is_constructed(parent: &str, stripped: &BTreeSet<String>) -> bool {
    if parent.is_empty() {
        return true;
    }
    std::iter::once(parent)
        .chain(ancestors(parent))
        .any(|object| is_populated(object, stripped))
}

fn dedupe(paths: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    paths
        .into_iter()
        .filter(|path| seen.insert(path.clone()))
        .collect()
}
