//! Path-addressed writes into a JSON tree and sparse-array compaction.

use dpp_model::{PathSegment, parse_segments};
use serde_json::{Map, Value};

/// Writes `value` at a dot-and-bracket `path` such as `documents[1].title`.
///
/// Missing objects and arrays are created on the way; arrays are padded with
/// `null` up to the index. A node of the wrong kind is replaced.
pub fn deep_set(target: &mut Value, path: &str, value: Value) {
    let segments = parse_segments(path);
    if segments.is_empty() {
        return;
    }
    set_segments(target, &segments, value);
}

fn set_segments(target: &mut Value, segments: &[PathSegment], value: Value) {
    let Some((first, rest)) = segments.split_first() else {
        *target = value;
        return;
    };
    match first {
        PathSegment::Key(key) => {
            if !target.is_object() {
                *target = Value::Object(Map::new());
            }
            if let Value::Object(map) = target {
                let slot = map.entry(key.clone()).or_insert(Value::Null);
                set_segments(slot, rest, value);
            }
        }
        PathSegment::Index(index) => {
            if !target.is_array() {
                *target = Value::Array(Vec::new());
            }
            if let Value::Array(items) = target {
                if items.len() <= *index {
                    items.resize(index + 1, Value::Null);
                }
                set_segments(&mut items[*index], rest, value);
            }
        }
    }
}

/// Drops the `null` holes left by sparse indices, recursively.
///
/// Relative order is kept, so items at indices 1 and 3 become items 0 and 1.
pub fn compact_arrays(value: &mut Value) {
    match value {
        Value::Array(items) => {
            items.retain(|item| !item.is_null());
            items.iter_mut().for_each(compact_arrays);
        }
        Value::Object(map) => map.values_mut().for_each(compact_arrays),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn creates_nested_objects_and_arrays() {
        let mut record = json!({});
        deep_set(&mut record, "physicalDimensions.weight", json!(1.5));
        deep_set(&mut record, "documents[1].title", json!("Manual"));
        assert_eq!(
            record,
            json!({
                "physicalDimensions": {"weight": 1.5},
                "documents": [null, {"title": "Manual"}]
            })
        );
    }

    #[test]
    fn replaces_nodes_of_the_wrong_kind() {
        let mut record = json!({"documents": "flat"});
        deep_set(&mut record, "documents[0].title", json!("Manual"));
        assert_eq!(record, json!({"documents": [{"title": "Manual"}]}));
    }

    #[test]
    fn empty_path_is_ignored() {
        let mut record = json!({"a": 1});
        deep_set(&mut record, "", json!(2));
        assert_eq!(record, json!({"a": 1}));
    }

    #[test]
    fn compaction_collapses_holes() {
        let mut sparse = json!([null, "a", null, "b"]);
        compact_arrays(&mut sparse);
        assert_eq!(sparse, json!(["a", "b"]));

        let mut nested = json!({"items": [null, {"tags": [null, 1]}]});
        compact_arrays(&mut nested);
        assert_eq!(nested, json!({"items": [{"tags": [1]}]}));
    }

    #[test]
    fn compaction_is_idempotent_on_contiguous_arrays() {
        let mut contiguous = json!({"items": ["a", "b", {"x": [1, 2]}]});
        let before = contiguous.clone();
        compact_arrays(&mut contiguous);
        assert_eq!(contiguous, before);
    }
}
