use std::collections::BTreeSet;

use dpp_map::{MatchTier, build_mapping, score, score_match};
use dpp_model::{FieldType, SchemaField, mapped_paths};
use proptest::prelude::*;

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

fn product_fields() -> Vec<SchemaField> {
    vec![
        SchemaField::new("identifiers.gtin", FieldType::String),
        SchemaField::new("physicalDimensions.weight", FieldType::Number),
        SchemaField::new("documents.title", FieldType::String).array(),
    ]
}

#[test]
fn maps_product_export_end_to_end() {
    let headers = headers(&["EAN", "Weight (kg)", "Doc 1 Title", "Doc 2 Title"]);
    let mapping = build_mapping(&headers, &product_fields());

    assert_eq!(mapping["EAN"], "identifiers.gtin");
    assert_eq!(mapping["Weight (kg)"], "physicalDimensions.weight");
    assert_eq!(mapping["Doc 1 Title"], "documents[0].title");
    assert_eq!(mapping["Doc 2 Title"], "documents[1].title");

    let ean = score_match("EAN", "identifiers.gtin");
    assert_eq!(ean.score, 0.05);
    assert_eq!(ean.tier, Some(MatchTier::Synonym));
    let weight = score_match("Weight (kg)", "physicalDimensions.weight");
    assert!(matches!(weight.tier, Some(MatchTier::Fuzzy | MatchTier::Token)));
}

#[test]
fn numbered_headers_take_ascending_indices() {
    let headers = headers(&["Doc 10 Title", "Doc 2 Title", "Doc 7 Title"]);
    let mapping = build_mapping(&headers, &product_fields());

    assert_eq!(mapping["Doc 2 Title"], "documents[0].title");
    assert_eq!(mapping["Doc 7 Title"], "documents[1].title");
    assert_eq!(mapping["Doc 10 Title"], "documents[2].title");
}

#[test]
fn first_digit_run_decides_the_index() {
    // Grouped by 2024, not by the trailing 1.
    let fields = vec![SchemaField::new("items.name", FieldType::String).array()];
    let headers = headers(&["Item 2024 Name 1", "Item 3 Name"]);
    let mapping = build_mapping(&headers, &fields);

    assert_eq!(mapping["Item 3 Name"], "items[0].name");
    assert_eq!(mapping["Item 2024 Name 1"], "items[1].name");
}

#[test]
fn headers_sharing_a_number_share_an_item() {
    let fields = vec![
        SchemaField::new("documents.title", FieldType::String).array(),
        SchemaField::new("documents.url", FieldType::String).array(),
    ];
    let headers = headers(&["Doc 1 Title", "Doc 1 Url", "Doc 2 Title"]);
    let mapping = build_mapping(&headers, &fields);

    assert_eq!(mapping["Doc 1 Title"], "documents[0].title");
    assert_eq!(mapping["Doc 1 Url"], "documents[0].url");
    assert_eq!(mapping["Doc 2 Title"], "documents[1].title");
}

#[test]
fn empty_inputs() {
    assert!(build_mapping(&[], &product_fields()).is_empty());
    let mapping = build_mapping(&headers(&["EAN"]), &[]);
    assert_eq!(mapping["EAN"], "");
}

fn field_path() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z]{0,8}(\\.[a-z][a-zA-Z]{0,8}){0,3}"
}

proptest! {
    #[test]
    fn a_path_used_as_header_scores_zero(path in field_path()) {
        prop_assert_eq!(score(&path, &path), 0.0);
    }

    #[test]
    fn scalar_fields_are_never_shared(
        header_names in prop::collection::vec("[A-Za-z ]{1,12}", 1..8),
        paths in prop::collection::btree_set(field_path(), 1..6),
    ) {
        let fields: Vec<SchemaField> = paths
            .iter()
            .map(|path| SchemaField::new(path.clone(), FieldType::String))
            .collect();
        let mapping = build_mapping(&header_names, &fields);

        let mut seen = BTreeSet::new();
        for (_, path) in mapped_paths(&mapping) {
            prop_assert!(seen.insert(path.to_string()), "{} mapped twice", path);
            prop_assert!(paths.contains(path));
        }
        for header in &header_names {
            prop_assert!(mapping.contains_key(header));
        }
    }
}
