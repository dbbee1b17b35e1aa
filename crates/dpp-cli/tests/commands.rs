//! Integration tests for the subcommand implementations.

use std::fs;
use std::path::Path;

use dpp_cli::commands::{GenerateOptions, InputOptions, run_generate, run_map, run_validate};
use dpp_map::MatchTier;
use serde_json::{Value, json};
use tempfile::TempDir;

const PRODUCTS_CSV: &str = "\
EAN,Weight (kg),Doc 1 Title,Status
4006381333931,12.5,Manual,active
4006381333948,3,Leaflet,retired
";

const FIELDS_JSON: &str = r#"[
    {"path": "identifiers.gtin", "type": "string", "required": true},
    {"path": "physicalDimensions.weight", "type": "number"},
    {"path": "documents.title", "type": "string", "isArray": true},
    {"path": "status", "type": "string", "required": true, "enum": ["active", "retired"]}
]"#;

fn inputs(dir: &Path) -> InputOptions {
    let csv = dir.join("products.csv");
    let schema = dir.join("fields.json");
    fs::write(&csv, PRODUCTS_CSV).unwrap();
    fs::write(&schema, FIELDS_JSON).unwrap();
    InputOptions {
        csv,
        schema,
        ..InputOptions::default()
    }
}

#[test]
fn map_writes_the_proposed_mapping() {
    let dir = TempDir::new().unwrap();
    let options = inputs(dir.path());
    let output = dir.path().join("out").join("mapping.json");

    let result = run_map(&options, Some(&output)).unwrap();
    assert_eq!(result.summary.mapped, 4);
    assert_eq!(result.summary.required_mapped, 2);
    let ean = &result.columns[0];
    assert_eq!(ean.header, "EAN");
    assert_eq!(ean.score.tier, Some(MatchTier::Synonym));

    let saved: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        saved,
        json!({
            "Doc 1 Title": "documents[0].title",
            "EAN": "identifiers.gtin",
            "Status": "status",
            "Weight (kg)": "physicalDimensions.weight",
        })
    );
}

#[test]
fn validate_reports_missing_required_fields_in_saved_mapping() {
    let dir = TempDir::new().unwrap();
    let mut options = inputs(dir.path());
    let mapping = dir.path().join("mapping.json");
    fs::write(&mapping, r#"{"EAN": "identifiers.gtin", "Status": null}"#).unwrap();
    options.mapping = Some(mapping);

    let result = run_validate(&options).unwrap();
    assert!(result.has_errors);
    assert_eq!(result.summary.mapped, 1);
    assert_eq!(
        result.issues[0].message(),
        "Required field status is not mapped"
    );
}

#[test]
fn generate_builds_one_record_per_row() {
    let dir = TempDir::new().unwrap();
    let options = inputs(dir.path());
    let output = dir.path().join("records.json");
    let generate = GenerateOptions {
        sectors: vec!["battery".to_string()],
        output: Some(output.clone()),
        ..GenerateOptions::default()
    };

    let result = run_generate(&options, &generate).unwrap();
    assert!(!result.blocked);
    assert!(result.issues.is_empty());
    assert_eq!(result.records.len(), 2);
    assert_eq!(result.records[0]["physicalDimensions"]["weight"], json!(12.5));
    assert_eq!(result.records[1]["documents"], json!([{"title": "Leaflet"}]));
    assert_eq!(
        result.records[1]["@context"][1],
        "https://dpp-keystone.org/spec/contexts/v1/dpp-battery.context.jsonld"
    );

    let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written, Value::Array(result.records));
}

#[test]
fn generate_refuses_on_errors_when_asked() {
    let dir = TempDir::new().unwrap();
    let mut options = inputs(dir.path());
    let mapping = dir.path().join("mapping.json");
    fs::write(&mapping, r#"{"EAN": "identifiers.gtin"}"#).unwrap();
    options.mapping = Some(mapping);
    let output = dir.path().join("records.json");
    let generate = GenerateOptions {
        fail_on_issues: true,
        output: Some(output.clone()),
        ..GenerateOptions::default()
    };

    let result = run_generate(&options, &generate).unwrap();
    assert!(result.blocked);
    assert!(result.records.is_empty());
    assert!(!output.exists());
}

#[test]
fn missing_csv_is_an_error() {
    let dir = TempDir::new().unwrap();
    let mut options = inputs(dir.path());
    options.csv = dir.path().join("absent.csv");

    let error = run_validate(&options).unwrap_err();
    assert_eq!(error.to_string(), "read CSV input");
    assert!(format!("{error:#}").contains("file not found"));
}
