//! Tests for dpp-model types.

use dpp_model::{ColumnType, ColumnTypeInfo, FieldType, SchemaField, StringFormat};

#[test]
fn schema_field_deserializes_camel_case() {
    let json = r#"{
        "path": "documents.title",
        "type": "string",
        "isArray": true,
        "required": true,
        "oneOf": [{ "groupId": "documents#source", "index": 1 }],
        "ontology": { "range": "xsd:string", "unit": null }
    }"#;
    let field: SchemaField = serde_json::from_str(json).expect("deserialize field");

    assert_eq!(field.path, "documents.title");
    assert_eq!(field.field_type, Some(FieldType::String));
    assert!(field.is_array);
    assert!(field.required);
    assert_eq!(field.one_of[0].owner(), "documents");
    assert_eq!(field.one_of[0].index, 1);
    assert_eq!(
        field.ontology.as_ref().and_then(|o| o.range_local_name()),
        Some("string")
    );
}

#[test]
fn union_type_uses_first_non_null_member() {
    let json = r#"{ "path": "weight", "type": ["null", "number", "string"] }"#;
    let field: SchemaField = serde_json::from_str(json).expect("deserialize field");
    assert_eq!(field.field_type, Some(FieldType::Number));
}

#[test]
fn unknown_format_is_ignored() {
    let json = r#"{ "path": "id", "type": "string", "format": "uuid" }"#;
    let field: SchemaField = serde_json::from_str(json).expect("deserialize field");
    assert_eq!(field.format, None);

    let json = r#"{ "path": "issued", "type": "string", "format": "date-time" }"#;
    let field: SchemaField = serde_json::from_str(json).expect("deserialize field");
    assert_eq!(field.format, Some(StringFormat::DateTime));
}

#[test]
fn range_local_name_handles_full_uris() {
    let field = SchemaField::new("issued", FieldType::String)
        .with_range("http://www.w3.org/2001/XMLSchema#dateTime");
    assert_eq!(
        field.ontology.as_ref().and_then(|o| o.range_local_name()),
        Some("dateTime")
    );
}

#[test]
fn array_root_and_indexed_path() {
    let title = SchemaField::new("documents.title", FieldType::String).array();
    assert_eq!(title.array_root(), Some("documents"));
    assert_eq!(title.indexed_path(2), "documents[2].title");

    let tags = SchemaField::new("tags", FieldType::Array);
    assert_eq!(tags.array_root(), Some("tags"));
    assert_eq!(tags.indexed_path(0), "tags[0]");

    let certifications = SchemaField::new("manufacturer.certifications", FieldType::Array);
    assert_eq!(
        certifications.array_root(),
        Some("manufacturer.certifications")
    );
    assert_eq!(
        certifications.indexed_path(0),
        "manufacturer.certifications[0]"
    );

    let weight = SchemaField::new("physicalDimensions.weight", FieldType::Number);
    assert_eq!(weight.array_root(), None);
    assert_eq!(weight.indexed_path(3), "physicalDimensions.weight");
}

#[test]
fn column_type_info_serializes_type_key() {
    let info = ColumnTypeInfo::string_with_format(StringFormat::Email);
    let json = serde_json::to_string(&info).expect("serialize info");
    assert_eq!(json, r#"{"type":"string","format":"email"}"#);

    let plain = ColumnTypeInfo::new(ColumnType::Integer);
    let json = serde_json::to_string(&plain).expect("serialize info");
    assert_eq!(json, r#"{"type":"integer"}"#);
}
