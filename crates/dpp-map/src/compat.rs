//! Whether a profiled column may populate a schema field.
//!
//! The check fails open: missing profile or field information, and empty
//! columns, are always compatible.

use dpp_model::{ColumnType, ColumnTypeInfo, FieldType, SchemaField, StringFormat};

/// Decides whether `column` may legally populate `field`.
pub fn is_compatible(column: Option<&ColumnTypeInfo>, field: Option<&SchemaField>) -> bool {
    let (Some(column), Some(field)) = (column, field) else {
        return true;
    };
    if column.is_empty() {
        return true;
    }
    if field.field_type == Some(FieldType::Array) {
        return matches!(
            column.column_type,
            ColumnType::String | ColumnType::Number | ColumnType::Integer
        );
    }
    if let Some(verdict) = range_override(column, field) {
        return verdict;
    }
    generic_compatible(column, field)
}

/// Strict check driven by the ontology range. `None` when the range is absent
/// or not one of the recognized XSD types.
fn range_override(column: &ColumnTypeInfo, field: &SchemaField) -> Option<bool> {
    let range = field.ontology.as_ref()?.range_local_name()?;
    let verdict = match range {
        "double" | "float" | "decimal" => {
            matches!(column.column_type, ColumnType::Number | ColumnType::Integer)
        }
        "integer" | "int" => column.column_type == ColumnType::Integer,
        "boolean" => column.column_type == ColumnType::Boolean,
        "dateTime" | "date" => {
            column.column_type == ColumnType::String
                && matches!(
                    column.format,
                    Some(StringFormat::DateTime | StringFormat::Date)
                )
        }
        "anyURI" => {
            column.column_type == ColumnType::String
                && matches!(
                    column.format,
                    Some(StringFormat::Uri | StringFormat::UriReference)
                )
        }
        _ => return None,
    };
    Some(verdict)
}

fn generic_compatible(column: &ColumnTypeInfo, field: &SchemaField) -> bool {
    let Some(field_type) = field.field_type else {
        return true;
    };
    let type_ok = match column.column_type {
        ColumnType::Empty => true,
        ColumnType::Boolean => matches!(field_type, FieldType::Boolean | FieldType::String),
        ColumnType::Integer => matches!(
            field_type,
            FieldType::Integer | FieldType::Number | FieldType::String
        ),
        ColumnType::Number => matches!(field_type, FieldType::Number | FieldType::String),
        ColumnType::String => field_type == FieldType::String,
    };
    if !type_ok {
        return false;
    }
    match (field_type, field.format) {
        (FieldType::String, Some(format)) => format_compatible(column.format, format),
        _ => true,
    }
}

fn format_compatible(column: Option<StringFormat>, field: StringFormat) -> bool {
    match field {
        StringFormat::DateTime | StringFormat::Date | StringFormat::Email | StringFormat::Uri => {
            column == Some(field)
        }
        StringFormat::UriReference => {
            matches!(
                column,
                Some(StringFormat::Uri | StringFormat::UriReference)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(column_type: ColumnType) -> ColumnTypeInfo {
        ColumnTypeInfo::new(column_type)
    }

    #[test]
    fn fails_open_on_missing_information() {
        let field = SchemaField::new("weight", FieldType::Number);
        assert!(is_compatible(None, Some(&field)));
        assert!(is_compatible(Some(&column(ColumnType::String)), None));
        assert!(is_compatible(Some(&ColumnTypeInfo::empty()), Some(&field)));
        let untyped = SchemaField {
            path: "anything".to_string(),
            ..SchemaField::default()
        };
        assert!(is_compatible(Some(&column(ColumnType::Boolean)), Some(&untyped)));
    }

    #[test]
    fn generic_matrix() {
        let string = SchemaField::new("name", FieldType::String);
        let number = SchemaField::new("weight", FieldType::Number);
        let integer = SchemaField::new("count", FieldType::Integer);
        let boolean = SchemaField::new("active", FieldType::Boolean);

        assert!(is_compatible(Some(&column(ColumnType::Boolean)), Some(&boolean)));
        assert!(is_compatible(Some(&column(ColumnType::Boolean)), Some(&string)));
        assert!(!is_compatible(Some(&column(ColumnType::Boolean)), Some(&number)));

        assert!(is_compatible(Some(&column(ColumnType::Integer)), Some(&integer)));
        assert!(is_compatible(Some(&column(ColumnType::Integer)), Some(&number)));
        assert!(is_compatible(Some(&column(ColumnType::Integer)), Some(&string)));

        assert!(is_compatible(Some(&column(ColumnType::Number)), Some(&number)));
        assert!(!is_compatible(Some(&column(ColumnType::Number)), Some(&integer)));

        assert!(is_compatible(Some(&column(ColumnType::String)), Some(&string)));
        assert!(!is_compatible(Some(&column(ColumnType::String)), Some(&number)));
    }

    #[test]
    fn primitives_may_fill_array_fields() {
        let tags = SchemaField::new("tags", FieldType::Array);
        assert!(is_compatible(Some(&column(ColumnType::String)), Some(&tags)));
        assert!(is_compatible(Some(&column(ColumnType::Integer)), Some(&tags)));
        assert!(!is_compatible(Some(&column(ColumnType::Boolean)), Some(&tags)));
    }

    #[test]
    fn ontology_range_overrides_matrix() {
        let weight = SchemaField::new("weight", FieldType::String).with_range("xsd:double");
        assert!(is_compatible(Some(&column(ColumnType::Integer)), Some(&weight)));
        assert!(!is_compatible(Some(&column(ColumnType::String)), Some(&weight)));

        let count = SchemaField::new("count", FieldType::Number).with_range("xsd:integer");
        assert!(!is_compatible(Some(&column(ColumnType::Number)), Some(&count)));

        let issued = SchemaField::new("issued", FieldType::String)
            .with_format(StringFormat::Date)
            .with_range("http://www.w3.org/2001/XMLSchema#date");
        let dates = ColumnTypeInfo::string_with_format(StringFormat::DateTime);
        assert!(is_compatible(Some(&dates), Some(&issued)));
        assert!(!is_compatible(Some(&column(ColumnType::String)), Some(&issued)));

        let link = SchemaField::new("link", FieldType::String).with_range("xsd:anyURI");
        let refs = ColumnTypeInfo::string_with_format(StringFormat::UriReference);
        assert!(is_compatible(Some(&refs), Some(&link)));
    }

    #[test]
    fn declared_format_must_match() {
        let email = SchemaField::new("contact", FieldType::String).with_format(StringFormat::Email);
        let emails = ColumnTypeInfo::string_with_format(StringFormat::Email);
        assert!(is_compatible(Some(&emails), Some(&email)));
        assert!(!is_compatible(Some(&column(ColumnType::String)), Some(&email)));

        let uri = SchemaField::new("link", FieldType::String).with_format(StringFormat::Uri);
        let uri_ref =
            SchemaField::new("ref", FieldType::String).with_format(StringFormat::UriReference);
        let uris = ColumnTypeInfo::string_with_format(StringFormat::Uri);
        let refs = ColumnTypeInfo::string_with_format(StringFormat::UriReference);
        assert!(is_compatible(Some(&uris), Some(&uri)));
        assert!(!is_compatible(Some(&refs), Some(&uri)));
        assert!(is_compatible(Some(&uris), Some(&uri_ref)));
        assert!(is_compatible(Some(&refs), Some(&uri_ref)));
    }
}
