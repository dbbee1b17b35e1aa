//! Row-to-record materialization.

use dpp_model::{Mapping, Row, mapped_paths};
use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::context::ContextConfig;
use crate::json::{compact_arrays, deep_set};

/// Largest magnitude that still round-trips through an `f64` as an integer.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Builds one record per row using the default context base.
pub fn generate(rows: &[Row], mapping: &Mapping, sectors: &[String]) -> Vec<Value> {
    generate_with(rows, mapping, sectors, &ContextConfig::default())
}

/// Builds one record per row.
///
/// Each record starts with an `@context` array, then receives every mapped
/// cell at its path. Headers missing from a row are skipped; empty cells are
/// kept as empty strings. Sparse arrays are compacted last.
pub fn generate_with(
    rows: &[Row],
    mapping: &Mapping,
    sectors: &[String],
    config: &ContextConfig,
) -> Vec<Value> {
    let context: Vec<Value> = config
        .context_urls(sectors)
        .into_iter()
        .map(Value::String)
        .collect();

    let records: Vec<Value> = rows
        .iter()
        .map(|row| {
            let mut record = Map::new();
            record.insert("@context".to_string(), Value::Array(context.clone()));
            let mut record = Value::Object(record);
            for (header, path) in mapped_paths(mapping) {
                let Some(raw) = row.get(header) else {
                    continue;
                };
                deep_set(&mut record, path, coerce_value(raw));
            }
            compact_arrays(&mut record);
            record
        })
        .collect();
    debug!(records = records.len(), sectors = sectors.len(), "generated records");
    records
}

/// Turns raw cell text into a JSON primitive.
///
/// `"true"` and `"false"` become booleans; text that parses as a finite number
/// becomes a number (an integer when it has no fractional part); anything
/// else stays a string.
pub fn coerce_value(raw: &str) -> Value {
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::String(raw.to_string());
    }
    match trimmed.parse::<f64>() {
        Ok(number) if number.is_finite() => {
            if number.fract() == 0.0 && number.abs() < MAX_SAFE_INTEGER {
                Value::Number(Number::from(number as i64))
            } else {
                Number::from_f64(number)
                    .map(Value::Number)
                    .unwrap_or_else(|| Value::String(raw.to_string()))
            }
        }
        _ => Value::String(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn coerces_booleans_and_numbers() {
        assert_eq!(coerce_value("true"), json!(true));
        assert_eq!(coerce_value("false"), json!(false));
        assert_eq!(coerce_value("TRUE"), json!("TRUE"));
        assert_eq!(coerce_value(" 42 "), json!(42));
        assert_eq!(coerce_value("2.5"), json!(2.5));
        assert_eq!(coerce_value("1e3"), json!(1000));
        assert_eq!(coerce_value("inf"), json!("inf"));
        assert_eq!(coerce_value("abc"), json!("abc"));
        assert_eq!(coerce_value(""), json!(""));
    }

    #[test]
    fn missing_headers_are_skipped() {
        let mut mapping = Mapping::new();
        mapping.insert("Name".to_string(), "name".to_string());
        mapping.insert("Absent".to_string(), "other".to_string());
        mapping.insert("Ignored".to_string(), String::new());
        let rows = vec![Row::from([
            ("Name".to_string(), "Cell".to_string()),
            ("Ignored".to_string(), "x".to_string()),
        ])];

        let records = generate(&rows, &mapping, &[]);
        assert_eq!(
            records,
            vec![json!({
                "@context": ["https://dpp-keystone.org/spec/contexts/v1/dpp-core.context.jsonld"],
                "name": "Cell"
            })]
        );
    }
}
