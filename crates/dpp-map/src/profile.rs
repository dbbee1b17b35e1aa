//! Column content profiling.
//!
//! A column is classified from its first non-empty values using an
//! all-or-nothing hierarchy, most specific first:
//! boolean, integer, number, then string with format date-time, email, uri,
//! uri-reference, and finally plain string. A single disqualifying value drops
//! the column to the next tier.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use dpp_model::{ColumnType, ColumnTypeInfo, Row, StringFormat};
use regex::Regex;

/// Number of non-empty values inspected per column.
pub const DEFAULT_SAMPLE_LIMIT: usize = 100;

const BOOLEAN_TOKENS: [&str; 6] = ["true", "false", "0", "1", "yes", "no"];

static DATE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}(T\d{2}:\d{2}(:\d{2}(\.\d+)?)?(Z|[+-]\d{2}:\d{2})?)?$")
        .expect("valid date-time pattern")
});
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));
static URI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:\S*$").expect("valid uri pattern"));
static ABSOLUTE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/\S*$").expect("valid path pattern"));

/// Profiles the column `header` using the default sample limit.
pub fn analyze(rows: &[Row], header: &str) -> ColumnTypeInfo {
    analyze_with_limit(rows, header, DEFAULT_SAMPLE_LIMIT)
}

/// Profiles the column `header` from at most `limit` non-empty values.
pub fn analyze_with_limit(rows: &[Row], header: &str, limit: usize) -> ColumnTypeInfo {
    let samples: Vec<&str> = rows
        .iter()
        .filter_map(|row| row.get(header))
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .take(limit)
        .collect();
    classify(&samples)
}

/// Profiles every header, keyed by header.
pub fn analyze_all(rows: &[Row], headers: &[String]) -> BTreeMap<String, ColumnTypeInfo> {
    analyze_all_with_limit(rows, headers, DEFAULT_SAMPLE_LIMIT)
}

/// Profiles every header from at most `limit` non-empty values each.
pub fn analyze_all_with_limit(
    rows: &[Row],
    headers: &[String],
    limit: usize,
) -> BTreeMap<String, ColumnTypeInfo> {
    headers
        .iter()
        .map(|header| (header.clone(), analyze_with_limit(rows, header, limit)))
        .collect()
}

fn classify(samples: &[&str]) -> ColumnTypeInfo {
    if samples.is_empty() {
        return ColumnTypeInfo::empty();
    }
    if samples.iter().all(|value| is_boolean(value)) {
        return ColumnTypeInfo::new(ColumnType::Boolean);
    }
    if samples.iter().all(|value| is_integer(value)) {
        return ColumnTypeInfo::new(ColumnType::Integer);
    }
    if samples.iter().all(|value| parse_finite(value).is_some()) {
        return ColumnTypeInfo::new(ColumnType::Number);
    }
    let formats: [(&LazyLock<Regex>, StringFormat); 3] = [
        (&DATE_TIME, StringFormat::DateTime),
        (&EMAIL, StringFormat::Email),
        (&URI, StringFormat::Uri),
    ];
    for (pattern, format) in formats {
        if samples.iter().all(|value| pattern.is_match(value)) {
            return ColumnTypeInfo::string_with_format(format);
        }
    }
    if samples
        .iter()
        .all(|value| URI.is_match(value) || ABSOLUTE_PATH.is_match(value))
    {
        return ColumnTypeInfo::string_with_format(StringFormat::UriReference);
    }
    ColumnTypeInfo::new(ColumnType::String)
}

fn is_boolean(value: &str) -> bool {
    let lowered = value.to_ascii_lowercase();
    BOOLEAN_TOKENS.contains(&lowered.as_str())
}

fn is_integer(value: &str) -> bool {
    parse_finite(value).is_some_and(|number| number.fract() == 0.0)
}

/// Parses a finite real number. `inf` and `NaN` spellings are rejected.
pub(crate) fn parse_finite(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}
