//! CSV header normalization.

use std::collections::BTreeSet;

const UTF8_BOM: char = '\u{feff}';

/// Normalizes a header value by trimming whitespace and a leading BOM.
pub fn normalize_header(value: &str) -> String {
    value.trim_start_matches(UTF8_BOM).trim().to_string()
}

/// Makes header names unique so each one can key a mapping.
///
/// Repeats get a numeric suffix: `Name`, `Name (2)`, `Name (3)`. Blank
/// headers become `Column N` (1-based position).
pub fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    headers
        .into_iter()
        .enumerate()
        .map(|(idx, header)| {
            let base = if header.is_empty() {
                format!("Column {}", idx + 1)
            } else {
                header
            };
            let mut candidate = base.clone();
            let mut n = 2;
            while seen.contains(&candidate) {
                candidate = format!("{base} ({n})");
                n += 1;
            }
            if candidate != base {
                tracing::warn!(header = %base, renamed = %candidate, "duplicate CSV header renamed");
            }
            seen.insert(candidate.clone());
            candidate
        })
        .collect()
}
