//! Text normalization helpers shared by the scorer and the auto-mapper.

/// Canonical comparison form: `%` spelled out, lowercase, ASCII alphanumerics only.
pub fn normalize(raw: &str) -> String {
    raw.replace('%', "Percentage")
        .to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Splits on camel-case boundaries, dots, whitespace, underscores, and hyphens.
///
/// Tokens are lowercased and stripped of non-alphanumerics; empty tokens are
/// dropped.
pub fn tokenize(raw: &str) -> Vec<String> {
    let expanded = raw.replace('%', "Percentage");
    let mut spaced = String::with_capacity(expanded.len() + 8);
    let mut prev_lower = false;
    for ch in expanded.chars() {
        if prev_lower && ch.is_uppercase() {
            spaced.push(' ');
        }
        if matches!(ch, '.' | '_' | '-') {
            spaced.push(' ');
        } else {
            spaced.push(ch);
        }
        prev_lower = ch.is_lowercase();
    }
    spaced
        .split_whitespace()
        .map(normalize)
        .filter(|token| !token.is_empty())
        .collect()
}

/// First letter of every camel-case segment (`productWeight` -> `pW`).
fn camel_initials(raw: &str) -> String {
    raw.chars()
        .enumerate()
        .filter(|(idx, ch)| *idx == 0 || ch.is_uppercase())
        .map(|(_, ch)| ch)
        .collect()
}

/// Acronym of a free-text header.
///
/// Headers with spaces use the first character of each word; others use
/// camel-case initials.
pub fn header_acronym(header: &str) -> String {
    if header.contains(' ') {
        header
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect()
    } else {
        camel_initials(header)
    }
}

/// Acronym of a dotted field path.
///
/// Short all-lowercase segments (fewer than 4 characters) are kept literally,
/// every other segment contributes its camel-case initials.
pub fn field_acronym(path: &str) -> String {
    path.split('.')
        .map(|segment| {
            let short = segment.chars().count() < 4;
            if short && !segment.chars().any(char::is_uppercase) {
                segment.to_string()
            } else {
                camel_initials(segment)
            }
        })
        .collect()
}

/// Header text without bracketed annotations such as units.
///
/// `Weight (kg)` becomes `Weight`; `Price [EUR] net` becomes `Price net`.
pub fn strip_annotations(header: &str) -> String {
    let mut out = String::with_capacity(header.len());
    let mut depth = 0usize;
    for ch in header.chars() {
        match ch {
            '(' | '[' => depth += 1,
            ')' | ']' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(ch),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Integer value of the first run of ASCII digits in `raw`.
///
/// Only the first run counts, so `Item2024Name3` yields 2024. Runs too long for
/// `u64` saturate.
pub fn first_number(raw: &str) -> Option<u64> {
    let start = raw.find(|ch: char| ch.is_ascii_digit())?;
    let digits: String = raw[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    Some(digits.parse().unwrap_or(u64::MAX))
}
