//! Helpers for dotted field paths with optional `[n]` item indices.
//!
//! Paths look like `physicalDimensions.weight` or `documents[1].title`. A
//! schema path never carries indices; a mapped path may.

/// One addressable step of a mapped path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Removes every `[n]` marker: `items[2].name` becomes `items.name`.
pub fn strip_indices(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut in_brackets = false;
    for ch in path.chars() {
        match ch {
            '[' => in_brackets = true,
            ']' if in_brackets => in_brackets = false,
            _ if in_brackets => {}
            _ => out.push(ch),
        }
    }
    out
}

/// Path of the enclosing object, or `""` for a root-level path.
pub fn parent_path(path: &str) -> &str {
    match path.rfind('.') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Last dot-separated component.
pub fn leaf_segment(path: &str) -> &str {
    match path.rfind('.') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Every proper dotted prefix of `path`, shortest first.
///
/// `a.b.c` yields `a`, `a.b`.
pub fn ancestors(path: &str) -> Vec<&str> {
    path.match_indices('.').map(|(idx, _)| &path[..idx]).collect()
}

/// True when `path` addresses something strictly below `prefix`.
pub fn is_child_of(path: &str, prefix: &str) -> bool {
    path.len() > prefix.len()
        && path.starts_with(prefix)
        && matches!(path.as_bytes()[prefix.len()], b'.' | b'[')
}

/// Item index applied directly to `root` in `path`.
///
/// `index_under_root("items[2].name", "items")` is `Some(2)`; an unindexed
/// path or a different root gives `None`.
pub fn index_under_root(path: &str, root: &str) -> Option<usize> {
    let rest = path.strip_prefix(root)?.strip_prefix('[')?;
    let close = rest.find(']')?;
    let index = rest[..close].parse().ok()?;
    let tail = &rest[close + 1..];
    if tail.is_empty() || tail.starts_with('.') || tail.starts_with('[') {
        Some(index)
    } else {
        None
    }
}

/// Splits a mapped path into keys and indices.
///
/// Malformed brackets are treated as part of the key so the result is always
/// usable.
pub fn parse_segments(path: &str) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    for part in path.split('.') {
        let mut rest = part;
        let key_end = rest.find('[').unwrap_or(rest.len());
        let key = &rest[..key_end];
        rest = &rest[key_end..];
        let mut indices = Vec::new();
        let mut malformed = false;
        while let Some(inner) = rest.strip_prefix('[') {
            let Some(close) = inner.find(']') else {
                malformed = true;
                break;
            };
            match inner[..close].parse::<usize>() {
                Ok(index) => indices.push(index),
                Err(_) => {
                    malformed = true;
                    break;
                }
            }
            rest = &inner[close + 1..];
        }
        if malformed || !rest.is_empty() {
            segments.push(PathSegment::Key(part.to_string()));
            continue;
        }
        if !key.is_empty() {
            segments.push(PathSegment::Key(key.to_string()));
        }
        segments.extend(indices.into_iter().map(PathSegment::Index));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_indices() {
        assert_eq!(strip_indices("items[2].name"), "items.name");
        assert_eq!(strip_indices("a[0].b[10].c"), "a.b.c");
        assert_eq!(strip_indices("plain.path"), "plain.path");
    }

    #[test]
    fn parent_and_leaf() {
        assert_eq!(parent_path("a.b.c"), "a.b");
        assert_eq!(parent_path("root"), "");
        assert_eq!(leaf_segment("a.b.c"), "c");
        assert_eq!(leaf_segment("root"), "root");
        assert_eq!(ancestors("a.b.c"), vec!["a", "a.b"]);
    }

    #[test]
    fn child_detection_respects_segment_boundary() {
        assert!(is_child_of("items.name", "items"));
        assert!(is_child_of("items[0].name", "items"));
        assert!(!is_child_of("itemsCount", "items"));
        assert!(!is_child_of("items", "items"));
    }

    #[test]
    fn index_under_root_requires_exact_root() {
        assert_eq!(index_under_root("items[2].name", "items"), Some(2));
        assert_eq!(index_under_root("items[7]", "items"), Some(7));
        assert_eq!(index_under_root("items.name", "items"), None);
        assert_eq!(index_under_root("otheritems[1].x", "items"), None);
        assert_eq!(index_under_root("a.items[3].x", "a.items"), Some(3));
    }

    #[test]
    fn parses_segments() {
        assert_eq!(
            parse_segments("documents[1].title"),
            vec![
                PathSegment::Key("documents".into()),
                PathSegment::Index(1),
                PathSegment::Key("title".into()),
            ]
        );
        assert_eq!(
            parse_segments("grid[0][2]"),
            vec![
                PathSegment::Key("grid".into()),
                PathSegment::Index(0),
                PathSegment::Index(2),
            ]
        );
        assert_eq!(
            parse_segments("odd[x].y"),
            vec![PathSegment::Key("odd[x]".into()), PathSegment::Key("y".into())]
        );
    }
}
