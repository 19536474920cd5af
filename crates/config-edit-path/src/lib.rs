//! Dotted field paths.
//!
//! A field path addresses one slot inside a configuration graph:
//! `path := segment ('.' segment)*`. The first segment always names a field
//! of the root record; later segments index lists, key maps or name fields,
//! depending on what the previous segment landed on.
//!
//! # Example
//!
//! ```
//! use config_edit_path::{format_field_path, parse_field_path, parse_index};
//!
//! let path = parse_field_path("slots.front.0");
//! assert_eq!(path, vec!["slots", "front", "0"]);
//! assert_eq!(format_field_path(&path), "slots.front.0");
//! assert_eq!(parse_index(&path[2]), Some(0));
//! ```

use thiserror::Error;

pub mod get;
pub use get::{get, get_as, get_mut, get_path};

pub mod validate;
pub use validate::{validate_field_path, validate_path, ValidationError};

/// One dot-delimited token of a field path.
pub type PathStep = String;

/// A parsed field path.
pub type Path = Vec<PathStep>;

/// Separator between path segments.
pub const SEPARATOR: char = '.';

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldPathError {
    #[error("path has no parent")]
    NoParent,
    #[error("segment {0} is not a valid list index")]
    InvalidIndex(String),
}

/// Split a field path into its segments.
///
/// The empty string is the empty path. No other normalization happens: empty
/// segments are preserved so that [`validate_path`] can reject them.
///
/// ```
/// use config_edit_path::parse_field_path;
///
/// assert_eq!(parse_field_path(""), Vec::<String>::new());
/// assert_eq!(parse_field_path("a..b"), vec!["a", "", "b"]);
/// ```
pub fn parse_field_path(path: &str) -> Vec<String> {
    if path.is_empty() {
        return Vec::new();
    }
    path.split(SEPARATOR).map(str::to_string).collect()
}

/// Join segments back into a field path.
pub fn format_field_path(path: &[String]) -> String {
    path.join(".")
}

/// Parse a segment as a list index.
///
/// Accepts what an invariant-culture 32-bit integer parse accepts
/// (surrounding whitespace, an optional sign) and rejects negative values.
///
/// ```
/// use config_edit_path::parse_index;
///
/// assert_eq!(parse_index("3"), Some(3));
/// assert_eq!(parse_index(" +7 "), Some(7));
/// assert_eq!(parse_index("-1"), None);
/// assert_eq!(parse_index("1.5"), None);
/// assert_eq!(parse_index("99999999999"), None);
/// ```
pub fn parse_index(segment: &str) -> Option<usize> {
    let value: i32 = segment.trim().parse().ok()?;
    usize::try_from(value).ok()
}

/// Like [`parse_index`], with an error naming the segment.
pub fn index(segment: &str) -> Result<usize, FieldPathError> {
    parse_index(segment).ok_or_else(|| FieldPathError::InvalidIndex(segment.to_string()))
}

pub fn is_valid_index(segment: &str) -> bool {
    parse_index(segment).is_some()
}

pub fn is_root(path: &[String]) -> bool {
    path.is_empty()
}

/// Check if `parent` is a strict prefix of `child`.
///
/// ```
/// use config_edit_path::{is_child, parse_field_path};
///
/// let parent = parse_field_path("slots");
/// let child = parse_field_path("slots.a.enabled");
/// assert!(is_child(&parent, &child));
/// assert!(!is_child(&child, &parent));
/// ```
pub fn is_child(parent: &[String], child: &[String]) -> bool {
    parent.len() < child.len() && child.starts_with(parent)
}

pub fn parent(path: &[String]) -> Result<Vec<String>, FieldPathError> {
    match path.split_last() {
        Some((_, rest)) => Ok(rest.to_vec()),
        None => Err(FieldPathError::NoParent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_field_path() {
        assert_eq!(parse_field_path("a"), path(&["a"]));
        assert_eq!(parse_field_path("a.b.c"), path(&["a", "b", "c"]));
        // Trailing separator yields an empty segment
        assert_eq!(parse_field_path("a."), path(&["a", ""]));
        // Whitespace is part of the segment
        assert_eq!(parse_field_path(" a .b"), path(&[" a ", "b"]));
    }

    #[test]
    fn test_format_field_path() {
        assert_eq!(format_field_path(&[]), "");
        assert_eq!(format_field_path(&path(&["a", "0", "b"])), "a.0.b");
    }

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index("0"), Some(0));
        assert_eq!(parse_index("007"), Some(7));
        assert_eq!(parse_index("-0"), Some(0));
        assert_eq!(parse_index(""), None);
        assert_eq!(parse_index("abc"), None);
        assert_eq!(parse_index("2147483647"), Some(2147483647));
        assert_eq!(parse_index("2147483648"), None);
    }

    #[test]
    fn test_index_error_names_segment() {
        assert_eq!(index("x"), Err(FieldPathError::InvalidIndex("x".to_string())));
        assert_eq!(
            FieldPathError::InvalidIndex("x".into()).to_string(),
            "segment x is not a valid list index"
        );
    }

    #[test]
    fn test_is_root() {
        assert!(is_root(&[]));
        assert!(!is_root(&path(&["a"])));
    }

    #[test]
    fn test_is_child() {
        let parent = path(&["foo"]);
        let child = path(&["foo", "bar"]);
        let sibling = path(&["baz", "bar"]);
        assert!(is_child(&parent, &child));
        assert!(!is_child(&parent, &sibling));
        assert!(!is_child(&parent, &parent));
    }

    #[test]
    fn test_parent() {
        assert_eq!(parent(&path(&["a", "b"])), Ok(path(&["a"])));
        assert_eq!(parent(&path(&["a"])), Ok(Vec::new()));
        assert_eq!(parent(&[]), Err(FieldPathError::NoParent));
    }
}
