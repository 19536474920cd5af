//! Validation limits for field paths.

use thiserror::Error;

/// Maximum allowed path string length, in bytes.
pub const MAX_PATH_LENGTH: usize = 1024;

/// Maximum allowed number of segments.
pub const MAX_SEGMENTS: usize = 256;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("path is empty")]
    EmptyPath,
    #[error("path is longer than 1024 bytes")]
    PathTooLong,
    #[error("path has more than 256 segments")]
    TooManySegments,
    #[error("segment {step} is empty")]
    EmptySegment { step: usize },
}

/// Validate a field path string.
///
/// ```
/// use config_edit_path::{validate_field_path, ValidationError};
///
/// validate_field_path("slots.a.enabled").unwrap();
/// assert_eq!(validate_field_path(""), Err(ValidationError::EmptyPath));
/// assert_eq!(validate_field_path("a..b"), Err(ValidationError::EmptySegment { step: 1 }));
/// ```
pub fn validate_field_path(path: &str) -> Result<(), ValidationError> {
    if path.is_empty() {
        return Err(ValidationError::EmptyPath);
    }
    if path.len() > MAX_PATH_LENGTH {
        return Err(ValidationError::PathTooLong);
    }
    let segments: Vec<String> = crate::parse_field_path(path);
    validate_path(&segments)
}

/// Validate already-split segments.
pub fn validate_path(path: &[String]) -> Result<(), ValidationError> {
    if path.is_empty() {
        return Err(ValidationError::EmptyPath);
    }
    if path.len() > MAX_SEGMENTS {
        return Err(ValidationError::TooManySegments);
    }
    match path.iter().position(|s| s.is_empty()) {
        Some(step) => Err(ValidationError::EmptySegment { step }),
        None => Ok(()),
    }
}
