//! Validation functions for field paths.

use crate::types::FieldPath;
use crate::{PathError, PathErrorKind};

/// Maximum allowed path text length.
pub const MAX_PATH_TEXT_LENGTH: usize = 512;

/// Maximum allowed path depth.
pub const MAX_PATH_DEPTH: usize = 32;

/// Validate a list of path segments.
///
/// `text` is the dotted form, used for the length check and error reports.
///
/// # Errors
///
/// Returns [`PathError::InvalidPath`] if:
/// - The text exceeds 512 bytes
/// - There are more than 32 segments
/// - Any segment is empty
pub fn validate_segments(text: &str, segments: &[String]) -> Result<(), PathError> {
    let fail = |kind| {
        Err(PathError::InvalidPath {
            path: text.to_string(),
            kind,
        })
    };
    if text.len() > MAX_PATH_TEXT_LENGTH {
        return fail(PathErrorKind::TooLong(MAX_PATH_TEXT_LENGTH));
    }
    if segments.len() > MAX_PATH_DEPTH {
        return fail(PathErrorKind::TooDeep(MAX_PATH_DEPTH));
    }
    if segments.iter().any(String::is_empty) {
        return fail(PathErrorKind::EmptySegment);
    }
    Ok(())
}

/// Validate a dotted path string without keeping the parsed result.
///
/// ```
/// use passdesk_path::validate_path;
///
/// validate_path("").unwrap();
/// validate_path("barcode.message").unwrap();
/// validate_path("barcode..message").unwrap_err();
/// ```
pub fn validate_path(text: &str) -> Result<(), PathError> {
    FieldPath::parse(text).map(|_| ())
}
