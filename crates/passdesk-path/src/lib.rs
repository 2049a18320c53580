//! Dotted field paths over semi-structured pass records.
//!
//! A field path such as `eventTicket.secondaryFields.1.value` is a list of
//! dot-delimited segments. Each segment is an object key, or a zero-based
//! index when the node being traversed is an array.
//!
//! # Example
//!
//! ```
//! use passdesk_path::{get, set, FieldPath};
//! use serde_json::json;
//!
//! let doc = json!({"eventTicket": {"secondaryFields": [{"value": "a"}, {"value": "b"}]}});
//! let path: FieldPath = "eventTicket.secondaryFields.1.value".parse().unwrap();
//!
//! assert_eq!(get(&doc, &path).unwrap(), Some(&json!("b")));
//!
//! let next = set(&doc, &path, json!("c")).unwrap();
//! assert_eq!(get(&next, &path).unwrap(), Some(&json!("c")));
//! assert_eq!(get(&doc, &path).unwrap(), Some(&json!("b")));
//! ```

use thiserror::Error;

pub mod get;
pub mod set;
pub mod types;
pub mod validate;

pub use get::{get, get_mut, get_str};
pub use set::{set, set_in_place};
pub use types::FieldPath;
pub use validate::{validate_path, validate_segments};

/// Why a path failed to resolve.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathErrorKind {
    #[error("empty segment")]
    EmptySegment,
    #[error("segment `{0}` is not an array index")]
    NotAnIndex(String),
    #[error("index {index} is past the end of an array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("intermediate node `{0}` does not exist")]
    MissingIntermediate(String),
    #[error("node at `{0}` is not an object or array")]
    NotAContainer(String),
    #[error("path is deeper than {0} segments")]
    TooDeep(usize),
    #[error("path is longer than {0} bytes")]
    TooLong(usize),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("invalid path `{path}`: {kind}")]
    InvalidPath { path: String, kind: PathErrorKind },
}

impl PathError {
    pub(crate) fn invalid(path: &FieldPath, kind: PathErrorKind) -> Self {
        PathError::InvalidPath {
            path: path.to_string(),
            kind,
        }
    }

    /// The textual path that failed.
    pub fn path(&self) -> &str {
        match self {
            PathError::InvalidPath { path, .. } => path,
        }
    }

    pub fn kind(&self) -> &PathErrorKind {
        match self {
            PathError::InvalidPath { kind, .. } => kind,
        }
    }
}

/// Parse a non-negative array index segment.
///
/// Leading zeros, signs and whitespace are rejected so that every index has
/// exactly one spelling.
pub(crate) fn parse_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if segment.len() > 1 && segment.starts_with('0') {
        return None;
    }
    segment.parse().ok()
}

/// Check if `parent` path contains the `child` path.
///
/// ```
/// use passdesk_path::{is_child, FieldPath};
///
/// let parent: FieldPath = "eventTicket".parse().unwrap();
/// let child: FieldPath = "eventTicket.headerFields.0".parse().unwrap();
/// assert!(is_child(&parent, &child));
/// assert!(!is_child(&child, &parent));
/// ```
pub fn is_child(parent: &FieldPath, child: &FieldPath) -> bool {
    let parent = parent.segments();
    let child = child.segments();
    parent.len() < child.len() && child[..parent.len()] == *parent
}
