//! The `FieldPath` descriptor.

use std::fmt;
use std::str::FromStr;

use crate::validate::validate_segments;
use crate::PathError;

/// A dotted path into a record, e.g. `eventTicket.headerFields.0.value`.
///
/// The empty string addresses the root. Paths are validated on
/// construction, so a `FieldPath` never holds an empty segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// The root path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a dotted path.
    ///
    /// ```
    /// use passdesk_path::FieldPath;
    ///
    /// let path = FieldPath::parse("eventTicket.auxiliaryFields.2.value").unwrap();
    /// assert_eq!(path.segments(), ["eventTicket", "auxiliaryFields", "2", "value"]);
    /// assert!(FieldPath::parse("eventTicket..value").is_err());
    /// assert!(FieldPath::parse("").unwrap().is_root());
    /// ```
    pub fn parse(text: &str) -> Result<Self, PathError> {
        let segments: Vec<String> = if text.is_empty() {
            Vec::new()
        } else {
            text.split('.').map(str::to_string).collect()
        };
        validate_segments(text, &segments)?;
        Ok(Self { segments })
    }

    /// Build a path from already split segments.
    pub fn from_segments<I, S>(segments: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        validate_segments(&segments.join("."), &segments)?;
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Path of the container holding the addressed node. `None` for the root.
    pub fn parent(&self) -> Option<FieldPath> {
        if self.segments.is_empty() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Final segment, if any.
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Extend the path with one more segment.
    pub fn child(&self, segment: impl Into<String>) -> Result<FieldPath, PathError> {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self::from_segments(segments)
    }

    /// Extend the path with an array index.
    pub fn index(&self, index: usize) -> FieldPath {
        let mut segments = self.segments.clone();
        segments.push(index.to_string());
        Self { segments }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for FieldPath {
    type Error = PathError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}
