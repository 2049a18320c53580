//! Error types shared by the editing session and the bulk engine.

use passdesk_path::PathError;
use thiserror::Error;

/// Failure reported by a [`PassStore`](crate::store::PassStore) or
/// [`AssetStore`](crate::store::AssetStore) implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("pass `{0}` not found")]
    NotFound(String),
    #[error("transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PassError {
    #[error(transparent)]
    InvalidPath(#[from] PathError),
    #[error("invalid color `{value}`{}", field_suffix(.field))]
    InvalidColor { field: Option<String>, value: String },
    #[error("invalid timestamp `{value}`{}", field_suffix(.field))]
    InvalidTimestamp { field: Option<String>, value: String },
    #[error("pass `{0}` not found")]
    NotFound(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("auxiliary fields are neither seated nor standing ({count} entries)")]
    VariantMismatch { count: usize },
    #[error("invalid pass record: {0}")]
    InvalidRecord(String),
    #[error("configuration error: {0}")]
    Config(String),
}

fn field_suffix(field: &Option<String>) -> String {
    match field {
        Some(f) => format!(" at `{f}`"),
        None => String::new(),
    }
}

impl PassError {
    pub(crate) fn color(value: &str) -> Self {
        PassError::InvalidColor {
            field: None,
            value: value.to_string(),
        }
    }

    pub(crate) fn timestamp(value: &str) -> Self {
        PassError::InvalidTimestamp {
            field: None,
            value: value.to_string(),
        }
    }

    /// Attach the field path a codec error belongs to.
    pub(crate) fn at(self, path: &str) -> Self {
        match self {
            PassError::InvalidColor { value, .. } => PassError::InvalidColor {
                field: Some(path.to_string()),
                value,
            },
            PassError::InvalidTimestamp { value, .. } => PassError::InvalidTimestamp {
                field: Some(path.to_string()),
                value,
            },
            other => other,
        }
    }

    /// The record field this error is attributed to, when known.
    pub fn field(&self) -> Option<&str> {
        match self {
            PassError::InvalidPath(e) => Some(e.path()),
            PassError::InvalidColor { field, .. } | PassError::InvalidTimestamp { field, .. } => {
                field.as_deref()
            }
            _ => None,
        }
    }
}

impl From<StoreError> for PassError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(serial) => PassError::NotFound(serial),
            StoreError::Transport(msg) => PassError::Transport(msg),
        }
    }
}

impl From<serde_json::Error> for PassError {
    fn from(err: serde_json::Error) -> Self {
        PassError::InvalidRecord(err.to_string())
    }
}

pub type Result<T, E = PassError> = std::result::Result<T, E>;
