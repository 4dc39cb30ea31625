//! Error types for cardport-core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using TransferError.
pub type Result<T> = std::result::Result<T, TransferError>;

/// A rejected input line or object.
///
/// `line` is the 1-based source position. Malformed top-level input is
/// reported at line 1 with `file_level` set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("line {line}: {message}")]
#[serde(rename_all = "camelCase")]
pub struct ParseError {
    pub line: usize,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub file_level: bool,
}

impl ParseError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
            suggestion: None,
            file_level: false,
        }
    }

    /// Error for input that could not be read as a whole.
    pub fn file_level(message: impl Into<String>) -> Self {
        Self {
            file_level: true,
            ..Self::new(1, message)
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Fatal errors that stop an operation before any work is committed.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("batch of {count} entries exceeds the limit of {limit}")]
    BatchTooLarge { count: usize, limit: usize },

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure reported by a resolver or holdings store.
#[derive(Debug, Clone, Error)]
pub enum CollaboratorError {
    #[error("lookup failed: {0}")]
    Lookup(String),

    #[error("write failed: {0}")]
    Write(String),
}
