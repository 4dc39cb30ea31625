//! Error handling for the command-line host

use std::path::PathBuf;

use cardport_core::TransferError;
use thiserror::Error;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input rejected: {0}")]
    InputRejected(String),

    #[error(transparent)]
    Transfer(#[from] TransferError),
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
