//! Error types for the CLI.

use std::path::PathBuf;

use thiserror::Error;

/// CLI-specific result type.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
pub enum CliError {
    /// Header error.
    #[error("header error: {0}")]
    Header(#[from] hdrkit_core::HeaderError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// File not found.
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    /// Invalid tag-name configuration.
    #[error("invalid tag names: {0}")]
    Config(String),
}
