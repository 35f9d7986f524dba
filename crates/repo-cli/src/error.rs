//! Error types for repo-cli

use std::path::PathBuf;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from repo-sync
    #[error(transparent)]
    Sync(#[from] repo_sync::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Manifest could not be parsed
    #[error("Failed to parse {format} manifest at {}: {message}", .path.display())]
    Config {
        path: PathBuf,
        format: String,
        message: String,
    },

    /// Manifest extension is not one of toml, json, yaml, yml
    #[error("Unsupported manifest format: {extension}")]
    UnsupportedFormat { extension: String },

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
