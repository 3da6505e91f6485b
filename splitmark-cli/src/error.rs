//! Error handling for the CLI application

use thiserror::Error;

/// Custom error type for CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    /// File not found or inaccessible
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Invalid file pattern
    #[error("Invalid file pattern: {0}")]
    InvalidPattern(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Malformed input document
    #[error("Invalid input in {path}: {reason}")]
    InvalidInput { path: String, reason: String },

    /// One or more files failed to process
    #[error("Processing error: {0}")]
    ProcessingError(String),
}

impl From<splitmark_core::ConfigError> for CliError {
    fn from(err: splitmark_core::ConfigError) -> Self {
        CliError::ConfigError(err.to_string())
    }
}
