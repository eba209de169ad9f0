//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File not found at the specified path.
    #[error("configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// Reading or merging the configuration sources failed.
    #[error("failed to load configuration: {0}")]
    LoadError(String),

    /// Invalid configuration value.
    #[error("invalid configuration: {message}")]
    ValidationError { message: String },

    /// Missing required field.
    #[error("missing required configuration field: {field}")]
    MissingField { field: String },

    /// Duplicate entry in the channel list.
    #[error("duplicate channel in configuration: {0}")]
    DuplicateChannel(String),
}

impl ConfigError {
    /// Creates a validation error with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    /// Creates a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
