//! Error types for alias configuration loading and normalization.

use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Option shape errors
    #[error("invalid plugin options: expected a list of {{expose, src}} records or an options object, got {0}")]
    InvalidShape(Value),

    #[error("alias entry #{index} is missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("alias `{key}` must map to a string, got {value}")]
    NotAString { key: String, value: Value },

    #[error("invalid config value for `{field}`{}", .hint.as_ref().map(|h| format!(": {h}")).unwrap_or_default())]
    InvalidValue {
        field: String,
        hint: Option<String>,
    },

    // Alias table errors
    #[error("alias pattern `{key}` is not a valid regular expression: {reason}")]
    InvalidPattern { key: String, reason: String },

    // Root expansion errors
    #[error("root pattern `{pattern}` is invalid: {reason}")]
    InvalidRootPattern { pattern: String, reason: String },

    #[error("failed to expand root directory {}: {source}", .path.display())]
    RootExpansion {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
