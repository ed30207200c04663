//! Error types for source transforms.

use std::path::PathBuf;

use modalias_config::ConfigError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TransformError>;

#[derive(Debug, Error)]
pub enum TransformError {
    /// Options could not be turned into an alias table; the whole file is skipped.
    #[error("invalid alias configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}
