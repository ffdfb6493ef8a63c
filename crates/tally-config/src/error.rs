//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration operation result type.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Cannot read configuration {path}: {source}")]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file extension does not name a supported format.
    #[error("Unsupported configuration format: {path}")]
    UnsupportedFormat {
        /// File with the unrecognized extension.
        path: PathBuf,
    },

    /// JSON deserialization error.
    #[error("Invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("Invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),
}
