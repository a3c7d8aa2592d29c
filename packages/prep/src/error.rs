//! Error types for text preparation.
//!
//! Normalization and segmentation themselves never fail; errors come from
//! the edges: decoding input, loading configuration and writing output.

use thiserror::Error;

/// Main error type for the prep library.
#[derive(Debug, Error)]
pub enum PrepError {
    /// Encoding label not known to the WHATWG encoding standard.
    #[error("Unknown encoding: '{0}'. Expected a label such as windows-1252, latin1 or utf-8")]
    UnknownEncoding(String),

    /// Configuration value rejected by validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Marker pattern could not be compiled.
    #[error("Invalid marker pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (de)serialization error.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for prep operations.
pub type Result<T> = std::result::Result<T, PrepError>;
