//! Error types for Spyglass

use crate::id::CameraId;
use thiserror::Error;

/// The main error type for Spyglass operations
#[derive(Debug, Error)]
pub enum SpyglassError {
    #[error("Camera not found: {0}")]
    CameraNotFound(CameraId),

    #[error("Host error: {0}")]
    HostError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

/// Result type alias for Spyglass operations
pub type Result<T> = std::result::Result<T, SpyglassError>;

impl From<toml::de::Error> for SpyglassError {
    fn from(err: toml::de::Error) -> Self {
        SpyglassError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for SpyglassError {
    fn from(err: toml::ser::Error) -> Self {
        SpyglassError::TomlSerError(err.to_string())
    }
}
