//! Core error types for menuplan-core.
//!
//! One enum per concern, aggregated into [`CoreError`] so facade
//! callers handle a single error surface.

use std::path::PathBuf;
use thiserror::Error;

use crate::units::Unit;

/// Core error type for menuplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Remote API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Local store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Unit conversion errors
    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),
}

/// Errors from the remote REST surface.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure (DNS, refused connection, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response from the server
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from the local persistent store.
///
/// Reads never produce these; a missing or undecodable value falls
/// back to the caller-supplied default. Only writes can fail.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write configuration to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    SerializeFailed(#[from] toml::ser::Error),
}

/// Unit conversion errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionError {
    /// The units do not share a class (mass or volume)
    #[error("Cannot convert {from} to {to}")]
    Incompatible { from: Unit, to: Unit },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
