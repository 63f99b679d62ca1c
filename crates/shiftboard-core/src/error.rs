//! Core error types for shiftboard-core.
//!
//! Only configuration and argument problems are fatal. Anything that goes
//! wrong while talking to the upstream API for a single day is reported as an
//! [`UpstreamError`] and downgraded to a warning string by the fetch loop.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for shiftboard-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Upstream API errors
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable absent or empty
    #[error("Missing env {0}")]
    MissingEnv(String),

    /// Failed to load the settings file
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to parse the settings file
    #[error("Failed to parse configuration at {path}: {message}")]
    ParseFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors for caller-supplied query arguments.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Date argument is not `YYYY-MM-DD`
    #[error("Invalid date for '{field}': {value} (expected YYYY-MM-DD)")]
    InvalidDate { field: String, value: String },

    /// Unknown group or status filter name
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Errors from a single upstream request.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Non-success HTTP status
    #[error("7shifts HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Request did not complete in time
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Connection or transport failure
    #[error("network error: {0}")]
    Network(String),

    /// Request URL could not be built
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl UpstreamError {
    /// HTTP status carried by this error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
