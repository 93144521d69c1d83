//! Core error types for strive-core.
//!
//! This module defines the error hierarchy using thiserror. Pure
//! computations (schedule evaluation, progress aggregation, rollups)
//! never produce errors; everything here comes from validation at the
//! edges, configuration I/O, or the backend store.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for strive-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Backend store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Errors from the hosted backend (auth + habit storage).
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend answered with a non-success status
    #[error("Backend error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Payload could not be serialized or parsed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No session; the caller must sign in first
    #[error("Not signed in")]
    AuthRequired,

    /// The configured backend URL is not a valid URL
    #[error("Invalid backend URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// Reading or writing the stored session failed
    #[error("Session storage error: {0}")]
    SessionStorage(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors raised at habit creation, before the core logic
/// ever sees the habit.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Empty collection
    #[error("Empty collection: {0}")]
    EmptyCollection(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
