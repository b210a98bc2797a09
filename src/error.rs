//! Unified error types for pomon
//!
//! This module defines all error types used throughout the application.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from configuration parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error querying the miss counter
    #[error("Metric source error: {0}")]
    Source(#[from] SourceError),

    /// Error delivering a notification
    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    /// Signal handler could not be installed
    #[error("Failed to install shutdown handler: {0}")]
    Signal(String),

    /// IO error (file operations, stdout)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from configuration parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Failed to parse config file
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid config value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Missing required config field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// Global threshold combined with a service threshold
    #[error("Global thresholds cannot be used with service specific thresholds")]
    ConflictingThresholds,

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Errors from the LCD miss-counter query
#[derive(Error, Debug)]
pub enum SourceError {
    /// Every configured endpoint failed or returned a non-200 status
    #[error("All {attempted} endpoint(s) failed for {address}: {last_error}")]
    AllEndpointsFailed {
        address: String,
        attempted: usize,
        last_error: String,
    },

    /// No endpoints configured
    #[error("No LCD endpoints configured")]
    NoEndpoints,

    /// Response body did not contain a usable miss counter
    #[error("Malformed response from {endpoint}: {message}")]
    Malformed { endpoint: String, message: String },

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Errors from notification delivery
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Request never produced a response
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timed out
    #[error("Request timeout")]
    Timeout,

    /// Remote service answered with a non-success status
    #[error("{service} rejected notification: {status} - {message}")]
    Rejected {
        service: String,
        status: u16,
        message: String,
    },
}

impl From<reqwest::Error> for NotifyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NotifyError::Timeout
        } else {
            NotifyError::Http(err.to_string())
        }
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
