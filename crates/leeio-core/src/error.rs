//! Error types for the leeio plugin
//!
//! This module defines all internal error types used throughout the crate.
//! User-facing problems are reported as [`crate::Diagnostic`]s; an [`Error`]
//! becomes one when a data source decides how severe it is.

use thiserror::Error;

/// Result type alias for leeio operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the leeio plugin
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client errors (transport, timeout, non-success status)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Response body could not be decoded into the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// The caller cancelled the operation
    #[error("request cancelled")]
    Cancelled,

    /// Data source not registered
    #[error("Unknown data source: {0}")]
    UnknownDataSource(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create an "unknown data source" error
    pub fn unknown_data_source(name: impl Into<String>) -> Self {
        Self::UnknownDataSource(name.into())
    }

    /// Whether this error was caused by cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
