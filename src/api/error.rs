//! API error types

use thiserror::Error;

/// Errors that can occur talking to the record server
///
/// The session layer collapses all of these into one generic user-facing
/// message; the underlying cause only goes to the diagnostic channel.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connection refused, timeout, bad TLS, ...)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("HTTP error! Status: {status}")]
    Status { status: u16 },

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The configured base URL (or a path joined onto it) does not parse
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Local I/O failure while preparing a request (e.g. reading an upload)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
