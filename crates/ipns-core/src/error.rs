//! Error types for the IPNS RPC client
//!
//! This module defines all error types used throughout the workspace.
//! Operations on [`crate::IpnsClient`] never wrap or reclassify these; an
//! error raised by the request layer reaches the caller as-is.

use thiserror::Error;

/// Result type alias for IPNS RPC operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the IPNS RPC client
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport errors (connection refused, timeout, unexpected status)
    #[error("HTTP error: {0}")]
    Http(String),

    /// The daemon rejected the command and returned an error body
    #[error("Daemon error ({command}): {message}")]
    Daemon {
        /// RPC command that failed (e.g. "name/publish")
        command: String,
        /// Message reported by the daemon
        message: String,
        /// Numeric error code reported by the daemon
        code: i64,
    },

    /// Authentication errors
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Command or record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// JSON response body did not match the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary response body is not a valid protocol-buffer record
    #[error("Protobuf decode error: {0}")]
    Protobuf(#[from] prost::DecodeError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create a daemon-side rejection error
    pub fn daemon(command: impl Into<String>, message: impl Into<String>, code: i64) -> Self {
        Self::Daemon {
            command: command.into(),
            message: message.into(),
            code,
        }
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daemon_error_display() {
        let err = Error::daemon("name/resolve", "could not resolve name", 0);
        assert_eq!(
            err.to_string(),
            "Daemon error (name/resolve): could not resolve name"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
