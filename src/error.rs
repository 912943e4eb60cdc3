//! Error types for proxysock
//!
//! Provides a unified error type for command building, transport and parsing.

use thiserror::Error;

/// Result type alias using ProxyError
pub type Result<T> = std::result::Result<T, ProxyError>;

/// Unified error type for proxysock operations
#[derive(Debug, Error)]
pub enum ProxyError {
    // -------------------------------------------------------------------------
    // Caller Errors (raised before any I/O)
    // -------------------------------------------------------------------------
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("Transport failure: {0}")]
    Transport(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Server Response Errors
    // -------------------------------------------------------------------------
    /// The server reported an error, or answered with an unexpected shape.
    /// Carries the server text verbatim.
    #[error("{0}")]
    Protocol(String),

    #[error("unsupported \"show servers state\" output, only version 1 is supported, received version {0}")]
    UnsupportedVersion(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No output")]
    EmptyOutput,

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ProxyError {
    /// Server text attached to this error, if the error came from a response
    pub fn body(&self) -> Option<&str> {
        match self {
            ProxyError::Protocol(body) | ProxyError::NotFound(body) => Some(body),
            _ => None,
        }
    }
}
