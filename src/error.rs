//! # Error Types
//!
//! This module defines the error type used throughout the relay.

use thiserror::Error;

/// Main error type for relay operations
#[derive(Debug, Error)]
pub enum RelayError {
    /// The printer could not be reached (refused, unreachable, DNS failure)
    #[error("Connection failed: {0}")]
    Connection(String),

    /// A bounded socket phase did not complete in time
    #[error("Timeout: {0}")]
    Timeout(String),

    /// The ticket payload cannot be formatted
    #[error("Invalid ticket: {0}")]
    InvalidTicket(String),

    /// Invalid printer or relay configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// HTTP server failure (bind, accept loop)
    #[error("Server error: {0}")]
    Server(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Request body or ticket file is not a valid ticket document
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for relay operations
pub type Result<T> = std::result::Result<T, RelayError>;
