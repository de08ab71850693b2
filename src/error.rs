//! Error types for devlink
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using LinkError
pub type Result<T> = std::result::Result<T, LinkError>;

/// Unified error type for devlink operations
#[derive(Debug, Error)]
pub enum LinkError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("Transport initialization failed: {0}")]
    TransportInit(String),

    #[error("Send failed: {0}")]
    Send(String),

    #[error("Receive failed: {0}")]
    Recv(String),

    #[error("Timed out after {0} ms waiting for an answer")]
    TimedOut(u64),

    #[error("Receive cancelled")]
    Cancelled,

    #[error("Session not initialized")]
    NotInitialized,

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Answer does not contain code {0}")]
    NoMatchingCode(String),

    #[error("Empty value for code {0}")]
    EmptyValue(String),

    #[error("Cannot parse {value:?} as {expected}")]
    ParseFailure { value: String, expected: &'static str },

    #[error("Malformed answer: {0}")]
    MalformedAnswer(String),

    // -------------------------------------------------------------------------
    // Accessor Errors
    // -------------------------------------------------------------------------
    #[error("{field} reading {value} outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Invalid engine index {0} (expected 0..=3)")]
    InvalidEngine(usize),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl LinkError {
    /// Per-call failures a caller may simply retry or treat as "no data".
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            LinkError::Send(_)
                | LinkError::Recv(_)
                | LinkError::TimedOut(_)
                | LinkError::Cancelled
                | LinkError::NoMatchingCode(_)
                | LinkError::EmptyValue(_)
                | LinkError::ParseFailure { .. }
                | LinkError::MalformedAnswer(_)
                | LinkError::OutOfRange { .. }
        )
    }
}
