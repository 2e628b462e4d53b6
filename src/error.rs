//! Error types for deskchat.

use std::io;
use thiserror::Error;

/// Result type alias for deskchat operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in deskchat operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The remote query failed.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Storage I/O error.
    #[error("Storage error: {0}")]
    Storage(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An exchange is already waiting for a response.
    #[error("An exchange is already in flight")]
    ExchangeInFlight,

    /// The query was empty after trimming.
    #[error("Query is empty")]
    EmptyQuery,

    /// Chat not found. Only the CLI reports this; core operations stay silent.
    #[error("Chat not found: {0}")]
    ChatNotFound(String),

    /// A destructive command was run without confirmation.
    #[error("Not confirmed: {0}")]
    NotConfirmed(String),

    /// Unknown preference key or invalid value.
    #[error("Invalid preference: {0}")]
    InvalidPreference(String),
}

/// Failure of one request/response cycle against the assistant endpoint.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// Server answered with a non-success status.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided detail, or a generic status message.
        message: String,
    },

    /// The request never produced a response (DNS, connect, TLS, ...).
    #[error("Network error: {0}")]
    Transport(String),

    /// Response body was not the expected JSON.
    #[error("Malformed response: {0}")]
    Decode(String),

    /// The configured endpoint is not a usable URL.
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),
}

impl RequestError {
    /// Build a status error, preferring the server's detail message.
    #[must_use]
    pub fn from_status(status: u16, detail: Option<String>) -> Self {
        let message = detail
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| format!("request failed with status {status}"));
        Self::Status { status, message }
    }
}
