//! Client error types

use thiserror::Error;

/// Client error type
///
/// `Display` is the text shown to the farmer.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Input rejected before any network call
    #[error("{0}")]
    Validation(String),

    /// HTTP request failed (unreachable, reset, undecodable body)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("{message}")]
    Api { status: u16, message: String },

    /// 2xx response whose body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// 2xx response missing a field the operation depends on
    #[error("{0}")]
    MissingField(String),

    /// Backend answered `success: false`
    #[error("{0}")]
    Rejected(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Operation not valid in the current client state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Shorthand for a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::Validation(message.into())
    }

    /// Whether this failure came from the transport rather than the backend's answer.
    ///
    /// The signing chain only moves to its next strategy on transport failures.
    /// A 2xx body that does not decode is the backend breaking its contract, not
    /// a transport failure.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Http(_) | ClientError::Api { .. })
    }

    /// Whether the input was rejected locally
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
