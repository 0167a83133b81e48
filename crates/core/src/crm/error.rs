//! Collaborator service errors.

use thiserror::Error;

/// Errors returned by CRM collaborator services.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The requested record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The service answered with a non-success status.
    #[error("Service returned status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// The service could not be reached or timed out.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}
