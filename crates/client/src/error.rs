//! Client construction errors and transport error mapping.

use crm_core::crm::ServiceError;
use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while building an [`crate::HttpCrmClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The base URL is not an absolute http(s) URL.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The underlying HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Longest upstream error body kept in a [`ServiceError::Status`] message.
const MAX_ERROR_BODY: usize = 200;

/// Maps a `reqwest` failure to a service error.
pub(crate) fn from_reqwest(err: &reqwest::Error) -> ServiceError {
    if err.is_decode() {
        ServiceError::Decode(err.to_string())
    } else {
        ServiceError::Transport(err.to_string())
    }
}

/// Maps a non-success status to a service error.
pub(crate) fn from_status(status: StatusCode, what: &str, body: &str) -> ServiceError {
    if status == StatusCode::NOT_FOUND {
        return ServiceError::NotFound(what.to_string());
    }
    let body = body.trim();
    let message = if body.is_empty() {
        status.canonical_reason().unwrap_or("unknown status").to_string()
    } else {
        body.chars().take(MAX_ERROR_BODY).collect()
    };
    ServiceError::Status {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        assert_eq!(
            from_status(StatusCode::NOT_FOUND, "alert 42", "ignored"),
            ServiceError::NotFound("alert 42".into())
        );
    }

    #[test]
    fn test_status_uses_reason_when_body_empty() {
        assert_eq!(
            from_status(StatusCode::BAD_GATEWAY, "deals", "  "),
            ServiceError::Status {
                status: 502,
                message: "Bad Gateway".into()
            }
        );
    }

    #[test]
    fn test_status_truncates_long_body() {
        let body = "x".repeat(500);
        let ServiceError::Status { message, .. } =
            from_status(StatusCode::INTERNAL_SERVER_ERROR, "deals", &body)
        else {
            panic!("expected status error");
        };
        assert_eq!(message.len(), MAX_ERROR_BODY);
    }
}
