//! Error types for the remote API client.

use thiserror::Error;

/// Errors returned by [`super::StorefrontApi`] operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, TLS).
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The response body did not match the expected shape.
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// The server rejected the session token.
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Server-provided reason, may be empty.
        message: String,
    },

    /// The server returned a non-success status with an error body.
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Top-level `message` field from the error body.
        message: String,
        /// Field-level validation errors, when the server sends them.
        errors: Vec<String>,
    },
}

impl ApiError {
    /// Whether this error should invalidate the local session.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// The message to surface to the user.
    ///
    /// Validation errors are joined with `", "`; otherwise the server's
    /// message is used when present, and `fallback` covers everything else.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api {
                message, errors, ..
            } => {
                if !errors.is_empty() {
                    errors.join(", ")
                } else if message.is_empty() {
                    fallback.to_string()
                } else {
                    message.clone()
                }
            }
            Self::Unauthorized { message } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}
