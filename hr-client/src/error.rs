//! Client error types

use reqwest::StatusCode;
use shared::error::ApiResponse;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No or rejected token; the session has been cleared
    #[error("Authentication required: {message}")]
    Unauthorized { code: u16, message: String },

    /// Role not allowed
    #[error("Permission denied: {message}")]
    Forbidden { code: u16, message: String },

    #[error("Not found: {message}")]
    NotFound { code: u16, message: String },

    /// Unique key already taken
    #[error("Conflict: {message}")]
    Conflict { code: u16, message: String },

    /// Rejected input, including a duplicate registration
    #[error("Validation error: {message}")]
    Validation { code: u16, message: String },

    #[error("Too many requests: {message}")]
    RateLimited { code: u16, message: String },

    /// Server failure; the message is the server's generic one
    #[error("Internal error: {message}")]
    Internal { code: u16, message: String },

    /// Token missing, undecodable or expired on the client side
    #[error("Session error: {0}")]
    Session(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Map a failed response to the matching variant
    pub(crate) fn from_response(status: StatusCode, text: &str) -> Self {
        let (code, message) = match serde_json::from_str::<ApiResponse>(text) {
            Ok(body) => (body.code, body.message),
            Err(_) => (0, text.to_string()),
        };

        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized { code, message },
            StatusCode::FORBIDDEN => Self::Forbidden { code, message },
            StatusCode::NOT_FOUND => Self::NotFound { code, message },
            StatusCode::CONFLICT => Self::Conflict { code, message },
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Self::Validation { code, message }
            }
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited { code, message },
            _ => Self::Internal { code, message },
        }
    }

    /// Server error code, when the failure came from the server
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { code, .. }
            | Self::Forbidden { code, .. }
            | Self::NotFound { code, .. }
            | Self::Conflict { code, .. }
            | Self::Validation { code, .. }
            | Self::RateLimited { code, .. }
            | Self::Internal { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
