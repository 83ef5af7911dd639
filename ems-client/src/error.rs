//! Client error types

use shared::ErrorBody;
use thiserror::Error;

use crate::validation::FormErrors;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("HTTP error! status: {status}")]
    Status { status: u16, body: String },

    /// Body could not be parsed into the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Client-side form validation failed, nothing was sent
    #[error("Validation error: {0}")]
    Validation(FormErrors),

    /// Signin rejected
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Required auth form fields were blank
    #[error("{0}")]
    MissingFields(String),

    /// Action not valid for the current form state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Session storage failure
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Human-readable text shown to the user when an operation fails.
    ///
    /// Transport, status and body errors all collapse into one message; for
    /// non-2xx responses the server's own text wins when there is any.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Status { status, body } => ErrorBody::extract(body)
                .unwrap_or_else(|| format!("HTTP error! status: {status}")),
            ClientError::Http(e) if e.is_timeout() => "The request timed out".to_string(),
            ClientError::Http(e) if e.is_connect() => {
                "Could not reach the server. Please check your connection".to_string()
            }
            ClientError::Validation(errors) => errors.to_string(),
            other => other.to_string(),
        }
    }

    /// HTTP status when the server answered with a non-2xx response
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Field errors if this was a client-side validation failure
    pub fn form_errors(&self) -> Option<&FormErrors> {
        match self {
            ClientError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
