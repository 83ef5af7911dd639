//! API error payloads
//!
//! The backend reports failures as small JSON objects, for example
//! `{"error": "Username is already taken."}`.

use serde::{Deserialize, Serialize};

/// Error body returned with non-2xx responses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            message: None,
        }
    }

    /// Best human-readable text carried by the body
    pub fn text(&self) -> Option<&str> {
        self.error
            .as_deref()
            .or(self.message.as_deref())
            .filter(|s| !s.trim().is_empty())
    }

    /// Extract a message from a raw response body.
    ///
    /// Returns the `error`/`message` field when the body is such an object,
    /// otherwise the trimmed raw text. Empty bodies yield `None`.
    pub fn extract(raw: &str) -> Option<String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match serde_json::from_str::<ErrorBody>(raw) {
            Ok(body) if body.text().is_some() => body.text().map(str::to_string),
            _ => Some(raw.to_string()),
        }
    }
}
