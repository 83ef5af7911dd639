//! Auth-related types shared between server and client
//!
//! Request/response bodies for the `/auth/*` endpoints.

use serde::{Deserialize, Serialize};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Signin / signup request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
    pub user_name: String,
    pub password: String,
}

/// Reset password request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub user_name: String,
    pub new_password: String,
}

/// Signin / signup response
///
/// Signup may succeed without issuing a token, in which case only
/// `message` is present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
