//! Login / signup / password reset submission.

use serde_json::Value;
use shared::client::{CredentialsRequest, ResetPasswordRequest, TokenResponse};

use crate::client::HttpClient;
use crate::error::{ClientError, ClientResult};
use crate::session::{Session, SessionStore};
use crate::types::Page;

pub const SIGNIN_PATH: &str = "auth/signin";
pub const SIGNUP_PATH: &str = "auth/signup";
pub const RESET_PASSWORD_PATH: &str = "auth/reset-password";

/// Where to go after a successful submission, and what to tell the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    pub next: Page,
    pub message: String,
}

impl AuthOutcome {
    fn new(next: Page, message: impl Into<String>) -> Self {
        Self {
            next,
            message: message.into(),
        }
    }
}

/// Auth form being submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    Signin,
    Signup,
    ResetPassword,
}

impl AuthAction {
    /// Error text shown when the submission fails
    pub fn failure_message(self, err: &ClientError) -> String {
        match (self, err) {
            (_, ClientError::MissingFields(msg)) => msg.clone(),
            (AuthAction::Signin, err) => format!("Error: {}", err.user_message()),
            (AuthAction::Signup, err) => format!("Signup failed: {}", err.user_message()),
            (AuthAction::ResetPassword, err) => {
                format!("Password reset failed: {}", err.user_message())
            }
        }
    }
}

fn required(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

/// Auth endpoints plus session persistence
#[derive(Debug, Clone)]
pub struct AuthService<C> {
    http: C,
}

impl<C: HttpClient> AuthService<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    /// POST /auth/signin. Any non-2xx is reported as invalid credentials.
    pub async fn signin<S: SessionStore>(
        &self,
        store: &mut S,
        username: &str,
        password: &str,
    ) -> ClientResult<AuthOutcome> {
        let (Some(username), Some(password)) = (required(username), required(password)) else {
            return Err(ClientError::MissingFields(
                "Please enter both username and password.".into(),
            ));
        };

        let request = CredentialsRequest {
            user_name: username.to_string(),
            password: password.to_string(),
        };
        let response: TokenResponse = match self.http.post(SIGNIN_PATH, &request).await {
            Ok(response) => response,
            Err(ClientError::Status { status, .. }) => {
                tracing::info!(status, "signin rejected");
                return Err(ClientError::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };

        match response.token {
            Some(token) => {
                Session::persist(store, &token, username)?;
                tracing::info!(username, "signed in");
                Ok(AuthOutcome::new(Page::Dashboard, "Login successful. Redirecting..."))
            }
            None => Ok(AuthOutcome::new(
                Page::Login,
                "Login succeeded but no token was returned. Please try again.",
            )),
        }
    }

    /// POST /auth/signup
    pub async fn signup<S: SessionStore>(
        &self,
        store: &mut S,
        username: &str,
        password: &str,
    ) -> ClientResult<AuthOutcome> {
        let (Some(username), Some(password)) = (required(username), required(password)) else {
            return Err(ClientError::MissingFields(
                "Please enter both username and password to sign up.".into(),
            ));
        };

        let request = CredentialsRequest {
            user_name: username.to_string(),
            password: password.to_string(),
        };
        let response: TokenResponse = self.http.post(SIGNUP_PATH, &request).await?;

        match response.token {
            Some(token) => {
                Session::persist(store, &token, username)?;
                tracing::info!(username, "signed up");
                Ok(AuthOutcome::new(Page::Dashboard, "Signup successful. Redirecting..."))
            }
            None => Ok(AuthOutcome::new(
                Page::Login,
                "Signup successful but no token returned. Please login.",
            )),
        }
    }

    /// POST /auth/reset-password. The response body is not interpreted.
    pub async fn reset_password(&self, username: &str, new_password: &str) -> ClientResult<AuthOutcome> {
        let (Some(username), Some(new_password)) = (required(username), required(new_password))
        else {
            return Err(ClientError::MissingFields("Please fill in both fields.".into()));
        };

        let request = ResetPasswordRequest {
            user_name: username.to_string(),
            new_password: new_password.to_string(),
        };
        let _: Value = self.http.post(RESET_PASSWORD_PATH, &request).await?;
        tracing::info!(username, "password reset");
        Ok(AuthOutcome::new(
            Page::Login,
            "Password reset successful! You can now login with your new password.",
        ))
    }
}
