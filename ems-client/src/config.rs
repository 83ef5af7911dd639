//! Client configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | EMS_BASE_URL | http://localhost:8080 | Backend base URL |
//! | EMS_AUTH_MODE | bearer | `bearer` sends the stored token, `none` does not |
//! | EMS_TIMEOUT_SECS | 30 | Request timeout |
//! | EMS_SESSION_PATH | .ems/session.json | Persistent session storage |
//! | EMS_RENDER_STYLE | cards | `cards` or `table` |

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::client::NetworkHttpClient;
use crate::error::{ClientError, ClientResult};
use crate::render::RenderStyle;
use crate::session::FileSessionStore;

/// Whether employee endpoints carry the bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// No `Authorization` header, no session gate
    None,
    /// `Authorization: Bearer <token>` and session-gated dashboard
    #[default]
    Bearer,
}

impl AuthMode {
    pub fn is_bearer(self) -> bool {
        matches!(self, AuthMode::Bearer)
    }
}

impl FromStr for AuthMode {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "off" => Ok(AuthMode::None),
            "bearer" | "jwt" => Ok(AuthMode::Bearer),
            other => Err(ClientError::Config(format!("unknown auth mode: {other}"))),
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMode::None => write!(f, "none"),
            AuthMode::Bearer => write!(f, "bearer"),
        }
    }
}

/// Client configuration for connecting to the EMS backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Auth handling for employee endpoints
    pub auth_mode: AuthMode,

    /// Bearer token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Session file path
    pub session_path: PathBuf,

    /// How employee lists are rendered
    pub render_style: RenderStyle,
}

impl ClientConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8080";
    pub const DEFAULT_SESSION_PATH: &'static str = ".ems/session.json";

    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_mode: AuthMode::default(),
            token: None,
            timeout: 30,
            session_path: PathBuf::from(Self::DEFAULT_SESSION_PATH),
            render_style: RenderStyle::default(),
        }
    }

    /// Load configuration from process environment variables
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Unset keys keep their defaults; set but unparsable keys are errors.
    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config =
            Self::new(lookup("EMS_BASE_URL").unwrap_or_else(|| Self::DEFAULT_BASE_URL.into()));

        if let Some(mode) = lookup("EMS_AUTH_MODE") {
            config.auth_mode = mode.parse()?;
        }
        if let Some(timeout) = lookup("EMS_TIMEOUT_SECS") {
            config.timeout = timeout
                .trim()
                .parse()
                .map_err(|_| ClientError::Config(format!("invalid EMS_TIMEOUT_SECS: {timeout}")))?;
        }
        if let Some(path) = lookup("EMS_SESSION_PATH") {
            config.session_path = PathBuf::from(path);
        }
        if let Some(style) = lookup("EMS_RENDER_STYLE") {
            config.render_style = style.parse()?;
        }
        Ok(config)
    }

    /// Set the auth mode
    pub fn with_auth_mode(mut self, auth_mode: AuthMode) -> Self {
        self.auth_mode = auth_mode;
        self
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the session file path
    pub fn with_session_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_path = path.into();
        self
    }

    /// Set the render style
    pub fn with_render_style(mut self, style: RenderStyle) -> Self {
        self.render_style = style;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<NetworkHttpClient> {
        NetworkHttpClient::new(self)
    }

    /// Open the persistent session store
    pub fn open_session_store(&self) -> ClientResult<FileSessionStore> {
        FileSessionStore::open(&self.session_path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.auth_mode, AuthMode::Bearer);
        assert_eq!(config.timeout, 30);
        assert_eq!(config.session_path, PathBuf::from(".ems/session.json"));
        assert_eq!(config.render_style, RenderStyle::Cards);
        assert!(config.token.is_none());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("EMS_BASE_URL", "https://ems.example.com"),
            ("EMS_AUTH_MODE", "none"),
            ("EMS_TIMEOUT_SECS", "5"),
            ("EMS_SESSION_PATH", "/tmp/ems.json"),
            ("EMS_RENDER_STYLE", "table"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://ems.example.com");
        assert_eq!(config.auth_mode, AuthMode::None);
        assert_eq!(config.timeout, 5);
        assert_eq!(config.session_path, PathBuf::from("/tmp/ems.json"));
        assert_eq!(config.render_style, RenderStyle::Table);
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        let err = ClientConfig::from_lookup(lookup_from(&[("EMS_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));

        let err =
            ClientConfig::from_lookup(lookup_from(&[("EMS_AUTH_MODE", "basic")])).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn test_auth_mode_round_trip() {
        assert_eq!("Bearer".parse::<AuthMode>().unwrap(), AuthMode::Bearer);
        assert_eq!(AuthMode::None.to_string(), "none");
        assert!(AuthMode::Bearer.is_bearer());
    }
}
