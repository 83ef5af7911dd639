// ems-client/src/client/http.rs
// HTTP 客户端 - 网络通信

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::{AuthMode, ClientConfig};
use crate::error::{ClientError, ClientResult};

/// HTTP 客户端 trait
///
/// Paths are relative to the configured base URL (e.g. `api/employees/3`).
/// Every non-2xx response becomes [`ClientError::Status`] carrying the body
/// text; a 2xx body that does not parse becomes
/// [`ClientError::InvalidResponse`].
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T>;
    async fn post<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn put<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    /// DELETE; the success body is ignored
    async fn delete(&self, path: &str) -> ClientResult<()>;
    fn token(&self) -> Option<&str>;
    fn set_token(&mut self, token: Option<String>);
}

/// 网络 HTTP 客户端
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    auth_mode: AuthMode,
    token: Option<String>,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_mode: config.auth_mode,
            token: config.token.clone(),
        })
    }

    /// 获取基础 URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth_mode(&self) -> AuthMode {
        self.auth_mode
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn auth_header(&self) -> Option<String> {
        if !self.auth_mode.is_bearer() {
            return None;
        }
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        tracing::debug!(%method, %url, "sending request");
        let mut req = self.client.request(method, &url);
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        req
    }

    /// Read the body and fail on non-2xx
    async fn read_body(response: reqwest::Response) -> ClientResult<String> {
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "request failed");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(text)
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let text = Self::read_body(response).await?;
        serde_json::from_str(&text).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        let response = self.request(Method::GET, path).send().await?;
        Self::handle_response(response).await
    }

    async fn post<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.request(Method::POST, path).json(body).send().await?;
        Self::handle_response(response).await
    }

    async fn put<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.request(Method::PUT, path).json(body).send().await?;
        Self::handle_response(response).await
    }

    async fn delete(&self, path: &str) -> ClientResult<()> {
        let response = self.request(Method::DELETE, path).send().await?;
        // 后端返回纯文本确认信息，忽略
        Self::read_body(response).await.map(|_| ())
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let config = ClientConfig::new("http://localhost:8080/");
        let client = NetworkHttpClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(
            client.url("/api/employees"),
            "http://localhost:8080/api/employees"
        );
        assert_eq!(
            client.url("api/employees/4"),
            "http://localhost:8080/api/employees/4"
        );
    }

    #[test]
    fn test_auth_header_follows_mode() {
        let config = ClientConfig::default().with_token("abc");
        let bearer = NetworkHttpClient::new(&config).unwrap();
        assert_eq!(bearer.auth_header().as_deref(), Some("Bearer abc"));

        let open = NetworkHttpClient::new(&config.clone().with_auth_mode(AuthMode::None)).unwrap();
        assert_eq!(open.auth_header(), None);
        assert_eq!(open.token(), Some("abc"));
    }

    #[test]
    fn test_set_token() {
        let mut client = NetworkHttpClient::new(&ClientConfig::default()).unwrap();
        assert!(client.auth_header().is_none());
        client.set_token(Some("t1".into()));
        assert_eq!(client.auth_header().as_deref(), Some("Bearer t1"));
        client.set_token(None);
        assert!(client.token().is_none());
    }
}
