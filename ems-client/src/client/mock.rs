// ems-client/src/client/mock.rs
// 测试用 HTTP 客户端 - 按顺序返回预设响应并记录请求

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::http::HttpClient;
use crate::error::{ClientError, ClientResult};

/// Canned reply for the next request
#[derive(Debug, Clone)]
pub enum MockReply {
    /// 2xx with a JSON body
    Json(Value),
    /// 2xx with an arbitrary (possibly malformed) body
    Raw(String),
    /// Non-2xx with a body text
    Status(u16, String),
}

/// A request observed by [`MockHttpClient`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
    pub token: Option<String>,
}

/// In-memory [`HttpClient`] that replays queued replies
#[derive(Debug, Default)]
pub struct MockHttpClient {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<RecordedRequest>>,
    token: Option<String>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply (builder form)
    pub fn reply(self, reply: MockReply) -> Self {
        self.push_reply(reply);
        self
    }

    /// Queue a reply
    pub fn push_reply(&self, reply: MockReply) {
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(reply);
    }

    /// All requests seen so far, in order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn record(&self, method: &'static str, path: &str, body: Option<Value>) -> ClientResult<MockReply> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RecordedRequest {
                method,
                path: path.trim_start_matches('/').to_string(),
                body,
                token: self.token.clone(),
            });
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .ok_or_else(|| ClientError::InvalidState(format!("no reply queued for {method} {path}")))
    }

    fn decode<T: DeserializeOwned>(reply: MockReply) -> ClientResult<T> {
        match reply {
            MockReply::Json(value) => {
                serde_json::from_value(value).map_err(|e| ClientError::InvalidResponse(e.to_string()))
            }
            MockReply::Raw(text) => {
                serde_json::from_str(&text).map_err(|e| ClientError::InvalidResponse(e.to_string()))
            }
            MockReply::Status(status, body) => Err(ClientError::Status { status, body }),
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        Self::decode(self.record("GET", path, None)?)
    }

    async fn post<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(body)?;
        Self::decode(self.record("POST", path, Some(body))?)
    }

    async fn put<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(body)?;
        Self::decode(self.record("PUT", path, Some(body))?)
    }

    async fn delete(&self, path: &str) -> ClientResult<()> {
        match self.record("DELETE", path, None)? {
            MockReply::Status(status, body) => Err(ClientError::Status { status, body }),
            _ => Ok(()),
        }
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }
}
