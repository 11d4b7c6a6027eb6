use reqwest::Client;
use serde_json::Value;
use shared::protocol::{ChatRequest, ChatResponse};
use tracing::debug;

use crate::error::AskError;

pub const CHAT_PATH: &str = "/chat";

/// Thin wrapper over `POST /chat`. The underlying client has no timeout and
/// the status code is never inspected: any body that parses as JSON counts.
#[derive(Clone)]
pub struct ChatClient {
    http: Client,
    server_url: String,
}

impl ChatClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self::with_http_client(Client::new(), server_url)
    }

    pub fn with_http_client(http: Client, server_url: impl Into<String>) -> Self {
        let server_url = server_url.into().trim_end_matches('/').to_string();
        Self { http, server_url }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn endpoint(&self) -> String {
        format!("{}{CHAT_PATH}", self.server_url)
    }

    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, AskError> {
        let res = self.http.post(self.endpoint()).json(request).send().await?;
        let status = res.status();
        let body = res.bytes().await?;
        debug!(%status, body_len = body.len(), "chat response received");

        let value: Value = serde_json::from_slice(&body)?;
        Ok(ChatResponse::from_value(value)?)
    }
}
