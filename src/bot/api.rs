//! Chat transport: the `ChatApi` seam and its Telegram Bot API client

use std::time::Duration;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use crate::{Error, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

/// Message-polling chat channel
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Long-poll for updates with id >= `offset`
    async fn get_updates(&self, offset: Option<i64>, timeout_secs: u64) -> Result<Vec<Update>>;

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()>;

    async fn send_document(&self, chat_id: i64, file_name: &str, bytes: Vec<u8>) -> Result<()>;
}

/// Telegram Bot HTTP API client
pub struct TelegramClient {
    api_root: String,
    token: String,
    client: reqwest::Client,
}

impl TelegramClient {
    pub const API_ROOT: &'static str = "https://api.telegram.org";

    /// Build a client whose request timeout outlasts the long-poll timeout
    pub fn new(token: impl Into<String>, poll_timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(poll_timeout_secs + 10))
            .build()?;
        Ok(Self {
            api_root: Self::API_ROOT.to_string(),
            token: token.into(),
            client,
        })
    }

    /// Point the client at another API root
    pub fn with_api_root(mut self, root: impl Into<String>) -> Self {
        self.api_root = root.into();
        self
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_root.trim_end_matches('/'), self.token, method)
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        let body: ApiResponse<T> = response.json().await?;
        if !body.ok {
            let description = body.description.unwrap_or_else(|| status.to_string());
            tracing::error!(method, %status, %description, "Chat API call failed");
            return Err(Error::Chat(format!("{} failed: {}", method, description)));
        }
        body.result
            .ok_or_else(|| Error::Chat(format!("{} returned no result", method)))
    }
}

#[async_trait]
impl ChatApi for TelegramClient {
    async fn get_updates(&self, offset: Option<i64>, timeout_secs: u64) -> Result<Vec<Update>> {
        let mut payload = serde_json::json!({
            "timeout": timeout_secs,
            "allowed_updates": ["message"],
        });
        if let Some(offset) = offset {
            payload["offset"] = offset.into();
        }
        let request = self.client.post(self.method_url("getUpdates")).json(&payload);
        self.call("getUpdates", request).await
    }

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        let payload = serde_json::json!({ "chat_id": chat_id, "text": text });
        let request = self.client.post(self.method_url("sendMessage")).json(&payload);
        let _: serde_json::Value = self.call("sendMessage", request).await?;
        Ok(())
    }

    async fn send_document(&self, chat_id: i64, file_name: &str, bytes: Vec<u8>) -> Result<()> {
        let form = Form::new()
            .text("chat_id", chat_id.to_string())
            .part("document", Part::bytes(bytes).file_name(file_name.to_string()));
        let request = self.client.post(self.method_url("sendDocument")).multipart(form);
        let _: serde_json::Value = self.call("sendDocument", request).await?;
        Ok(())
    }
}
