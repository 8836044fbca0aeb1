use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::chat::{ChatRequest, ChatResponse};
use crate::error::ChatError;

/// Something that can answer a [`ChatRequest`]
pub trait ChatService {
    fn send(
        &self,
        request: &ChatRequest,
    ) -> impl Future<Output = Result<ChatResponse, ChatError>> + Send;
}

/// HTTP client for the MedXpert `/chat` endpoint
#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    base_url: String,
}

impl ChatClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Client that gives up on a request after `timeout`
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ChatError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ChatError::Setup)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError> {
        let url = format!("{}/chat", self.base_url);
        debug!(%url, lang = %request.lang, "sending chat request");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Status { status, body });
        }

        // Decode from the raw body so malformed JSON is reported as a decode
        // error rather than a transport one
        let bytes = response.bytes().await?;
        let chat_response: ChatResponse = serde_json::from_slice(&bytes)?;
        debug!(kind = ?chat_response.kind, "chat response received");
        Ok(chat_response)
    }
}

impl ChatService for ChatClient {
    fn send(
        &self,
        request: &ChatRequest,
    ) -> impl Future<Output = Result<ChatResponse, ChatError>> + Send {
        self.chat(request)
    }
}
