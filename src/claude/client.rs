// HTTP client for Claude API

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

use super::retry::with_retry;
use super::types::{MessageRequest, MessageResponse};

const CLAUDE_API_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const REQUEST_TIMEOUT_SECS: u64 = 60;

pub struct ClaudeClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl ClaudeClient {
    pub fn new(api_key: String, model: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: CLAUDE_API_URL.to_string(),
            model: model.into(),
        })
    }

    /// Point the client at a different API host (proxies, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a message to Claude API with retry logic
    pub async fn send_message(&self, request: &MessageRequest) -> Result<MessageResponse> {
        with_retry(|| self.send_message_once(request)).await
    }

    /// Send a single message request (no retry)
    async fn send_message_once(&self, request: &MessageRequest) -> Result<MessageResponse> {
        tracing::debug!(
            model = %request.model,
            messages = request.messages.len(),
            "Sending request to Claude API"
        );

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .context("Failed to send request to Claude API")?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "Claude API request failed\n\nStatus: {}\nBody: {}",
                status,
                error_body
            );
        }

        let message_response: MessageResponse = response
            .json()
            .await
            .context("Failed to parse Claude API response")?;

        tracing::debug!(
            id = %message_response.id,
            blocks = message_response.content.len(),
            stop_reason = ?message_response.stop_reason,
            "Received response"
        );

        Ok(message_response)
    }
}
