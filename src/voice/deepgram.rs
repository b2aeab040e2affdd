// Deepgram REST client (listen + speak)

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::SpeechProvider;

const DEEPGRAM_API_URL: &str = "https://api.deepgram.com";
const LISTEN_MODEL: &str = "nova-2";
const SPEAK_MODEL: &str = "aura-zeus-en";
const REQUEST_TIMEOUT_SECS: u64 = 30;

pub struct DeepgramClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ListenResponse {
    results: ListenResults,
}

#[derive(Debug, Deserialize)]
struct ListenResults {
    channels: Vec<Channel>,
}

#[derive(Debug, Deserialize)]
struct Channel {
    alternatives: Vec<Alternative>,
}

#[derive(Debug, Deserialize)]
struct Alternative {
    #[serde(default)]
    transcript: String,
}

impl ListenResponse {
    fn into_transcript(self) -> Option<String> {
        self.results
            .channels
            .into_iter()
            .next()?
            .alternatives
            .into_iter()
            .next()
            .map(|alt| alt.transcript)
    }
}

impl DeepgramClient {
    pub fn new(api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: DEEPGRAM_API_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn auth(&self) -> String {
        format!("Token {}", self.api_key)
    }
}

#[async_trait]
impl SpeechProvider for DeepgramClient {
    async fn transcribe(&self, audio: &[u8]) -> Result<String> {
        tracing::debug!(bytes = audio.len(), "Transcribing audio");

        let response = self
            .client
            .post(format!("{}/v1/listen", self.base_url))
            .query(&[
                ("model", LISTEN_MODEL),
                ("smart_format", "true"),
                ("language", "en"),
            ])
            .header("Authorization", self.auth())
            .header("Content-Type", "audio/webm")
            .body(audio.to_vec())
            .send()
            .await
            .context("Failed to send audio to Deepgram")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Deepgram listen failed\n\nStatus: {}\nBody: {}", status, body);
        }

        let parsed: ListenResponse = response
            .json()
            .await
            .context("Failed to parse Deepgram transcript")?;

        parsed
            .into_transcript()
            .context("Deepgram response contained no transcript")
    }

    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        tracing::debug!(chars = text.len(), "Synthesizing speech");

        let response = self
            .client
            .post(format!("{}/v1/speak", self.base_url))
            .query(&[("model", SPEAK_MODEL), ("encoding", "mp3")])
            .header("Authorization", self.auth())
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await
            .context("Failed to send text to Deepgram")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Deepgram speak failed\n\nStatus: {}\nBody: {}", status, body);
        }

        let audio = response
            .bytes()
            .await
            .context("Failed to read Deepgram audio")?;
        Ok(audio.to_vec())
    }

    fn name(&self) -> &str {
        "deepgram"
    }
}
