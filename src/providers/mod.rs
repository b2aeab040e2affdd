// LLM provider abstraction
//
// The debate engine talks to the language model only through `LlmProvider`,
// so the HTTP-backed Claude client and in-process test doubles are
// interchangeable.

use anyhow::Result;
use async_trait::async_trait;

use crate::claude::{MessageRequest, MessageResponse};

pub mod claude;

/// Trait for LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send a message and get a complete response
    async fn send_message(&self, request: &MessageRequest) -> Result<MessageResponse>;

    /// Get the provider name (e.g., "claude")
    fn name(&self) -> &str;

    /// Get the default model for this provider
    fn default_model(&self) -> &str;
}
