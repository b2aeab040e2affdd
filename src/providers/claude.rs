// Claude provider implementation

use anyhow::Result;
use async_trait::async_trait;

use super::LlmProvider;
use crate::claude::{ClaudeClient, MessageRequest, MessageResponse};

#[async_trait]
impl LlmProvider for ClaudeClient {
    async fn send_message(&self, request: &MessageRequest) -> Result<MessageResponse> {
        ClaudeClient::send_message(self, request).await
    }

    fn name(&self) -> &str {
        "claude"
    }

    fn default_model(&self) -> &str {
        self.model()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claude_provider_identity() {
        let client = ClaudeClient::new("test-key".to_string(), "claude-3-haiku-20240307").unwrap();
        let provider: &dyn LlmProvider = &client;
        assert_eq!(provider.name(), "claude");
        assert_eq!(provider.default_model(), "claude-3-haiku-20240307");
    }
}
