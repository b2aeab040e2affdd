// Claude API module
// Anthropic Messages API client with tool-use content blocks

mod client;
mod retry;
pub mod types;

pub use client::ClaudeClient;
pub use retry::with_retry;
pub use types::{ContentBlock, Message, MessageRequest, MessageResponse};
