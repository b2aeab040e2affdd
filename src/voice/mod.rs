// Speech collaborator
//
// Transcription and synthesis sit outside the debate engine: it consumes
// only plain transcript text and hands back opaque audio for a rebuttal.

mod deepgram;

pub use deepgram::DeepgramClient;

use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Speech to text for one recorded clip
    async fn transcribe(&self, audio: &[u8]) -> Result<String>;

    /// Text to speech, returning encoded audio
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>>;

    fn name(&self) -> &str;
}
