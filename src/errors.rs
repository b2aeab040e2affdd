// Error types surfaced by the debate engine

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DebateError {
    /// Missing or invalid credentials/settings. Not retried.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Network failure or non-success response from the AI provider.
    /// Session history is untouched, so the same turn may be resubmitted.
    #[error("provider error: {0}")]
    Provider(String),

    #[error("invalid session: {0}")]
    InvalidSession(String),

    #[error("transcription failed: {0}")]
    Transcription(String),

    #[error("speech synthesis failed: {0}")]
    Speech(String),

    #[error("profile persistence failed: {0}")]
    Persistence(String),
}

impl DebateError {
    /// Wrap an `anyhow` chain from the provider client, keeping every cause.
    pub fn provider(err: anyhow::Error) -> Self {
        DebateError::Provider(format!("{:#}", err))
    }

    pub fn persistence(err: anyhow::Error) -> Self {
        DebateError::Persistence(format!("{:#}", err))
    }
}

pub type DebateResult<T> = std::result::Result<T, DebateError>;
