// Configuration structs

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

use super::constants::{
    DEFAULT_FOLLOW_UP_MAX_TOKENS, DEFAULT_HTTP_ADDR, DEFAULT_MODEL, DEFAULT_PRIMARY_MAX_TOKENS,
    HISTORY_DIR_NAME, PROFILE_FILE_NAME,
};

#[derive(Debug, Clone)]
pub struct Config {
    /// Anthropic API key. Missing is only fatal when a session is created.
    pub anthropic_api_key: Option<String>,

    /// Deepgram API key for voice mode (optional)
    pub deepgram_api_key: Option<String>,

    /// Opponent model name
    pub model: String,

    /// Token budget for the scoring call of a turn
    pub primary_max_tokens: u32,

    /// Token budget for the follow-up call of a turn
    pub follow_up_max_tokens: u32,

    /// Override for the Anthropic API host
    pub anthropic_base_url: Option<String>,

    /// Override for the Deepgram API host
    pub deepgram_base_url: Option<String>,

    /// Directory holding config, profile and match history
    pub data_dir: PathBuf,

    /// Profile JSON file
    pub profile_path: PathBuf,

    /// HTTP server settings
    pub server: ServerConfig,
}

/// Server configuration for `yapbattle serve`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:5001")
    pub bind_address: String,
    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_HTTP_ADDR.to_string(),
            cors_origins: Vec::new(),
        }
    }
}

impl Config {
    /// Defaults rooted at `data_dir`, with no credentials
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            anthropic_api_key: None,
            deepgram_api_key: None,
            model: DEFAULT_MODEL.to_string(),
            primary_max_tokens: DEFAULT_PRIMARY_MAX_TOKENS,
            follow_up_max_tokens: DEFAULT_FOLLOW_UP_MAX_TOKENS,
            anthropic_base_url: None,
            deepgram_base_url: None,
            profile_path: data_dir.join(PROFILE_FILE_NAME),
            data_dir,
            server: ServerConfig::default(),
        }
    }

    pub fn history_dir(&self) -> PathBuf {
        self.data_dir.join(HISTORY_DIR_NAME)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server
            .bind_address
            .parse()
            .with_context(|| format!("Invalid bind address: {}", self.server.bind_address))
    }

    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            bail!("Model name must not be empty");
        }
        if self.primary_max_tokens == 0 || self.follow_up_max_tokens == 0 {
            bail!("Token budgets must be greater than zero");
        }
        self.bind_addr()?;
        Ok(())
    }
}
