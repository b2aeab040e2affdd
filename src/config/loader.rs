// Configuration loader
// Loads settings from ~/.yapbattle/config.toml, then environment overrides

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::constants::{CONFIG_FILE_NAME, DATA_DIR_NAME};
use super::settings::{Config, ServerConfig};

/// On-disk shape of config.toml. Every field is optional.
#[derive(Debug, Default, Deserialize)]
struct TomlConfig {
    anthropic_api_key: Option<String>,
    deepgram_api_key: Option<String>,
    model: Option<String>,
    primary_max_tokens: Option<u32>,
    follow_up_max_tokens: Option<u32>,
    anthropic_base_url: Option<String>,
    deepgram_base_url: Option<String>,
    profile_path: Option<PathBuf>,
    server: Option<ServerConfig>,
}

/// Load configuration from the data directory and the process environment
pub fn load_config() -> Result<Config> {
    let data_dir = match std::env::var("YAPBATTLE_DATA_DIR") {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::home_dir()
            .context("Could not determine home directory")?
            .join(DATA_DIR_NAME),
    };

    load_config_from(&data_dir, |key| std::env::var(key).ok())
}

/// Load configuration rooted at `data_dir`, reading overrides through `env`
pub fn load_config_from<F>(data_dir: &Path, env: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = Config::with_data_dir(data_dir.to_path_buf());

    let config_path = data_dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let file: TomlConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;
        apply_file(&mut config, file);
        tracing::debug!(path = %config_path.display(), "Loaded config file");
    }

    let var = |key: &str| env(key).filter(|v| !v.trim().is_empty());
    if let Some(key) = var("ANTHROPIC_API_KEY") {
        config.anthropic_api_key = Some(key);
    }
    if let Some(key) = var("DEEPGRAM_API_KEY") {
        config.deepgram_api_key = Some(key);
    }
    if let Some(model) = var("YAPBATTLE_MODEL") {
        config.model = model;
    }
    if let Some(bind) = var("YAPBATTLE_BIND") {
        config.server.bind_address = bind;
    }

    config
        .validate()
        .context("Configuration validation failed")?;

    if config.anthropic_api_key.is_none() {
        tracing::warn!("ANTHROPIC_API_KEY is not set; debates cannot be started");
    }

    Ok(config)
}

fn apply_file(config: &mut Config, file: TomlConfig) {
    if file.anthropic_api_key.is_some() {
        config.anthropic_api_key = file.anthropic_api_key;
    }
    if file.deepgram_api_key.is_some() {
        config.deepgram_api_key = file.deepgram_api_key;
    }
    if let Some(model) = file.model {
        config.model = model;
    }
    if let Some(tokens) = file.primary_max_tokens {
        config.primary_max_tokens = tokens;
    }
    if let Some(tokens) = file.follow_up_max_tokens {
        config.follow_up_max_tokens = tokens;
    }
    config.anthropic_base_url = file.anthropic_base_url;
    config.deepgram_base_url = file.deepgram_base_url;
    if let Some(path) = file.profile_path {
        config.profile_path = path;
    }
    if let Some(server) = file.server {
        config.server = server;
    }
}
