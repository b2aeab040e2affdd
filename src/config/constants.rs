// Project-wide constants
//
// Centralised here so port numbers and other magic values have one
// source of truth. Import via `use crate::config::constants::*;`.

/// Default bind address for the HTTP API (localhost only).
pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:5001";

/// Default opponent model.
pub const DEFAULT_MODEL: &str = "claude-3-haiku-20240307";

/// Token budget for the primary (scoring) call of a turn.
pub const DEFAULT_PRIMARY_MAX_TOKENS: u32 = 2048;

/// Token budget for the follow-up call after tool acknowledgements.
pub const DEFAULT_FOLLOW_UP_MAX_TOKENS: u32 = 1024;

/// Directory under $HOME holding config, profile and match history.
pub const DATA_DIR_NAME: &str = ".yapbattle";

pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const PROFILE_FILE_NAME: &str = "user_data.json";

pub const HISTORY_DIR_NAME: &str = "history";

/// Request body cap for the HTTP API. Voice uploads are base64 webm clips.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;
