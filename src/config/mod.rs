// Configuration module
// Public interface for configuration loading and opponent personas

pub mod constants;
mod loader;
pub mod persona;
mod settings;

pub use loader::{load_config, load_config_from};
pub use persona::{pick_topic, resolve, Difficulty, GameMode, PromptConfig};
pub use settings::{Config, ServerConfig};
