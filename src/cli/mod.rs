// CLI module
// Terminal debate loop and text rendering

mod commands;
mod repl;

pub use commands::{format_profile, format_result, format_scores, format_turn, Command};
pub use repl::Repl;
