// Match history
// Per-day JSONL log of finished sessions

mod logger;
mod types;

pub use logger::MatchLogger;
pub use types::{MatchRecord, MatchSummary};
