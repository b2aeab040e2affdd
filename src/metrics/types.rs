// Match history data types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{Difficulty, GameMode};
use crate::debate::{ScoreSnapshot, SessionId};

/// One finished session as written to the daily history file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub timestamp: DateTime<Utc>,
    pub session_id: SessionId,
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub topic: String,
    pub turns: u32,
    pub final_scores: ScoreSnapshot,
    pub rating_delta: i32,
    pub new_rating: u32,
    pub won: bool,
}

/// Aggregate over one day's matches
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchSummary {
    pub total: usize,
    pub wins: usize,
    pub losses: usize,
    pub mean_score: f64,
    pub rating_change: i32,
    pub ranked: usize,
    pub hot_takes: usize,
    pub podcast: usize,
}

impl MatchSummary {
    pub fn from_records(records: &[MatchRecord]) -> Self {
        let total = records.len();
        let wins = records.iter().filter(|r| r.won).count();
        let count_mode = |mode: GameMode| records.iter().filter(|r| r.mode == mode).count();

        let mean_score = if total > 0 {
            records.iter().map(|r| r.final_scores.overall).sum::<f64>() / total as f64
        } else {
            0.0
        };

        Self {
            total,
            wins,
            losses: total - wins,
            mean_score: crate::debate::round1(mean_score),
            rating_change: records.iter().map(|r| r.rating_delta).sum(),
            ranked: count_mode(GameMode::Ranked),
            hot_takes: count_mode(GameMode::HotTakes),
            podcast: count_mode(GameMode::Podcast),
        }
    }
}
