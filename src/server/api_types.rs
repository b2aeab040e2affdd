// Web API types
//
// Field names follow what the browser front end already reads
// (`ai_response`, `elo_change`, `total_debates`, ...).

use serde::{Deserialize, Serialize};

use crate::config::{Difficulty, GameMode, PromptConfig};
use crate::debate::{ScoreSnapshot, SessionId, SessionResult, SessionStart, TurnOutcome};
use crate::metrics::MatchSummary;
use crate::rating::{Profile, Rank, RankProgress};
use crate::tools::Verdict;

/// Body of `POST /api/start-debate`. Unknown values fall back to defaults.
#[derive(Debug, Default, Deserialize)]
pub struct StartDebateRequest {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
}

impl StartDebateRequest {
    pub fn mode(&self) -> GameMode {
        self.mode
            .as_deref()
            .map(GameMode::parse_lossy)
            .unwrap_or_default()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
            .as_deref()
            .map(Difficulty::parse_lossy)
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct ArgumentRequest {
    pub session_id: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
pub struct TranscribeRequest {
    pub session_id: String,
    /// Base64-encoded audio clip
    pub audio: String,
}

#[derive(Debug, Serialize)]
pub struct StartDebateResponse {
    pub success: bool,
    pub session_id: SessionId,
    pub topic: String,
    pub difficulty: Difficulty,
    pub mode: GameMode,
    pub config: PromptConfig,
}

impl From<SessionStart> for StartDebateResponse {
    fn from(start: SessionStart) -> Self {
        Self {
            success: true,
            session_id: start.session_id,
            topic: start.topic,
            difficulty: start.difficulty,
            mode: start.mode,
            config: start.config,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ArgumentResponse {
    pub success: bool,
    pub ai_response: String,
    pub scores: Option<ScoreSnapshot>,
    pub feedback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counter_strategy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
    /// Base64 MP3 of the rebuttal (voice route only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
}

impl From<TurnOutcome> for ArgumentResponse {
    fn from(outcome: TurnOutcome) -> Self {
        Self {
            success: true,
            ai_response: outcome.rebuttal,
            scores: outcome.scores,
            feedback: outcome.feedback,
            counter_strategy: outcome.counter_strategy,
            verdict: outcome.verdict,
            audio: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScoresResponse {
    pub success: bool,
    pub scores: ScoreSnapshot,
}

#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    pub success: bool,
    pub transcript: String,
}

#[derive(Debug, Serialize)]
pub struct EndDebateResponse {
    pub success: bool,
    pub final_scores: ScoreSnapshot,
    pub turns: u32,
    pub elo_change: i32,
    pub new_elo: u32,
    pub new_rank: Rank,
    pub won: bool,
    pub rank_progress: RankProgress,
}

impl From<SessionResult> for EndDebateResponse {
    fn from(result: SessionResult) -> Self {
        Self {
            success: true,
            final_scores: result.final_scores,
            turns: result.turns,
            elo_change: result.rating.rating_delta,
            new_elo: result.rating.new_rating,
            new_rank: result.rating.new_rank,
            won: result.rating.won,
            rank_progress: result.rank_progress,
        }
    }
}

/// `GET /api/user-stats`
#[derive(Debug, Serialize)]
pub struct UserStatsResponse {
    pub rank: Rank,
    pub rank_color: &'static str,
    pub elo: u32,
    pub streak_days: u32,
    pub total_debates: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: f64,
    pub hot_takes_played: u32,
    pub ranked_played: u32,
    pub podcast_played: u32,
}

impl From<&Profile> for UserStatsResponse {
    fn from(p: &Profile) -> Self {
        Self {
            rank: p.rank,
            rank_color: p.rank.color(),
            elo: p.rating,
            streak_days: p.streak_days,
            total_debates: p.total_sessions,
            wins: p.wins,
            losses: p.losses,
            win_rate: p.win_rate(),
            hot_takes_played: p.hot_takes_played,
            ranked_played: p.ranked_played,
            podcast_played: p.podcast_played,
        }
    }
}

/// `GET /api/stats`: full profile view plus today's match history
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub username: String,
    #[serde(flatten)]
    pub summary: UserStatsResponse,
    pub best_streak: u32,
    pub average_score: f64,
    pub rank_progress: RankProgress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub today: Option<MatchSummary>,
}

impl StatsResponse {
    pub fn new(profile: &Profile, today: Option<MatchSummary>) -> Self {
        Self {
            username: profile.username.clone(),
            summary: UserStatsResponse::from(profile),
            best_streak: profile.best_streak,
            average_score: crate::debate::round1(profile.average_score),
            rank_progress: profile.rank_progress(),
            today,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub active_sessions: usize,
    pub provider_configured: bool,
    pub speech_configured: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_request_defaults() {
        let req: StartDebateRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.mode(), GameMode::Ranked);
        assert_eq!(req.difficulty(), Difficulty::Medium);

        let req: StartDebateRequest =
            serde_json::from_str(r#"{"mode":"hot_takes","difficulty":"brutal"}"#).unwrap();
        assert_eq!(req.mode(), GameMode::HotTakes);
        assert_eq!(req.difficulty(), Difficulty::Medium);
    }

    #[test]
    fn test_user_stats_uses_front_end_names() {
        let profile = Profile {
            rating: 130,
            rank: Rank::Silver,
            wins: 3,
            losses: 1,
            total_sessions: 4,
            ..Profile::default()
        };
        let value = serde_json::to_value(UserStatsResponse::from(&profile)).unwrap();
        assert_eq!(value["elo"], 130);
        assert_eq!(value["rank"], "Silver");
        assert_eq!(value["rank_color"], "#c0c0c0");
        assert_eq!(value["total_debates"], 4);
        assert_eq!(value["win_rate"], 75.0);
    }
}
