// Debate service
//
// Caller-facing facade over the registry, the rating engine and the match
// history: start a session, submit turns, read scores, end and record.

use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use super::registry::{SessionRegistry, SessionSummary};
use super::scoring::ScoreSnapshot;
use super::session::{DebateSession, SessionId, TurnOutcome, TurnSettings};
use crate::claude::ClaudeClient;
use crate::config::{pick_topic, Config, Difficulty, GameMode, PromptConfig};
use crate::errors::{DebateError, DebateResult};
use crate::metrics::{MatchLogger, MatchRecord};
use crate::providers::LlmProvider;
use crate::rating::{JsonProfileStore, Profile, RankProgress, RatingEngine, SessionRating};

/// Handle returned when a session starts
#[derive(Debug, Clone, Serialize)]
pub struct SessionStart {
    pub session_id: SessionId,
    pub topic: String,
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub config: PromptConfig,
}

/// Result of ending a session
#[derive(Debug, Clone, Serialize)]
pub struct SessionResult {
    pub session_id: SessionId,
    pub final_scores: ScoreSnapshot,
    pub turns: u32,
    #[serde(flatten)]
    pub rating: SessionRating,
    pub rank_progress: RankProgress,
}

pub struct DebateService {
    provider: Option<Arc<dyn LlmProvider>>,
    settings: TurnSettings,
    registry: SessionRegistry,
    ratings: RatingEngine,
    history: Option<MatchLogger>,
}

impl DebateService {
    /// `provider` may be absent; sessions then fail to start with a
    /// configuration error while profile queries keep working.
    pub fn new(
        provider: Option<Arc<dyn LlmProvider>>,
        settings: TurnSettings,
        ratings: RatingEngine,
    ) -> Self {
        Self {
            provider,
            settings,
            registry: SessionRegistry::new(),
            ratings,
            history: None,
        }
    }

    pub fn with_match_logger(mut self, logger: MatchLogger) -> Self {
        self.history = Some(logger);
        self
    }

    /// Wire the Claude client, JSON profile store and match history from config
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let provider = match &config.anthropic_api_key {
            Some(key) => {
                let mut client = ClaudeClient::new(key.clone(), config.model.clone())?;
                if let Some(url) = &config.anthropic_base_url {
                    client = client.with_base_url(url.clone());
                }
                Some(Arc::new(client) as Arc<dyn LlmProvider>)
            }
            None => None,
        };

        let store = Arc::new(JsonProfileStore::new(config.profile_path.clone()));
        let ratings = RatingEngine::load(store)?;
        let logger = MatchLogger::new(config.history_dir())?;

        Ok(Self::new(provider, TurnSettings::from(config), ratings).with_match_logger(logger))
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn ratings(&self) -> &RatingEngine {
        &self.ratings
    }

    pub fn match_logger(&self) -> Option<&MatchLogger> {
        self.history.as_ref()
    }

    pub async fn profile(&self) -> Profile {
        self.ratings.profile().await
    }

    /// Start a session on a random topic from the mode's pool
    pub fn start_session(
        &self,
        mode: GameMode,
        difficulty: Difficulty,
    ) -> DebateResult<SessionStart> {
        self.start_session_on(mode, difficulty, pick_topic(mode))
    }

    pub fn start_session_on(
        &self,
        mode: GameMode,
        difficulty: Difficulty,
        topic: impl Into<String>,
    ) -> DebateResult<SessionStart> {
        let provider = self.provider.clone().ok_or_else(|| {
            tracing::error!("Cannot start session: Anthropic API key not configured");
            DebateError::Configuration("Anthropic API key not configured".to_string())
        })?;

        let session = DebateSession::new(provider, self.settings.clone(), mode, difficulty, topic);
        let start = SessionStart {
            session_id: session.id(),
            topic: session.topic().to_string(),
            mode,
            difficulty,
            config: session.prompt().clone(),
        };
        self.registry.insert(session);

        tracing::info!(
            session_id = %start.session_id,
            %mode,
            %difficulty,
            topic = %start.topic,
            "Session started"
        );

        Ok(start)
    }

    /// Process one human turn. Turns on the same session are queued.
    pub async fn submit_turn(&self, id: SessionId, text: &str) -> DebateResult<TurnOutcome> {
        let entry = self.registry.get(id)?;
        let mut session = entry.lock().await;
        if !self.registry.contains(id) {
            // Ended while this turn was queued
            return Err(DebateError::InvalidSession(id.to_string()));
        }

        let outcome = session.process_turn(text).await?;
        entry.refresh(&session).await;
        Ok(outcome)
    }

    /// Scores as of the last committed turn; never waits on a turn in flight
    pub async fn current_scores(&self, id: SessionId) -> DebateResult<ScoreSnapshot> {
        Ok(self.registry.get(id)?.summary().await.scores)
    }

    pub async fn summary(&self, id: SessionId) -> DebateResult<SessionSummary> {
        Ok(self.registry.get(id)?.summary().await)
    }

    /// Finish a session: record its rounded overall score against the
    /// profile, log the match and drop the session. If recording fails the
    /// session stays live so the caller can retry.
    pub async fn end_session(&self, id: SessionId) -> DebateResult<SessionResult> {
        let entry = self.registry.get(id)?;
        let session = entry.lock().await;
        if !self.registry.contains(id) {
            return Err(DebateError::InvalidSession(id.to_string()));
        }

        let final_scores = session.current_scores();
        let rating = self
            .ratings
            .record_session(session.mode(), final_scores.overall, session.difficulty())
            .await?;
        self.registry.remove(id)?;

        if let Some(logger) = &self.history {
            let record = MatchRecord {
                timestamp: Utc::now(),
                session_id: id,
                mode: session.mode(),
                difficulty: session.difficulty(),
                topic: session.topic().to_string(),
                turns: session.turn_count(),
                final_scores,
                rating_delta: rating.rating_delta,
                new_rating: rating.new_rating,
                won: rating.won,
            };
            if let Err(e) = logger.log(&record) {
                tracing::warn!(session_id = %id, error = %e, "Failed to write match history");
            }
        }

        tracing::info!(
            session_id = %id,
            overall = final_scores.overall,
            delta = rating.rating_delta,
            "Session ended"
        );

        Ok(SessionResult {
            session_id: id,
            final_scores,
            turns: session.turn_count(),
            rating,
            rank_progress: self.ratings.profile().await.rank_progress(),
        })
    }
}
