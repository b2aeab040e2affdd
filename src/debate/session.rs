// Debate session: conversation state and the two-phase turn protocol
//
// Phase 1 sends the history with the human's new argument and the debate
// tools. If the reply carries a `score_argument` invocation, phase 2
// acknowledges every invocation and asks for follow-up text. A turn is
// committed only after every provider call it needs has succeeded, so a
// failed turn leaves history and scores exactly as they were.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use super::scoring::{ScoreAggregator, ScoreSnapshot, TurnScores};
use crate::claude::types::{ROLE_ASSISTANT, ROLE_USER};
use crate::claude::{ContentBlock, Message, MessageRequest, MessageResponse};
use crate::config::{resolve, Config, Difficulty, GameMode, PromptConfig};
use crate::errors::{DebateError, DebateResult};
use crate::providers::LlmProvider;
use crate::tools::debate::TOOL_ACK;
use crate::tools::{
    debate_tools, Counterargument, DebateInvocation, ResponseBlock, ScoreArgument, ToolUse,
    Verdict,
};

/// Opaque session identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionId {
    type Err = DebateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(SessionId)
            .map_err(|_| DebateError::InvalidSession(s.to_string()))
    }
}

/// Where a session is within the current turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnState {
    Idle,
    AwaitingPrimaryResponse,
    AwaitingFollowUpResponse,
    TurnComplete,
}

/// Provider call parameters shared by every session
#[derive(Debug, Clone)]
pub struct TurnSettings {
    pub model: String,
    pub primary_max_tokens: u32,
    pub follow_up_max_tokens: u32,
}

impl From<&Config> for TurnSettings {
    fn from(config: &Config) -> Self {
        Self {
            model: config.model.clone(),
            primary_max_tokens: config.primary_max_tokens,
            follow_up_max_tokens: config.follow_up_max_tokens,
        }
    }
}

/// Result of one processed human turn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnOutcome {
    pub rebuttal: String,
    /// Updated rounded scores, `None` when the provider did not score the turn
    pub scores: Option<ScoreSnapshot>,
    pub feedback: Option<String>,
    /// Advisory strategy from `generate_counterargument`
    pub counter_strategy: Option<String>,
    /// Advisory verdict from `end_debate`; the caller still decides when to end
    pub verdict: Option<Verdict>,
}

/// Phase-1 response split into its parts
#[derive(Default)]
struct PrimaryReply {
    text: String,
    calls: Vec<ToolUse>,
    score: Option<ScoreArgument>,
    counter: Option<Counterargument>,
    verdict: Option<Verdict>,
}

impl PrimaryReply {
    fn from_response(response: &MessageResponse) -> Self {
        let mut reply = PrimaryReply::default();

        for block in ResponseBlock::classify(&response.content) {
            match block {
                ResponseBlock::Text(text) => reply.text.push_str(&text),
                ResponseBlock::Invocation { call, kind } => {
                    match kind {
                        DebateInvocation::Score(score) => {
                            if reply.score.is_none() {
                                reply.score = Some(score);
                            } else {
                                tracing::warn!("Extra score_argument in one turn ignored");
                            }
                        }
                        DebateInvocation::Counter(counter) => reply.counter = Some(counter),
                        DebateInvocation::EndDebate(verdict) => reply.verdict = Some(verdict),
                        DebateInvocation::Other { .. } => {}
                    }
                    reply.calls.push(call);
                }
            }
        }

        reply
    }
}

pub struct DebateSession {
    id: SessionId,
    topic: String,
    mode: GameMode,
    difficulty: Difficulty,
    prompt: PromptConfig,
    history: Vec<Message>,
    scores: ScoreAggregator,
    state: TurnState,
    provider: Arc<dyn LlmProvider>,
    settings: TurnSettings,
    created_at: DateTime<Utc>,
}

impl DebateSession {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        settings: TurnSettings,
        mode: GameMode,
        difficulty: Difficulty,
        topic: impl Into<String>,
    ) -> Self {
        let topic = topic.into();
        let prompt = resolve(difficulty, &topic, mode);

        Self {
            id: SessionId::new(),
            topic,
            mode,
            difficulty,
            prompt,
            history: Vec::new(),
            scores: ScoreAggregator::new(),
            state: TurnState::Idle,
            provider,
            settings,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn prompt(&self) -> &PromptConfig {
        &self.prompt
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn turn_count(&self) -> u32 {
        self.scores.turn_count()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Rounded snapshot of the running scores
    pub fn current_scores(&self) -> ScoreSnapshot {
        self.scores.snapshot()
    }

    /// Process one human turn.
    ///
    /// On error nothing is committed: history, scores and turn count are
    /// as before the call and the same text can be resubmitted.
    pub async fn process_turn(&mut self, human_text: &str) -> DebateResult<TurnOutcome> {
        let result = self.run_turn(human_text).await;
        self.state = match result {
            Ok(_) => TurnState::TurnComplete,
            Err(_) => TurnState::Idle,
        };
        result
    }

    async fn run_turn(&mut self, human_text: &str) -> DebateResult<TurnOutcome> {
        let mut pending = self.history.clone();
        pending.push(Message::user(human_text));

        self.state = TurnState::AwaitingPrimaryResponse;
        let primary = self
            .call_provider(&pending, self.settings.primary_max_tokens)
            .await?;
        let reply = PrimaryReply::from_response(&primary);

        let counter_strategy = reply.counter.map(|c| c.counter_strategy);

        let Some(score) = reply.score else {
            // Unacknowledged tool_use blocks would be rejected on the next
            // call, so only the text is kept.
            pending.push(Message::assistant(reply.text.clone()));
            self.history = pending;

            tracing::info!(
                session_id = %self.id,
                turn = self.scores.turn_count(),
                invocations = reply.calls.len(),
                "Turn complete without score"
            );

            return Ok(TurnOutcome {
                rebuttal: reply.text,
                scores: None,
                feedback: None,
                counter_strategy,
                verdict: reply.verdict,
            });
        };

        pending.push(Message::with_content(ROLE_ASSISTANT, primary.content.clone()));
        pending.push(Message::with_content(
            ROLE_USER,
            reply
                .calls
                .iter()
                .map(|call| ContentBlock::ToolResult {
                    tool_use_id: call.id.clone(),
                    content: TOOL_ACK.to_string(),
                    is_error: None,
                })
                .collect(),
        ));

        self.state = TurnState::AwaitingFollowUpResponse;
        let follow_up = self
            .call_provider(&pending, self.settings.follow_up_max_tokens)
            .await?;

        // Invocations in the follow-up are discarded; only text is kept.
        let follow_up_text = follow_up.text();
        let rebuttal = join_rebuttal(reply.text, &follow_up_text);
        pending.push(Message::assistant(follow_up_text));

        let snapshot = self.scores.ingest(TurnScores::from(&score));
        self.history = pending;

        tracing::info!(
            session_id = %self.id,
            turn = self.scores.turn_count(),
            overall = snapshot.overall,
            "Turn scored"
        );

        Ok(TurnOutcome {
            rebuttal,
            scores: Some(snapshot),
            feedback: Some(score.feedback),
            counter_strategy,
            verdict: reply.verdict,
        })
    }

    async fn call_provider(
        &self,
        messages: &[Message],
        max_tokens: u32,
    ) -> DebateResult<MessageResponse> {
        let request = MessageRequest::new(self.settings.model.clone(), messages.to_vec())
            .with_max_tokens(max_tokens)
            .with_system(self.prompt.system_prompt.clone())
            .with_tools(debate_tools());

        self.provider.send_message(&request).await.map_err(|e| {
            tracing::error!(
                session_id = %self.id,
                provider = %self.provider.name(),
                state = ?self.state,
                error = %e,
                "Provider call failed"
            );
            DebateError::provider(e)
        })
    }
}

fn join_rebuttal(primary: String, follow_up: &str) -> String {
    match (primary.is_empty(), follow_up.is_empty()) {
        (_, true) => primary,
        (true, false) => follow_up.to_string(),
        (false, false) => format!("{} {}", primary, follow_up),
    }
}
