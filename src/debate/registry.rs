// Session registry
//
// Concurrent map of live sessions keyed by id. Each entry serializes turns
// through its own mutex; turns for different sessions never contend. A
// cached summary lets score queries answer while a turn is in flight.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use super::scoring::ScoreSnapshot;
use super::session::{DebateSession, SessionId};
use crate::config::{Difficulty, GameMode};
use crate::errors::{DebateError, DebateResult};

/// Read-only view of a session, refreshed after every committed turn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub id: SessionId,
    pub topic: String,
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub scores: ScoreSnapshot,
    pub turn_count: u32,
    pub created_at: DateTime<Utc>,
}

impl SessionSummary {
    fn of(session: &DebateSession) -> Self {
        Self {
            id: session.id(),
            topic: session.topic().to_string(),
            mode: session.mode(),
            difficulty: session.difficulty(),
            scores: session.current_scores(),
            turn_count: session.turn_count(),
            created_at: session.created_at(),
        }
    }
}

pub struct SessionEntry {
    session: Mutex<DebateSession>,
    summary: RwLock<SessionSummary>,
}

impl SessionEntry {
    fn new(session: DebateSession) -> Self {
        let summary = SessionSummary::of(&session);
        Self {
            session: Mutex::new(session),
            summary: RwLock::new(summary),
        }
    }

    /// Exclusive access to the session for one turn. Concurrent callers queue.
    pub async fn lock(&self) -> tokio::sync::MutexGuard<'_, DebateSession> {
        self.session.lock().await
    }

    pub async fn summary(&self) -> SessionSummary {
        self.summary.read().await.clone()
    }

    /// Re-read the summary from a session the caller has locked
    pub async fn refresh(&self, session: &DebateSession) {
        *self.summary.write().await = SessionSummary::of(session);
    }
}

#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<SessionId, Arc<SessionEntry>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, session: DebateSession) -> Arc<SessionEntry> {
        let id = session.id();
        let entry = Arc::new(SessionEntry::new(session));
        self.sessions.insert(id, Arc::clone(&entry));
        tracing::debug!(session_id = %id, active = self.sessions.len(), "Session registered");
        entry
    }

    pub fn get(&self, id: SessionId) -> DebateResult<Arc<SessionEntry>> {
        self.sessions
            .get(&id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| DebateError::InvalidSession(id.to_string()))
    }

    /// Look up by the textual id a client sent
    pub fn get_str(&self, raw: &str) -> DebateResult<Arc<SessionEntry>> {
        let id: SessionId = raw.parse()?;
        self.get(id)
    }

    pub fn remove(&self, id: SessionId) -> DebateResult<Arc<SessionEntry>> {
        self.sessions
            .remove(&id)
            .map(|(_, entry)| entry)
            .ok_or_else(|| DebateError::InvalidSession(id.to_string()))
    }

    pub fn contains(&self, id: SessionId) -> bool {
        self.sessions.contains_key(&id)
    }

    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn ids(&self) -> Vec<SessionId> {
        self.sessions.iter().map(|entry| *entry.key()).collect()
    }
}
