// Debate engine
//
// Sessions, the two-phase turn protocol, score aggregation and the
// caller-facing service that ties them to the rating engine.

pub mod registry;
pub mod scoring;
pub mod service;
pub mod session;

pub use registry::{SessionEntry, SessionRegistry, SessionSummary};
pub use scoring::{round1, ScoreAggregator, ScoreSnapshot, TurnScores};
pub use service::{DebateService, SessionResult, SessionStart};
pub use session::{DebateSession, SessionId, TurnOutcome, TurnSettings, TurnState};
