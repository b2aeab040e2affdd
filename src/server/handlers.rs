// HTTP handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::sync::Arc;

use super::api_types::{
    ArgumentRequest, ArgumentResponse, EndDebateResponse, HealthResponse, ScoresResponse,
    SessionRequest, StartDebateRequest, StartDebateResponse, StatsResponse, TranscribeRequest,
    TranscribeResponse, UserStatsResponse,
};
use super::error::ApiError;
use super::AppState;
use crate::debate::SessionId;
use crate::errors::DebateError;

type ApiResult<T> = Result<Json<T>, ApiError>;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/user-stats", get(user_stats))
        .route("/api/stats", get(stats))
        .route("/api/start-debate", post(start_debate))
        .route("/api/process-argument", post(process_argument))
        .route("/api/get-scores/:session_id", get(get_scores))
        .route("/api/end-debate", post(end_debate))
        .route("/api/voice/transcribe", post(transcribe))
        .route("/api/voice/process", post(process_voice_argument))
        .with_state(state)
}

fn parse_session(raw: &str) -> Result<SessionId, ApiError> {
    Ok(raw.parse::<SessionId>()?)
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        active_sessions: state.service.registry().active_count(),
        provider_configured: state.service.has_provider(),
        speech_configured: state.speech.is_some(),
    })
}

async fn user_stats(State(state): State<Arc<AppState>>) -> Json<UserStatsResponse> {
    let profile = state.service.profile().await;
    Json(UserStatsResponse::from(&profile))
}

async fn stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    let profile = state.service.profile().await;
    let today = state
        .service
        .match_logger()
        .and_then(|logger| match logger.today_summary() {
            Ok(summary) => Some(summary),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read match history");
                None
            }
        });
    Json(StatsResponse::new(&profile, today))
}

async fn start_debate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<StartDebateRequest>, JsonRejection>,
) -> ApiResult<StartDebateResponse> {
    let Json(req) = payload?;
    let start = state.service.start_session(req.mode(), req.difficulty())?;
    Ok(Json(start.into()))
}

async fn process_argument(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ArgumentRequest>, JsonRejection>,
) -> ApiResult<ArgumentResponse> {
    let Json(req) = payload?;
    let id = parse_session(&req.session_id)?;
    let outcome = state.service.submit_turn(id, &req.text).await?;
    Ok(Json(outcome.into()))
}

async fn get_scores(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> ApiResult<ScoresResponse> {
    let id = parse_session(&session_id)?;
    let scores = state.service.current_scores(id).await?;
    Ok(Json(ScoresResponse {
        success: true,
        scores,
    }))
}

async fn end_debate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SessionRequest>, JsonRejection>,
) -> ApiResult<EndDebateResponse> {
    let Json(req) = payload?;
    let id = parse_session(&req.session_id)?;
    let result = state.service.end_session(id).await?;
    Ok(Json(result.into()))
}

/// A failed transcription is reported as an empty transcript
async fn transcribe(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TranscribeRequest>, JsonRejection>,
) -> ApiResult<TranscribeResponse> {
    let Json(req) = payload?;
    let id = parse_session(&req.session_id)?;
    state.service.registry().get(id)?;
    let speech = state.speech()?;

    let audio = STANDARD
        .decode(req.audio.trim())
        .map_err(|e| ApiError::BadRequest(format!("Invalid base64 audio: {}", e)))?;

    let transcript = match speech.transcribe(&audio).await {
        Ok(text) => text,
        Err(e) => {
            let err = DebateError::Transcription(format!("{:#}", e));
            tracing::warn!(session_id = %id, error = %err, "Returning empty transcript");
            String::new()
        }
    };

    Ok(Json(TranscribeResponse {
        success: true,
        transcript,
    }))
}

/// Like `process-argument`, with the rebuttal voiced as base64 MP3.
/// Synthesis failure drops the audio but keeps the turn.
async fn process_voice_argument(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ArgumentRequest>, JsonRejection>,
) -> ApiResult<ArgumentResponse> {
    let Json(req) = payload?;
    let id = parse_session(&req.session_id)?;
    let speech = state.speech()?;

    let outcome = state.service.submit_turn(id, &req.text).await?;
    let audio = match speech.synthesize(&outcome.rebuttal).await {
        Ok(bytes) => Some(STANDARD.encode(bytes)),
        Err(e) => {
            let err = DebateError::Speech(format!("{:#}", e));
            tracing::warn!(session_id = %id, error = %err, "Sending rebuttal without audio");
            None
        }
    };

    let mut response = ArgumentResponse::from(outcome);
    response.audio = audio;
    Ok(Json(response))
}
