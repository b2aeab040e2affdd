// HTTP server for the browser front end

mod api_types;
mod error;
mod handlers;

pub use api_types::*;
pub use error::ApiError;
pub use handlers::{create_router, health_check};

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::constants::MAX_BODY_BYTES;
use crate::config::{Config, ServerConfig};
use crate::debate::DebateService;
use crate::errors::DebateError;
use crate::voice::{DeepgramClient, SpeechProvider};

/// Shared state behind every handler
pub struct AppState {
    pub service: DebateService,
    pub speech: Option<Arc<dyn SpeechProvider>>,
}

impl AppState {
    pub fn new(service: DebateService) -> Self {
        Self {
            service,
            speech: None,
        }
    }

    pub fn with_speech(mut self, speech: Arc<dyn SpeechProvider>) -> Self {
        self.speech = Some(speech);
        self
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let mut state = Self::new(DebateService::from_config(config)?);

        if let Some(key) = &config.deepgram_api_key {
            let mut client = DeepgramClient::new(key.clone())?;
            if let Some(url) = &config.deepgram_base_url {
                client = client.with_base_url(url.clone());
            }
            state = state.with_speech(Arc::new(client));
        } else {
            tracing::info!("DEEPGRAM_API_KEY not set, voice routes disabled");
        }

        Ok(state)
    }

    pub(crate) fn speech(&self) -> Result<&Arc<dyn SpeechProvider>, DebateError> {
        self.speech
            .as_ref()
            .ok_or_else(|| DebateError::Configuration("Deepgram API key not configured".into()))
    }
}

/// Router with body limit, CORS and request tracing
pub fn build_app(state: Arc<AppState>, server: &ServerConfig) -> Result<axum::Router> {
    Ok(create_router(state)
        .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors_layer(server)?)
        .layer(TraceLayer::new_for_http()))
}

fn cors_layer(server: &ServerConfig) -> Result<CorsLayer> {
    if server.cors_origins.is_empty() {
        return Ok(CorsLayer::permissive());
    }

    let origins = server
        .cors_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any))
}

/// Bind and serve until the process is stopped
pub async fn serve(config: &Config) -> Result<()> {
    let addr = config.bind_addr()?;
    let state = Arc::new(AppState::from_config(config)?);
    let app = build_app(state, &config.server)?;

    tracing::info!(%addr, "Starting yapbattle server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
