// HTTP error mapping
//
// Every failure leaves the server as `{"success": false, "error": "..."}`.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::errors::DebateError;

#[derive(Debug)]
pub enum ApiError {
    Debate(DebateError),
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Debate(err) => match err {
                DebateError::InvalidSession(_) => StatusCode::BAD_REQUEST,
                DebateError::Configuration(_) | DebateError::Persistence(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                DebateError::Provider(_)
                | DebateError::Transcription(_)
                | DebateError::Speech(_) => StatusCode::BAD_GATEWAY,
            },
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::Debate(DebateError::InvalidSession(_)) => "Invalid session".to_string(),
            ApiError::Debate(err) => err.to_string(),
        }
    }
}

impl From<DebateError> for ApiError {
    fn from(err: DebateError) -> Self {
        ApiError::Debate(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self.message(), "Request failed");
        } else {
            tracing::debug!(status = %status, error = %self.message(), "Request rejected");
        }

        (
            status,
            Json(json!({ "success": false, "error": self.message() })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DebateError::InvalidSession("x".into()), StatusCode::BAD_REQUEST),
            (
                DebateError::Configuration("no key".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                DebateError::Persistence("disk".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (DebateError::Provider("503".into()), StatusCode::BAD_GATEWAY),
            (DebateError::Speech("tts".into()), StatusCode::BAD_GATEWAY),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
        assert_eq!(
            ApiError::BadRequest("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_invalid_session_message() {
        let err = ApiError::from(DebateError::InvalidSession("abc".into()));
        assert_eq!(err.message(), "Invalid session");
    }
}
