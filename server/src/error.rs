use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// API Error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Could not decode source audio: {0}")]
    AudioDecode(#[from] audio_core::DecodeError),

    #[error("Could not encode output: {0}")]
    AudioEncode(#[from] audio_core::InvalidBufferError),

    #[error("AI service error: {0}")]
    Ai(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Error response structure
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            // A source the user supplied failed to decode.
            ApiError::AudioDecode(e) => {
                tracing::warn!("audio decode rejected: {}", e);
                (StatusCode::BAD_REQUEST, format!("Could not decode source audio: {e}"))
            }
            // The encoder refused a buffer we built ourselves.
            ApiError::AudioEncode(e) => {
                tracing::error!("audio encode failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Could not encode output: {e}"))
            }
            ApiError::Ai(msg) => {
                tracing::error!("AI service error: {}", msg);
                (StatusCode::BAD_GATEWAY, format!("AI service error: {msg}"))
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = Json(ErrorResponse {
            error: error_message,
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}
