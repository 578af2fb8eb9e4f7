use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::providers::SynthesisError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Batch item failures never become an `AppError`: the orchestrator records
/// them per item and the batch itself returns 200. Only request-level
/// problems (bad payloads, single-shot synthesis, store I/O) surface here.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Synthesis timeout: {0}")]
    SynthesisTimeout(String),

    #[error("Synthesis error: {0}")]
    Synthesis(String),

    #[error("Store error: {0}")]
    Store(#[from] std::io::Error),
}

impl From<SynthesisError> for AppError {
    fn from(e: SynthesisError) -> Self {
        match &e {
            SynthesisError::Timeout(_) => AppError::SynthesisTimeout(e.to_string()),
            _ => AppError::Synthesis(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::SynthesisTimeout(msg) => {
                tracing::error!("Synthesis timeout: {msg}");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "SYNTHESIS_TIMEOUT",
                    "The speech provider timed out".to_string(),
                )
            }
            AppError::Synthesis(msg) => {
                tracing::error!("Synthesis error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "SYNTHESIS_ERROR",
                    "The speech provider failed".to_string(),
                )
            }
            AppError::Store(e) => {
                tracing::error!("Store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "An audio storage error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
