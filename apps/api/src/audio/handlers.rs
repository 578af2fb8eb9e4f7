//! HTTP surface for stored audio: listing and download.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::audio::store::is_safe_filename;
use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/v1/audio
pub async fn handle_list_audio(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let files = state.store.list()?;
    Ok(Json(json!({ "files": files })))
}

/// GET /api/v1/audio/:filename
pub async fn handle_get_audio(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    if !is_safe_filename(&filename) {
        return Err(AppError::Validation(format!(
            "invalid audio filename: {filename}"
        )));
    }

    let path = state.store.path_of(&filename);
    if !path.is_file() {
        return Err(AppError::NotFound(format!("audio file {filename}")));
    }

    let bytes = std::fs::read(&path)?;
    Ok(([(header::CONTENT_TYPE, "audio/mpeg")], bytes).into_response())
}
