use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::state::AppState;
use crate::verses::models::LangCode;

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": "0.1.0",
        "service": "gita-api",
        "provider": "narakeet"
    }))
}

/// GET /
/// Service description: endpoint map and supported languages.
pub async fn root_handler(State(state): State<AppState>) -> Json<Value> {
    let mut languages = serde_json::Map::new();
    for lang in LangCode::ALL {
        languages.insert(lang.as_str().to_string(), json!(lang.display_name()));
    }

    Json(json!({
        "message": "Bhagavad Gita narration API with translation support",
        "version": "0.1.0",
        "provider": "narakeet",
        "output_dir": state.config.output_dir,
        "endpoints": {
            "POST /api/v1/narrate": "Narrate a verse payload across languages",
            "POST /api/v1/synthesize": "Synthesize raw text to speech with translation",
            "POST /api/v1/synthesize/verse": "Synthesize one verse and stream the MP3",
            "GET /api/v1/voices": "Voice catalog by language and gender",
            "GET /api/v1/languages": "Supported languages",
            "GET /api/v1/audio": "List generated audio files",
            "GET /api/v1/audio/:filename": "Download an audio file"
        },
        "languages": Value::Object(languages),
    }))
}
