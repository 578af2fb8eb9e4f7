pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::audio::handlers as audio_handlers;
use crate::narration::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Catalogs
        .route("/api/v1/voices", get(handlers::handle_voices))
        .route("/api/v1/languages", get(handlers::handle_languages))
        // Narration API
        .route("/api/v1/narrate", post(handlers::handle_narrate))
        .route("/api/v1/synthesize", post(handlers::handle_synthesize))
        .route(
            "/api/v1/synthesize/verse",
            post(handlers::handle_synthesize_verse),
        )
        // Stored audio
        .route("/api/v1/audio", get(audio_handlers::handle_list_audio))
        .route(
            "/api/v1/audio/:filename",
            get(audio_handlers::handle_get_audio),
        )
        .with_state(state)
}
