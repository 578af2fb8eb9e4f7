mod audio;
mod config;
mod errors;
mod narration;
mod providers;
mod routes;
mod state;
mod verses;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::audio::store::AudioStore;
use crate::config::Config;
use crate::providers::narakeet::NarakeetClient;
use crate::providers::playback::FfplayPlayer;
use crate::providers::translate::GoogleTranslateClient;
use crate::providers::Providers;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (panics on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let target = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{target}={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Gita narration API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the audio store
    let store = AudioStore::create(&config.output_dir)?;
    info!("Audio store ready at {}", config.output_dir);

    // Initialize providers
    let providers = Providers {
        tts: Arc::new(NarakeetClient::new(
            config.narakeet_base_url.clone(),
            config.narakeet_api_key.clone(),
        )),
        translator: Arc::new(GoogleTranslateClient::new(config.translate_base_url.clone())),
        player: Arc::new(FfplayPlayer),
    };
    info!("Providers initialized (tts: narakeet, playback: ffplay)");

    // Build app state
    let state = AppState {
        providers,
        store,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
