use crate::audio::store::AudioStore;
use crate::config::Config;
use crate::providers::Providers;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub providers: Providers,
    pub store: AudioStore,
    pub config: Config,
}
