use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Only the Narakeet API key is required; everything else has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub narakeet_api_key: String,
    pub narakeet_base_url: String,
    pub translate_base_url: String,
    pub output_dir: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            narakeet_api_key: require_env("NARAKEET_API_KEY")?,
            narakeet_base_url: std::env::var("NARAKEET_BASE_URL")
                .unwrap_or_else(|_| "https://api.narakeet.com".to_string()),
            translate_base_url: std::env::var("TRANSLATE_BASE_URL")
                .unwrap_or_else(|_| "https://translate.googleapis.com".to_string()),
            output_dir: std::env::var("AUDIO_OUTPUT_DIR")
                .unwrap_or_else(|_| "audio_output".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8081".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
