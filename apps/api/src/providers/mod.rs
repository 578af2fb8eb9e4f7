//! Provider seams: speech synthesis, translation, local playback.
//!
//! ARCHITECTURAL RULE: no other module may talk to Narakeet, the translation
//! endpoint, or ffplay directly. All provider I/O goes through these traits
//! so handlers and the batch orchestrator can be exercised against stubs.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::verses::models::LangCode;

pub mod narakeet;
pub mod playback;
pub mod translate;

#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("synthesis timed out after {0}s")]
    Timeout(u64),

    #[error("provider error (status {status}): {message}")]
    Provider { status: u16, message: String },
}

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("translation timed out after {0}s")]
    Timeout(u64),

    #[error("translation endpoint error (status {status}): {message}")]
    Provider { status: u16, message: String },

    #[error("translation failed after {retries} attempts")]
    RetriesExhausted { retries: u32 },

    #[error("translation response had no usable segments")]
    Malformed,
}

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("ffplay not found on PATH")]
    BinaryMissing,

    #[error("playback I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("playback timed out after {0}s")]
    Timeout(u64),

    #[error("player exited with status {code}: {stderr}")]
    Exit { code: i32, stderr: String },
}

/// Converts text to spoken audio. Implementations must return the full
/// encoded MP3 body, never a partial stream.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, voice: &str, speed: f32)
        -> Result<Bytes, SynthesisError>;
}

/// Translates English source text into a target language.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target: LangCode) -> Result<String, TranslateError>;
}

/// Plays a finished audio file on the host machine.
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    async fn play(&self, path: &Path) -> Result<(), PlaybackError>;
}

/// Provider handles carried in `AppState` and threaded through the
/// orchestrator. Cloning is cheap: each field is an `Arc`.
#[derive(Clone)]
pub struct Providers {
    pub tts: Arc<dyn SpeechSynthesizer>,
    pub translator: Arc<dyn Translator>,
    pub player: Arc<dyn AudioPlayer>,
}
