//! HTTP surface for narration: batch narrate, plain-text synthesis, the
//! single-verse streaming endpoint, and the voice/language catalogs.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

use crate::audio::store::sanitize_id;
use crate::errors::AppError;
use crate::narration::models::{BatchOptions, BatchSummary, Gender, DEFAULT_SPEED};
use crate::narration::orchestrator::{effective_speed, process_batch, resolve_item};
use crate::narration::text_format::narration_text;
use crate::narration::voices::{recommended_voice, voices_for};
use crate::state::AppState;
use crate::verses::detect::{normalize_payload, normalize_record};
use crate::verses::models::LangCode;

fn default_speed() -> f32 {
    DEFAULT_SPEED
}

fn default_language() -> String {
    "en".to_string()
}

fn default_true() -> bool {
    true
}

// ────────────────────────────────────────────────────────────────────────────
// POST /api/v1/narrate
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct NarrateQuery {
    /// Comma-separated language codes.
    #[serde(default = "default_language")]
    pub languages: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub skip_missing: bool,
    #[serde(default)]
    pub use_fallbacks: bool,
    #[serde(default)]
    pub max_verses: Option<usize>,
    #[serde(default)]
    pub include_transliteration: bool,
    #[serde(default = "default_speed")]
    pub speed: f32,
    #[serde(default)]
    pub play: bool,
    #[serde(default)]
    pub voice: Option<String>,
}

impl NarrateQuery {
    fn into_options(self) -> BatchOptions {
        BatchOptions {
            languages: self
                .languages
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            gender: self.gender,
            skip_missing: self.skip_missing,
            use_fallbacks: self.use_fallbacks,
            max_verses: self.max_verses,
            include_transliteration: self.include_transliteration,
            speed: self.speed,
            play: self.play,
            voice: self.voice,
        }
    }
}

/// POST /api/v1/narrate
///
/// Body: a verse payload in any accepted shape. Returns the batch summary;
/// item-level problems are reported inside it, never as an HTTP error.
pub async fn handle_narrate(
    State(state): State<AppState>,
    Query(query): Query<NarrateQuery>,
    Json(payload): Json<Value>,
) -> Result<Json<BatchSummary>, AppError> {
    let verses = normalize_payload(&payload);
    let options = query.into_options();
    let summary = process_batch(&state.providers, &state.store, &verses, &options).await?;
    Ok(Json(summary))
}

// ────────────────────────────────────────────────────────────────────────────
// POST /api/v1/synthesize
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SynthesizeQuery {
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub voice: Option<String>,
    #[serde(default = "default_speed")]
    pub speed: f32,
    #[serde(default = "default_true")]
    pub play: bool,
}

#[derive(Debug, Serialize)]
pub struct SynthesizeResponse {
    pub success: bool,
    pub message: String,
    pub original_text: String,
    pub final_text: String,
    pub translation_used: bool,
    pub audio_file: String,
    pub full_path: String,
    pub voice: String,
    pub language: String,
    pub speed: f32,
    pub played: bool,
    pub file_size_bytes: usize,
}

/// POST /api/v1/synthesize
///
/// Body: raw UTF-8 text. Hindi/Gujarati requests translate the text first
/// and fall back to the original on any translation problem; Sanskrit reads
/// the text as provided, at the capped speed.
pub async fn handle_synthesize(
    State(state): State<AppState>,
    Query(query): Query<SynthesizeQuery>,
    text: String,
) -> Result<Json<SynthesizeResponse>, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let lang = query
        .language
        .parse::<LangCode>()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let final_text = match lang {
        LangCode::Hi | LangCode::Gu => {
            match state.providers.translator.translate(&text, lang).await {
                Ok(translated) if !translated.trim().is_empty() => translated,
                Ok(_) => {
                    warn!("translation returned empty text, using original");
                    text.clone()
                }
                Err(e) => {
                    warn!("translation failed, using original text: {e}");
                    text.clone()
                }
            }
        }
        _ => text.clone(),
    };

    let voice = query
        .voice
        .unwrap_or_else(|| recommended_voice(lang, query.gender).to_string());
    let speed = effective_speed(query.speed, lang);

    let audio = state
        .providers
        .tts
        .synthesize(&final_text, &voice, speed)
        .await?;
    let file_size_bytes = audio.len();
    let audio_file = state.store.save(&voice, &audio)?;
    let full_path = state.store.path_of(&audio_file).display().to_string();

    let mut played = false;
    if query.play {
        match state
            .providers
            .player
            .play(&state.store.path_of(&audio_file))
            .await
        {
            Ok(()) => played = true,
            Err(e) => warn!("playback failed for {audio_file}: {e}"),
        }
    }

    Ok(Json(SynthesizeResponse {
        success: true,
        message: "Synthesis completed successfully".to_string(),
        translation_used: lang != LangCode::En && final_text != text,
        original_text: text,
        final_text,
        audio_file,
        full_path,
        voice,
        language: lang.as_str().to_string(),
        speed,
        played,
        file_size_bytes,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// POST /api/v1/synthesize/verse
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SynthesizeVerseQuery {
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub voice: Option<String>,
    #[serde(default = "default_speed")]
    pub speed: f32,
    #[serde(default)]
    pub use_fallbacks: bool,
}

/// POST /api/v1/synthesize/verse
///
/// Body: one verse object. Resolves its text the way a batch item would and
/// streams the MP3 back directly instead of persisting it.
pub async fn handle_synthesize_verse(
    State(state): State<AppState>,
    Query(query): Query<SynthesizeVerseQuery>,
    Json(payload): Json<Value>,
) -> Result<Response, AppError> {
    let record = normalize_record(&payload, None);

    let lang = query
        .language
        .parse::<LangCode>()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let options = BatchOptions {
        languages: vec![lang.as_str().to_string()],
        gender: query.gender,
        use_fallbacks: query.use_fallbacks,
        speed: query.speed,
        voice: query.voice,
        ..BatchOptions::default()
    };

    let resolved = resolve_item(&record, lang, &options, state.providers.translator.as_ref())
        .await
        .ok_or_else(|| {
            AppError::UnprocessableEntity(format!(
                "no text resolved for language '{}'",
                lang.as_str()
            ))
        })?;

    let verse_id = record.id.clone().unwrap_or_else(|| "unknown".to_string());
    let voice = options
        .voice
        .clone()
        .unwrap_or_else(|| recommended_voice(lang, query.gender).to_string());
    let speed = effective_speed(query.speed, lang);
    let spoken = narration_text(&record, &resolved.text, lang);

    let audio = state.providers.tts.synthesize(&spoken, &voice, speed).await?;

    let safe_id = sanitize_id(&verse_id);
    let headers = [
        ("content-type", "audio/mpeg".to_string()),
        (
            "content-disposition",
            format!("attachment; filename=\"verse_{safe_id}.mp3\""),
        ),
        ("x-verse-id", safe_id.clone()),
        ("x-voice-used", voice),
        ("x-provenance", resolved.provenance.as_str().to_string()),
    ];
    Ok((headers, audio).into_response())
}

// ────────────────────────────────────────────────────────────────────────────
// Catalogs
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/voices
pub async fn handle_voices() -> Json<Value> {
    let mut catalog = serde_json::Map::new();
    for lang in LangCode::ALL {
        catalog.insert(
            lang.as_str().to_string(),
            json!({
                "name": lang.display_name(),
                "male": voices_for(lang, Gender::Male),
                "female": voices_for(lang, Gender::Female),
            }),
        );
    }
    Json(Value::Object(catalog))
}

/// GET /api/v1/languages
pub async fn handle_languages() -> Json<Value> {
    let languages: Vec<Value> = LangCode::ALL
        .iter()
        .map(|lang| {
            json!({
                "code": lang.as_str(),
                "name": lang.display_name(),
                "native_name": lang.native_name(),
            })
        })
        .collect();
    Json(json!({ "languages": languages }))
}
