//! Batch narration orchestrator: verses crossed with languages.
//!
//! Flow per item: resolve text (the language's own chain, then at most one
//! fallback tier), pick a voice, shape the spoken text, synthesize, persist,
//! optionally play.
//!
//! CRITICAL: item-level problems (unresolved text, provider failures,
//! unsupported language codes) are recorded on the item and never abort the
//! batch. Only request validation rejects the whole call.

use std::collections::{BTreeSet, HashSet};

use tracing::{info, warn};
use uuid::Uuid;

use crate::audio::store::{sanitize_id, AudioStore};
use crate::errors::AppError;
use crate::narration::models::{
    BatchItemResult, BatchOptions, BatchSummary, ItemStatus, Provenance, VerseSummary,
};
use crate::narration::text_format::narration_text;
use crate::narration::voices::recommended_voice;
use crate::providers::{Providers, Translator};
use crate::verses::extract::{extract, TextSource};
use crate::verses::models::{LangCode, TextType, VerseRecord};

/// Sanskrit is chanted; faster rates smear the sandhi. Requested speeds are
/// clamped down to this for `sa`.
pub const SANSKRIT_SPEED_CAP: f32 = 0.75;

/// Spoken prefix when Sanskrit narration falls back to English text.
const ENGLISH_DISCLAIMER: &str = "Sanskrit text unavailable. Reading the English translation.";

// ────────────────────────────────────────────────────────────────────────────
// Speed and text-type selection
// ────────────────────────────────────────────────────────────────────────────

pub fn effective_speed(speed: f32, lang: LangCode) -> f32 {
    match lang {
        LangCode::Sa => speed.min(SANSKRIT_SPEED_CAP),
        _ => speed,
    }
}

fn primary_text_type(lang: LangCode, include_transliteration: bool) -> TextType {
    match lang {
        LangCode::En => TextType::English,
        LangCode::Hi => TextType::Hindi,
        LangCode::Gu => TextType::Gujarati,
        LangCode::Sa if include_transliteration => TextType::Sanskrit,
        LangCode::Sa => TextType::SanskritDevanagari,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Request validation (fatal; everything after this is per-item)
// ────────────────────────────────────────────────────────────────────────────

/// Rejects the whole batch before any verse is touched: a language list,
/// a unique non-empty `_id` per record, and the `max_verses` cap.
pub fn validate_batch(verses: &[VerseRecord], options: &BatchOptions) -> Result<(), AppError> {
    if options.languages.is_empty() {
        return Err(AppError::Validation("no languages requested".to_string()));
    }

    if let Some(max) = options.max_verses {
        if verses.len() > max {
            return Err(AppError::Validation(format!(
                "batch has {} verses, exceeding max_verses={max}",
                verses.len()
            )));
        }
    }

    let mut seen = HashSet::new();
    for (index, record) in verses.iter().enumerate() {
        let id = record.id.as_deref().map(str::trim).unwrap_or("");
        if id.is_empty() {
            return Err(AppError::Validation(format!(
                "verse at index {index} is missing _id"
            )));
        }
        if !seen.insert(id) {
            return Err(AppError::Validation(format!("duplicate verse _id '{id}'")));
        }
    }

    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Text resolution
// ────────────────────────────────────────────────────────────────────────────

/// Text one item will narrate, with its provenance.
pub(crate) struct ResolvedText {
    pub text: String,
    pub provenance: Provenance,
}

fn provenance_of(source: TextSource) -> Provenance {
    match source {
        TextSource::Direct => Provenance::Direct,
        TextSource::LegacyField => Provenance::LegacyField,
        TextSource::Commentary => Provenance::Commentary,
    }
}

/// Resolves what an item narrates: the language's own chain first, then at
/// most one fallback tier when `use_fallbacks` is set. The first tier that
/// yields non-empty text wins; later tiers are never consulted.
pub(crate) async fn resolve_item(
    record: &VerseRecord,
    lang: LangCode,
    options: &BatchOptions,
    translator: &dyn Translator,
) -> Option<ResolvedText> {
    let primary = primary_text_type(lang, options.include_transliteration);
    if let Some(resolved) = extract(record, primary) {
        return Some(ResolvedText {
            text: resolved.text,
            provenance: provenance_of(resolved.source),
        });
    }

    if !options.use_fallbacks {
        return None;
    }

    match lang {
        LangCode::Sa => resolve_sanskrit_fallback(record),
        LangCode::Hi | LangCode::Gu => resolve_translated_fallback(record, lang, translator).await,
        LangCode::En => None,
    }
}

/// Sanskrit tiers in order: Devanagari text, Hindi read as Sanskrit,
/// English behind a spoken disclaimer.
fn resolve_sanskrit_fallback(record: &VerseRecord) -> Option<ResolvedText> {
    if let Some(resolved) = extract(record, TextType::SanskritDevanagari) {
        return Some(ResolvedText {
            text: resolved.text,
            provenance: Provenance::Devanagari,
        });
    }
    if let Some(resolved) = extract(record, TextType::Hindi) {
        return Some(ResolvedText {
            text: resolved.text,
            provenance: Provenance::HindiAsSanskrit,
        });
    }
    if let Some(resolved) = extract(record, TextType::English) {
        return Some(ResolvedText {
            text: format!("{ENGLISH_DISCLAIMER} {}", resolved.text),
            provenance: Provenance::EnglishDisclaimer,
        });
    }
    None
}

/// Hindi/Gujarati tier: machine-translate the verse's resolved English text.
/// A translation failure or empty result makes the tier yield nothing; an
/// unchanged result is accepted with a warning.
async fn resolve_translated_fallback(
    record: &VerseRecord,
    lang: LangCode,
    translator: &dyn Translator,
) -> Option<ResolvedText> {
    let english = extract(record, TextType::English)?;
    let verse_id = record.id.as_deref().unwrap_or("?");

    match translator.translate(&english.text, lang).await {
        Ok(translated) => {
            let translated = translated.trim().to_string();
            if translated.is_empty() {
                warn!("translation to {lang} returned empty text for verse {verse_id}");
                return None;
            }
            if translated == english.text {
                warn!("translation to {lang} returned input unchanged for verse {verse_id}");
            }
            Some(ResolvedText {
                text: translated,
                provenance: Provenance::Translated,
            })
        }
        Err(e) => {
            warn!("translation to {lang} failed for verse {verse_id}: {e}");
            None
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Item processing
// ────────────────────────────────────────────────────────────────────────────

async fn process_item(
    providers: &Providers,
    store: &AudioStore,
    record: &VerseRecord,
    requested_lang: &str,
    options: &BatchOptions,
) -> BatchItemResult {
    let verse_id = record.id.clone().unwrap_or_default();

    let lang = match requested_lang.parse::<LangCode>() {
        Ok(lang) => lang,
        Err(e) => {
            warn!("skipping verse {verse_id}: {e}");
            return BatchItemResult::unresolved(
                &verse_id,
                requested_lang,
                ItemStatus::Skipped,
                e.to_string(),
            );
        }
    };

    let Some(resolved) = resolve_item(record, lang, options, providers.translator.as_ref()).await
    else {
        let status = if options.skip_missing {
            ItemStatus::Skipped
        } else {
            ItemStatus::Failed
        };
        return BatchItemResult::unresolved(
            &verse_id,
            lang.as_str(),
            status,
            format!("no text resolved for language '{}'", lang.as_str()),
        );
    };

    let voice = options
        .voice
        .clone()
        .unwrap_or_else(|| recommended_voice(lang, options.gender).to_string());
    let speed = effective_speed(options.speed, lang);
    let spoken = narration_text(record, &resolved.text, lang);

    let audio = match providers.tts.synthesize(&spoken, &voice, speed).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("synthesis failed for verse {verse_id} ({lang}): {e}");
            return BatchItemResult {
                verse_id,
                language: lang.as_str().to_string(),
                status: ItemStatus::Failed,
                text: Some(resolved.text),
                provenance: Some(resolved.provenance),
                voice: Some(voice),
                audio_file: None,
                reason: Some(e.to_string()),
                fallback_used: resolved.provenance.is_fallback(),
                played: false,
            };
        }
    };

    let stem = format!("{}-{}-{voice}", sanitize_id(&verse_id), lang.as_str());
    let audio_file = match store.save(&stem, &audio) {
        Ok(name) => name,
        Err(e) => {
            warn!("failed to store audio for verse {verse_id} ({lang}): {e}");
            return BatchItemResult {
                verse_id,
                language: lang.as_str().to_string(),
                status: ItemStatus::Failed,
                text: Some(resolved.text),
                provenance: Some(resolved.provenance),
                voice: Some(voice),
                audio_file: None,
                reason: Some(format!("store error: {e}")),
                fallback_used: resolved.provenance.is_fallback(),
                played: false,
            };
        }
    };

    // Playback is a side effect: its failure never changes the outcome.
    let mut played = false;
    if options.play {
        match providers.player.play(&store.path_of(&audio_file)).await {
            Ok(()) => played = true,
            Err(e) => warn!("playback failed for {audio_file}: {e}"),
        }
    }

    BatchItemResult {
        verse_id,
        language: lang.as_str().to_string(),
        status: ItemStatus::Succeeded,
        text: Some(resolved.text),
        provenance: Some(resolved.provenance),
        voice: Some(voice),
        audio_file: Some(audio_file),
        reason: None,
        fallback_used: resolved.provenance.is_fallback(),
        played,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Batch loop
// ────────────────────────────────────────────────────────────────────────────

/// Runs a whole narration batch sequentially, verse-major: every verse is
/// attempted in every requested language before the next verse starts.
///
/// A verse counts as processed when at least one of its items succeeded,
/// failed when none succeeded and at least one failed, skipped otherwise.
pub async fn process_batch(
    providers: &Providers,
    store: &AudioStore,
    verses: &[VerseRecord],
    options: &BatchOptions,
) -> Result<BatchSummary, AppError> {
    validate_batch(verses, options)?;

    let batch_id = Uuid::new_v4();
    info!(
        "batch {batch_id}: {} verses x {} languages (fallbacks: {}, skip_missing: {})",
        verses.len(),
        options.languages.len(),
        options.use_fallbacks,
        options.skip_missing
    );

    let mut items = Vec::with_capacity(verses.len() * options.languages.len());
    let mut verse_summaries = Vec::with_capacity(verses.len());
    let mut chapters = BTreeSet::new();
    let mut processed = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;

    for record in verses {
        if let Some(chapter) = record.chapter {
            chapters.insert(chapter);
        }

        let start = items.len();
        for language in &options.languages {
            let item = process_item(providers, store, record, language, options).await;
            items.push(item);
        }
        let verse_items = &items[start..];

        let succeeded = verse_items
            .iter()
            .filter(|i| i.status == ItemStatus::Succeeded)
            .count();
        let any_failed = verse_items.iter().any(|i| i.status == ItemStatus::Failed);
        if succeeded > 0 {
            processed += 1;
        } else if any_failed {
            failed += 1;
        } else {
            skipped += 1;
        }

        verse_summaries.push(VerseSummary {
            verse_id: record.id.clone().unwrap_or_default(),
            chapter: record.chapter,
            attempted: verse_items.len(),
            succeeded,
        });
    }

    let fallbacks_used = items.iter().filter(|i| i.fallback_used).count();

    info!(
        "batch {batch_id} finished: processed={processed} skipped={skipped} failed={failed} fallbacks={fallbacks_used}"
    );

    Ok(BatchSummary {
        batch_id,
        processed,
        skipped,
        failed,
        fallbacks_used,
        chapters: chapters.into_iter().collect(),
        verses: verse_summaries,
        items,
    })
}
