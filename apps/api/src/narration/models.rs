//! Request options and result types for narration work.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default synthesis speed. Sanskrit is additionally capped by the
/// orchestrator so chanted text stays intelligible.
pub const DEFAULT_SPEED: f32 = 0.85;

/// Preferred voice gender; Narakeet voices are gendered per language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

/// Outcome class of one (verse, language) item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Succeeded,
    Skipped,
    Failed,
}

/// Where a narrated text came from. Everything past `Commentary` is a
/// cross-language substitution and counts as a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Direct,
    LegacyField,
    Commentary,
    Devanagari,
    HindiAsSanskrit,
    EnglishDisclaimer,
    Translated,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Direct => "direct",
            Provenance::LegacyField => "legacy_field",
            Provenance::Commentary => "commentary",
            Provenance::Devanagari => "devanagari",
            Provenance::HindiAsSanskrit => "hindi_as_sanskrit",
            Provenance::EnglishDisclaimer => "english_disclaimer",
            Provenance::Translated => "translated",
        }
    }

    /// True when the text was substituted from another language.
    pub fn is_fallback(&self) -> bool {
        matches!(
            self,
            Provenance::Devanagari
                | Provenance::HindiAsSanskrit
                | Provenance::EnglishDisclaimer
                | Provenance::Translated
        )
    }
}

/// Caller-tunable knobs for one narration batch.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Language codes as requested; unknown codes become skipped items.
    pub languages: Vec<String>,
    pub gender: Gender,
    /// Record items with no resolvable text as skipped instead of failed.
    pub skip_missing: bool,
    /// Enable cross-language substitution tiers.
    pub use_fallbacks: bool,
    /// Hard cap on batch size; exceeding it rejects the whole request.
    pub max_verses: Option<usize>,
    /// Sanskrit only: prefer romanized transliteration over Devanagari.
    pub include_transliteration: bool,
    pub speed: f32,
    /// Play each file locally after writing it.
    pub play: bool,
    /// Replaces the per-language voice table for every item.
    pub voice: Option<String>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_string()],
            gender: Gender::default(),
            skip_missing: false,
            use_fallbacks: false,
            max_verses: None,
            include_transliteration: false,
            speed: DEFAULT_SPEED,
            play: false,
            voice: None,
        }
    }
}

/// One (verse, language) outcome inside a batch summary.
#[derive(Debug, Clone, Serialize)]
pub struct BatchItemResult {
    pub verse_id: String,
    pub language: String,
    pub status: ItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provenance: Option<Provenance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_file: Option<String>,
    /// Why the item was skipped or failed. Absent on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub fallback_used: bool,
    pub played: bool,
}

impl BatchItemResult {
    /// An item that never reached synthesis (skip or failure before audio).
    pub fn unresolved(
        verse_id: &str,
        language: &str,
        status: ItemStatus,
        reason: String,
    ) -> Self {
        Self {
            verse_id: verse_id.to_string(),
            language: language.to_string(),
            status,
            text: None,
            provenance: None,
            voice: None,
            audio_file: None,
            reason: Some(reason),
            fallback_used: false,
            played: false,
        }
    }
}

/// Per-verse rollup inside a batch summary.
#[derive(Debug, Clone, Serialize)]
pub struct VerseSummary {
    pub verse_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter: Option<u32>,
    pub attempted: usize,
    pub succeeded: usize,
}

/// Aggregate result of one narration batch.
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub batch_id: Uuid,
    /// Verses with at least one succeeded item.
    pub processed: usize,
    /// Verses with no succeeded or failed items.
    pub skipped: usize,
    /// Verses where every attempted item failed.
    pub failed: usize,
    pub fallbacks_used: usize,
    /// Distinct chapter numbers seen, ascending.
    pub chapters: Vec<u32>,
    pub verses: Vec<VerseSummary>,
    pub items: Vec<BatchItemResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_narrate_english_only() {
        let opts = BatchOptions::default();
        assert_eq!(opts.languages, vec!["en".to_string()]);
        assert_eq!(opts.gender, Gender::Male);
        assert!(!opts.skip_missing);
        assert!(!opts.use_fallbacks);
        assert!(opts.max_verses.is_none());
        assert_eq!(opts.speed, DEFAULT_SPEED);
    }

    #[test]
    fn test_fallback_provenance_classification() {
        assert!(!Provenance::Direct.is_fallback());
        assert!(!Provenance::LegacyField.is_fallback());
        assert!(!Provenance::Commentary.is_fallback());
        assert!(Provenance::Devanagari.is_fallback());
        assert!(Provenance::HindiAsSanskrit.is_fallback());
        assert!(Provenance::EnglishDisclaimer.is_fallback());
        assert!(Provenance::Translated.is_fallback());
    }

    #[test]
    fn test_item_serialization_omits_absent_fields() {
        let item = BatchItemResult::unresolved(
            "BG1.1",
            "gu",
            ItemStatus::Skipped,
            "no gujarati text resolved".to_string(),
        );
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["status"], "skipped");
        assert_eq!(json["reason"], "no gujarati text resolved");
        assert!(json.get("text").is_none());
        assert!(json.get("audio_file").is_none());
    }

    #[test]
    fn test_provenance_serializes_snake_case() {
        let json = serde_json::to_value(Provenance::HindiAsSanskrit).unwrap();
        assert_eq!(json, "hindi_as_sanskrit");
        assert_eq!(Provenance::HindiAsSanskrit.as_str(), "hindi_as_sanskrit");
    }
}
