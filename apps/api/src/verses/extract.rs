//! Field extraction: resolves the best available text for a verse and a
//! requested text type through fixed fallback chains.
//!
//! CRITICAL: each chain below is a compatibility contract spanning three
//! schema generations. The first non-empty candidate wins and no later
//! candidate is consulted. Reordering a chain changes observable behavior
//! for existing verse corpora and must be treated as a breaking change.

use crate::verses::models::{CommentaryEntry, TextType, VerseRecord};

// ────────────────────────────────────────────────────────────────────────────
// Resolution result
// ────────────────────────────────────────────────────────────────────────────

/// Which tier of a chain produced a text value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    /// Current long-form field (`sanskrit`, `english`, ...).
    Direct,
    /// Legacy flat field (`slok`, `en`, ...).
    LegacyField,
    /// Nested per-commentator sub-field (`tej.st`, ...).
    Commentary,
}

/// A resolved text value plus the rule that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// Trimmed, non-empty text.
    pub text: String,
    pub source: TextSource,
    /// Field path that hit, e.g. "sanskrit" or "tej.st".
    pub path: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Lookup rules
// ────────────────────────────────────────────────────────────────────────────

/// Top-level text fields a rule can consult.
#[derive(Debug, Clone, Copy)]
enum Field {
    Sanskrit,
    English,
    Hindi,
    Gujarati,
    Slok,
    Transliteration,
    En,
    Hi,
    Gu,
    Sa,
}

impl Field {
    fn get<'a>(&self, record: &'a VerseRecord) -> Option<&'a str> {
        match self {
            Field::Sanskrit => record.sanskrit.as_deref(),
            Field::English => record.english.as_deref(),
            Field::Hindi => record.hindi.as_deref(),
            Field::Gujarati => record.gujarati.as_deref(),
            Field::Slok => record.slok.as_deref(),
            Field::Transliteration => record.transliteration.as_deref(),
            Field::En => record.en.as_deref(),
            Field::Hi => record.hi.as_deref(),
            Field::Gu => record.gu.as_deref(),
            Field::Sa => record.sa.as_deref(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Field::Sanskrit => "sanskrit",
            Field::English => "english",
            Field::Hindi => "hindi",
            Field::Gujarati => "gujarati",
            Field::Slok => "slok",
            Field::Transliteration => "transliteration",
            Field::En => "en",
            Field::Hi => "hi",
            Field::Gu => "gu",
            Field::Sa => "sa",
        }
    }
}

/// Sub-fields of a nested commentary block.
#[derive(Debug, Clone, Copy)]
enum Sub {
    Et,
    Ht,
    St,
    Sd,
    Gt,
}

impl Sub {
    fn get<'a>(&self, entry: &'a CommentaryEntry) -> Option<&'a str> {
        match self {
            Sub::Et => entry.et.as_deref(),
            Sub::Ht => entry.ht.as_deref(),
            Sub::St => entry.st.as_deref(),
            Sub::Sd => entry.sd.as_deref(),
            Sub::Gt => entry.gt.as_deref(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Sub::Et => "et",
            Sub::Ht => "ht",
            Sub::St => "st",
            Sub::Sd => "sd",
            Sub::Gt => "gt",
        }
    }
}

/// One lookup rule in a resolution chain.
#[derive(Debug, Clone, Copy)]
enum Rule {
    Direct(Field),
    Legacy(Field),
    Commentary(&'static str, Sub),
}

impl Rule {
    fn lookup<'a>(&self, record: &'a VerseRecord) -> Option<&'a str> {
        match self {
            Rule::Direct(field) | Rule::Legacy(field) => field.get(record),
            Rule::Commentary(code, sub) => {
                record.commentary.get(*code).and_then(|entry| sub.get(entry))
            }
        }
    }

    fn source(&self) -> TextSource {
        match self {
            Rule::Direct(_) => TextSource::Direct,
            Rule::Legacy(_) => TextSource::LegacyField,
            Rule::Commentary(..) => TextSource::Commentary,
        }
    }

    fn path(&self) -> String {
        match self {
            Rule::Direct(field) | Rule::Legacy(field) => field.name().to_string(),
            Rule::Commentary(code, sub) => format!("{code}.{}", sub.name()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Chains (field order and commentator order are both load-bearing)
// ────────────────────────────────────────────────────────────────────────────

const SANSKRIT_CHAIN: &[Rule] = &[
    Rule::Direct(Field::Sanskrit),
    Rule::Legacy(Field::Transliteration),
    Rule::Legacy(Field::Slok),
    Rule::Legacy(Field::Sa),
    Rule::Commentary("tej", Sub::St),
    Rule::Commentary("siva", Sub::St),
    Rule::Commentary("prabhu", Sub::St),
    Rule::Commentary("rams", Sub::St),
    Rule::Commentary("sankar", Sub::St),
];

const SANSKRIT_DEVANAGARI_CHAIN: &[Rule] = &[
    Rule::Direct(Field::Sanskrit),
    Rule::Legacy(Field::Slok),
    Rule::Commentary("tej", Sub::Sd),
    Rule::Commentary("siva", Sub::Sd),
    Rule::Commentary("prabhu", Sub::Sd),
    Rule::Commentary("rams", Sub::Sd),
    Rule::Commentary("sankar", Sub::Sd),
];

const HINDI_CHAIN: &[Rule] = &[
    Rule::Direct(Field::Hindi),
    Rule::Legacy(Field::Hi),
    Rule::Commentary("tej", Sub::Ht),
    Rule::Commentary("rams", Sub::Ht),
    Rule::Commentary("sankar", Sub::Ht),
    Rule::Commentary("siva", Sub::Ht),
    Rule::Commentary("prabhu", Sub::Ht),
];

const GUJARATI_CHAIN: &[Rule] = &[
    Rule::Direct(Field::Gujarati),
    Rule::Legacy(Field::Gu),
    Rule::Commentary("tej", Sub::Gt),
    Rule::Commentary("siva", Sub::Gt),
    Rule::Commentary("prabhu", Sub::Gt),
];

const ENGLISH_CHAIN: &[Rule] = &[
    Rule::Direct(Field::English),
    Rule::Legacy(Field::En),
    Rule::Commentary("prabhu", Sub::Et),
    Rule::Commentary("siva", Sub::Et),
    Rule::Commentary("purohit", Sub::Et),
    Rule::Commentary("san", Sub::Et),
    Rule::Commentary("adi", Sub::Et),
    Rule::Commentary("gambir", Sub::Et),
    Rule::Commentary("tej", Sub::Et),
];

fn chain_for(text_type: TextType) -> &'static [Rule] {
    match text_type {
        TextType::Sanskrit => SANSKRIT_CHAIN,
        TextType::SanskritDevanagari => SANSKRIT_DEVANAGARI_CHAIN,
        TextType::Hindi => HINDI_CHAIN,
        TextType::Gujarati => GUJARATI_CHAIN,
        TextType::English => ENGLISH_CHAIN,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Extraction
// ────────────────────────────────────────────────────────────────────────────

/// Resolves the best available text for `text_type`, or `None` when every
/// rule in the chain comes up empty. Whitespace-only values count as absent.
pub fn extract(record: &VerseRecord, text_type: TextType) -> Option<Resolved> {
    for rule in chain_for(text_type) {
        if let Some(raw) = rule.lookup(record) {
            let text = raw.trim();
            if !text.is_empty() {
                return Some(Resolved {
                    text: text.to_string(),
                    source: rule.source(),
                    path: rule.path(),
                });
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verses::detect::normalize_record;
    use serde_json::json;

    fn record(value: serde_json::Value) -> VerseRecord {
        normalize_record(&value, None)
    }

    #[test]
    fn test_current_scheme_beats_legacy_scheme() {
        let r = record(json!({
            "_id": "BG1.1",
            "english": "current english",
            "en": "legacy english",
            "prabhu": {"et": "commentary english"}
        }));
        let resolved = extract(&r, TextType::English).unwrap();
        assert_eq!(resolved.text, "current english");
        assert_eq!(resolved.source, TextSource::Direct);
        assert_eq!(resolved.path, "english");
    }

    #[test]
    fn test_legacy_field_beats_commentary() {
        let r = record(json!({
            "_id": "BG1.1",
            "en": "legacy english",
            "prabhu": {"et": "commentary english"}
        }));
        let resolved = extract(&r, TextType::English).unwrap();
        assert_eq!(resolved.text, "legacy english");
        assert_eq!(resolved.source, TextSource::LegacyField);
        assert_eq!(resolved.path, "en");
    }

    #[test]
    fn test_english_commentator_order_prefers_prabhu() {
        let r = record(json!({
            "_id": "BG1.1",
            "tej": {"et": "tej english"},
            "purohit": {"et": "purohit english"},
            "prabhu": {"et": "prabhu english"}
        }));
        let resolved = extract(&r, TextType::English).unwrap();
        assert_eq!(resolved.text, "prabhu english");
        assert_eq!(resolved.path, "prabhu.et");
    }

    #[test]
    fn test_hindi_commentator_order_prefers_tej() {
        let r = record(json!({
            "_id": "BG1.1",
            "siva": {"ht": "siva hindi"},
            "rams": {"ht": "rams hindi"},
            "tej": {"ht": "tej hindi"}
        }));
        let resolved = extract(&r, TextType::Hindi).unwrap();
        assert_eq!(resolved.text, "tej hindi");
        assert_eq!(resolved.path, "tej.ht");
    }

    #[test]
    fn test_hindi_chain_falls_through_tej_to_rams() {
        let r = record(json!({
            "_id": "BG1.1",
            "siva": {"ht": "siva hindi"},
            "rams": {"ht": "rams hindi"}
        }));
        // tej absent: rams comes before siva in the Hindi chain.
        let resolved = extract(&r, TextType::Hindi).unwrap();
        assert_eq!(resolved.text, "rams hindi");
    }

    #[test]
    fn test_sanskrit_prefers_transliteration_over_slok() {
        let r = record(json!({
            "_id": "BG1.1",
            "transliteration": "dharmakshetre kurukshetre",
            "slok": "धर्मक्षेत्रे कुरुक्षेत्रे"
        }));
        let resolved = extract(&r, TextType::Sanskrit).unwrap();
        assert_eq!(resolved.text, "dharmakshetre kurukshetre");
        assert_eq!(resolved.path, "transliteration");
    }

    #[test]
    fn test_sanskrit_devanagari_skips_transliteration() {
        let r = record(json!({
            "_id": "BG1.1",
            "transliteration": "dharmakshetre kurukshetre",
            "slok": "धर्मक्षेत्रे कुरुक्षेत्रे"
        }));
        let resolved = extract(&r, TextType::SanskritDevanagari).unwrap();
        assert_eq!(resolved.text, "धर्मक्षेत्रे कुरुक्षेत्रे");
        assert_eq!(resolved.path, "slok");
    }

    #[test]
    fn test_sanskrit_consults_sa_field_before_commentary() {
        let r = record(json!({
            "_id": "BG1.1",
            "sa": "sa field text",
            "tej": {"st": "tej transliteration"}
        }));
        let resolved = extract(&r, TextType::Sanskrit).unwrap();
        assert_eq!(resolved.text, "sa field text");
        assert_eq!(resolved.path, "sa");
    }

    #[test]
    fn test_sanskrit_devanagari_reads_sd_sub_field() {
        let r = record(json!({
            "_id": "BG1.1",
            "siva": {"sd": "सिवा देवनागरी", "st": "siva romanized"}
        }));
        let resolved = extract(&r, TextType::SanskritDevanagari).unwrap();
        assert_eq!(resolved.text, "सिवा देवनागरी");
        assert_eq!(resolved.path, "siva.sd");
    }

    #[test]
    fn test_gujarati_chain() {
        let r = record(json!({
            "_id": "BG1.1",
            "gu": "legacy gujarati",
            "gujarati": "current gujarati"
        }));
        assert_eq!(
            extract(&r, TextType::Gujarati).unwrap().text,
            "current gujarati"
        );

        let r = record(json!({"_id": "BG1.1", "prabhu": {"gt": "prabhu gujarati"}}));
        let resolved = extract(&r, TextType::Gujarati).unwrap();
        assert_eq!(resolved.text, "prabhu gujarati");
        assert_eq!(resolved.source, TextSource::Commentary);
    }

    #[test]
    fn test_no_sanskrit_bearing_field_is_absent() {
        let r = record(json!({
            "_id": "BG1.1",
            "english": "only english",
            "hindi": "only hindi"
        }));
        assert!(extract(&r, TextType::Sanskrit).is_none());
        assert!(extract(&r, TextType::SanskritDevanagari).is_none());
    }

    #[test]
    fn test_whitespace_only_values_count_as_absent() {
        let r = record(json!({
            "_id": "BG1.1",
            "english": "   \t  ",
            "en": "legacy english"
        }));
        let resolved = extract(&r, TextType::English).unwrap();
        assert_eq!(resolved.text, "legacy english");
    }

    #[test]
    fn test_resolved_text_is_trimmed() {
        let r = record(json!({"_id": "BG1.1", "hindi": "  नमस्ते  "}));
        assert_eq!(extract(&r, TextType::Hindi).unwrap().text, "नमस्ते");
    }

    #[test]
    fn test_empty_record_resolves_nothing() {
        let r = VerseRecord::default();
        assert!(extract(&r, TextType::Sanskrit).is_none());
        assert!(extract(&r, TextType::SanskritDevanagari).is_none());
        assert!(extract(&r, TextType::Hindi).is_none());
        assert!(extract(&r, TextType::Gujarati).is_none());
        assert!(extract(&r, TextType::English).is_none());
    }

    #[test]
    fn test_hindi_does_not_read_english_or_sanskrit() {
        let r = record(json!({
            "_id": "BG1.1",
            "english": "english text",
            "slok": "धर्मक्षेत्रे"
        }));
        assert!(extract(&r, TextType::Hindi).is_none());
    }
}
