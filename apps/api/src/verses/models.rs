//! Core verse data model shared by detection, extraction, and narration.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Commentator codes recognized in the oldest schema generation.
/// Records from that generation nest per-commentator objects under these keys.
pub const COMMENTATOR_CODES: &[&str] = &[
    "tej", "siva", "prabhu", "rams", "sankar", "purohit", "san", "adi", "gambir",
];

/// Per-commentator text block from the nested legacy schema.
/// Sub-field codes: `et` English, `ht` Hindi, `st` Sanskrit transliteration,
/// `sd` Sanskrit Devanagari, `gt` Gujarati.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentaryEntry {
    pub et: Option<String>,
    pub ht: Option<String>,
    pub st: Option<String>,
    pub sd: Option<String>,
    pub gt: Option<String>,
}

impl CommentaryEntry {
    pub fn is_empty(&self) -> bool {
        self.et.is_none()
            && self.ht.is_none()
            && self.st.is_none()
            && self.sd.is_none()
            && self.gt.is_none()
    }
}

/// Normalized representation of one scripture verse.
///
/// Text may live under three generations of field names: the current long-form
/// scheme (`sanskrit`/`english`/`hindi`/`gujarati`), the legacy flat scheme
/// (`slok`, `transliteration`, `en`/`hi`/`gu`/`sa`), or the oldest nested
/// per-commentator scheme (`commentary`). Records are built by the format
/// detector only; all fields are optional until request validation runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerseRecord {
    /// Unique identifier (`_id` in the wire formats), e.g. "BG1.1".
    pub id: Option<String>,
    pub chapter: Option<u32>,
    pub verse: Option<u32>,
    // Current scheme.
    pub sanskrit: Option<String>,
    pub english: Option<String>,
    pub hindi: Option<String>,
    pub gujarati: Option<String>,
    // Legacy flat scheme.
    pub slok: Option<String>,
    pub transliteration: Option<String>,
    pub en: Option<String>,
    pub hi: Option<String>,
    pub gu: Option<String>,
    pub sa: Option<String>,
    /// Oldest scheme: nested per-commentator blocks, keyed by commentator code.
    pub commentary: BTreeMap<String, CommentaryEntry>,
}

/// Language/script variant a caller can request for extraction.
///
/// `Sanskrit` prefers romanized transliteration; `SanskritDevanagari` prefers
/// the original script. Both resolve through distinct chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextType {
    Sanskrit,
    SanskritDevanagari,
    Hindi,
    Gujarati,
    English,
}

/// Supported narration language codes.
///
/// Region-suffixed forms from older clients ("en-IN", "hi-IN") parse to the
/// same codes. Anything else is an error the caller must surface, never a
/// silent fallback to English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LangCode {
    En,
    Hi,
    Gu,
    Sa,
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("unsupported language code '{0}'")]
pub struct UnsupportedLanguage(pub String);

impl LangCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LangCode::En => "en",
            LangCode::Hi => "hi",
            LangCode::Gu => "gu",
            LangCode::Sa => "sa",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LangCode::En => "English (Indian accent)",
            LangCode::Hi => "Hindi",
            LangCode::Gu => "Gujarati",
            LangCode::Sa => "Sanskrit",
        }
    }

    pub fn native_name(&self) -> &'static str {
        match self {
            LangCode::En => "English",
            LangCode::Hi => "हिन्दी",
            LangCode::Gu => "ગુજરાતી",
            LangCode::Sa => "संस्कृतम्",
        }
    }

    pub const ALL: [LangCode; 4] = [LangCode::En, LangCode::Hi, LangCode::Gu, LangCode::Sa];
}

impl FromStr for LangCode {
    type Err = UnsupportedLanguage;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        // "en-IN" and "hi-IN" come from older clients; the region part is noise.
        let base = raw.trim().split(['-', '_']).next().unwrap_or("");
        match base.to_ascii_lowercase().as_str() {
            "en" => Ok(LangCode::En),
            "hi" => Ok(LangCode::Hi),
            "gu" => Ok(LangCode::Gu),
            "sa" => Ok(LangCode::Sa),
            _ => Err(UnsupportedLanguage(raw.trim().to_string())),
        }
    }
}

impl fmt::Display for LangCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lang_code_parses_bare_codes() {
        assert_eq!("en".parse::<LangCode>().unwrap(), LangCode::En);
        assert_eq!("hi".parse::<LangCode>().unwrap(), LangCode::Hi);
        assert_eq!("gu".parse::<LangCode>().unwrap(), LangCode::Gu);
        assert_eq!("sa".parse::<LangCode>().unwrap(), LangCode::Sa);
    }

    #[test]
    fn test_lang_code_parses_region_suffixed_forms() {
        assert_eq!("en-IN".parse::<LangCode>().unwrap(), LangCode::En);
        assert_eq!("hi-IN".parse::<LangCode>().unwrap(), LangCode::Hi);
        assert_eq!("hi_IN".parse::<LangCode>().unwrap(), LangCode::Hi);
    }

    #[test]
    fn test_lang_code_is_case_insensitive() {
        assert_eq!("EN".parse::<LangCode>().unwrap(), LangCode::En);
        assert_eq!("Sa".parse::<LangCode>().unwrap(), LangCode::Sa);
    }

    #[test]
    fn test_unknown_lang_code_is_an_error_not_english() {
        let err = "fr".parse::<LangCode>().unwrap_err();
        assert_eq!(err, UnsupportedLanguage("fr".to_string()));
        assert!("".parse::<LangCode>().is_err());
        assert!("english".parse::<LangCode>().is_err());
    }

    #[test]
    fn test_lang_code_display_round_trips() {
        for code in LangCode::ALL {
            assert_eq!(code.as_str().parse::<LangCode>().unwrap(), code);
        }
    }

    #[test]
    fn test_commentary_entry_is_empty() {
        assert!(CommentaryEntry::default().is_empty());
        let entry = CommentaryEntry {
            et: Some("text".to_string()),
            ..Default::default()
        };
        assert!(!entry.is_empty());
    }
}
