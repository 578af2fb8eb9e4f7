//! Text shaping before synthesis: whitespace cleanup, punctuation spacing,
//! spoken verse intros.

use crate::verses::models::{LangCode, VerseRecord};

const DEVANAGARI_MARKS: &[char] = &['।', '॥'];
const LATIN_MARKS: &[char] = &['.', '!', '?', ',', ';', ':'];

/// Prepares text for the synthesis provider: collapses whitespace runs and
/// guarantees a single space after sentence marks so the voice does not run
/// clauses together. Devanagari text keys on the danda marks instead of
/// Latin punctuation.
pub fn format_for_synthesis(text: &str, lang: LangCode) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let marks = match lang {
        LangCode::Hi | LangCode::Sa => DEVANAGARI_MARKS,
        _ => LATIN_MARKS,
    };

    let mut out = String::with_capacity(collapsed.len() + 8);
    let mut chars = collapsed.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if marks.contains(&c) {
            if let Some(&next) = chars.peek() {
                if !next.is_whitespace() && !marks.contains(&next) {
                    out.push(' ');
                }
            }
        }
    }
    out
}

/// Spoken chapter/verse announcement in the narration language's script.
pub fn verse_intro(chapter: u32, verse: u32, lang: LangCode) -> String {
    match lang {
        LangCode::Hi | LangCode::Sa => format!("अध्याय {chapter}, श्लोक {verse}"),
        _ => format!("Chapter {chapter}, Verse {verse}"),
    }
}

/// Full spoken text for a verse: intro plus body when chapter and verse
/// numbers are both known, the body alone otherwise.
pub fn narration_text(record: &VerseRecord, text: &str, lang: LangCode) -> String {
    let spoken = match (record.chapter, record.verse) {
        (Some(chapter), Some(verse)) => {
            format!("{}. {}", verse_intro(chapter, verse, lang), text)
        }
        _ => text.to_string(),
    };
    format_for_synthesis(&spoken, lang)
}
