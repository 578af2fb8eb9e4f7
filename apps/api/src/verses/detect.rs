//! Format detection: classifies an arbitrary JSON payload and normalizes it
//! into a flat, ordered sequence of `VerseRecord`s.
//!
//! Accepted shapes, probed in priority order:
//! 1. Object with a `chapters` key: `{chapters: [{chapter_number, verses: [...]}]}`
//! 2. Any other object: a single verse
//! 3. Array whose first element carries `_id`: an already-flat verse list
//! 4. Array whose first element carries `chapter` + `verses`: chapter groups
//! 5. Any other array: best effort, each element treated as a verse
//! 6. Anything else: one (empty) record, rejected later by request validation
//!
//! Grouped shapes stamp each verse with its parent chapter number; the stamp
//! wins over a contradicting inner `chapter` field. The caller's payload is
//! never modified.

use serde_json::Value;

use crate::verses::models::{CommentaryEntry, VerseRecord, COMMENTATOR_CODES};

/// Flattens a payload of unknown shape into normalized verse records.
///
/// An empty array yields an empty sequence, not an error.
pub fn normalize_payload(payload: &Value) -> Vec<VerseRecord> {
    match payload {
        Value::Object(map) if map.contains_key("chapters") => {
            let chapters = map
                .get("chapters")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();
            flatten_groups(chapters, "chapter_number")
        }
        Value::Object(_) => vec![normalize_record(payload, None)],
        Value::Array(items) => match items.first() {
            None => vec![],
            Some(first) if first.get("_id").is_some() => {
                items.iter().map(|v| normalize_record(v, None)).collect()
            }
            Some(first) if first.get("chapter").is_some() && first.get("verses").is_some() => {
                flatten_groups(items, "chapter")
            }
            Some(_) => items.iter().map(|v| normalize_record(v, None)).collect(),
        },
        other => vec![normalize_record(other, None)],
    }
}

/// Normalizes a single verse value, keeping only recognized keys.
///
/// `stamped_chapter` is the parent chapter number from a grouped shape; when
/// present it overrides the record's own `chapter` field.
pub fn normalize_record(value: &Value, stamped_chapter: Option<u32>) -> VerseRecord {
    let mut record = VerseRecord {
        id: read_id(value),
        chapter: stamped_chapter.or_else(|| read_u32(value, "chapter")),
        verse: read_u32(value, "verse"),
        sanskrit: read_text(value, "sanskrit"),
        english: read_text(value, "english"),
        hindi: read_text(value, "hindi"),
        gujarati: read_text(value, "gujarati"),
        slok: read_text(value, "slok"),
        transliteration: read_text(value, "transliteration"),
        en: read_text(value, "en"),
        hi: read_text(value, "hi"),
        gu: read_text(value, "gu"),
        sa: read_text(value, "sa"),
        commentary: Default::default(),
    };

    for code in COMMENTATOR_CODES {
        if let Some(block) = value.get(code).filter(|v| v.is_object()) {
            let entry = CommentaryEntry {
                et: read_text(block, "et"),
                ht: read_text(block, "ht"),
                st: read_text(block, "st"),
                sd: read_text(block, "sd"),
                gt: read_text(block, "gt"),
            };
            if !entry.is_empty() {
                record.commentary.insert(code.to_string(), entry);
            }
        }
    }

    record
}

fn flatten_groups(groups: &[Value], chapter_key: &str) -> Vec<VerseRecord> {
    let mut records = Vec::new();
    for group in groups {
        let number = read_u32(group, chapter_key);
        if let Some(verses) = group.get("verses").and_then(Value::as_array) {
            for verse in verses {
                records.push(normalize_record(verse, number));
            }
        }
    }
    records
}

fn read_id(value: &Value) -> Option<String> {
    match value.get("_id") {
        Some(Value::String(s)) => Some(s.clone()),
        // Tolerate numeric identifiers from hand-built payloads.
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn read_text(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(ToString::to_string)
}

fn read_u32(value: &Value, key: &str) -> Option<u32> {
    match value.get(key) {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}
