// Verse corpus handling: shape detection, normalization, text extraction.
// Every inbound verse payload passes through detect before anything reads it.
// All language/field fallback logic lives in extract, nowhere else.

pub mod detect;
pub mod extract;
pub mod models;
