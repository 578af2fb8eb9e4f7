// Narration engine: voice tables, text shaping, batch orchestration.
// Text resolution order lives in verses::extract; this module decides what
// to do when a chain comes up empty and drives the providers.

pub mod handlers;
pub mod models;
pub mod orchestrator;
pub mod text_format;
pub mod voices;
