// Synthesized-audio persistence and download surface.

pub mod handlers;
pub mod store;
