// Resume analysis: AI-backed analyzer, heuristic fallback, and the HTTP handlers
// that tie them to the analysis store.

pub mod ai;
pub mod handlers;
pub mod heuristic;
pub mod prompts;
pub mod schema;
pub mod validation;
