//! Answer resolution cascade
//!
//! Walks the ordered model list against the grounded generation provider,
//! then falls back to a web search plus ungrounded generation, accumulating
//! every failure along the way.

mod cascade;
mod models;

pub use cascade::AnswerResolver;
pub use models::{AttemptFailure, ErrorTrail, ResolveError};
