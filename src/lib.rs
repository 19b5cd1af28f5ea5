//! Kramer Intelligence: a persona-conditioned AI answer engine.
//!
//! Takes a free-text search query, asks a web-grounded generation model for
//! an answer conditioned on a fixed persona instruction, and falls back to a
//! standalone web-search API plus an ungrounded generation call when the
//! grounded tier is exhausted.

pub mod config;
pub mod network;
pub mod persona;
pub mod providers;
pub mod resolver;
pub mod web;

pub use config::Settings;
pub use providers::SearchResult;
pub use resolver::AnswerResolver;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default timeout for outbound provider requests in seconds
pub const DEFAULT_TIMEOUT: u64 = 20;

/// Maximum timeout that can be set
pub const MAX_TIMEOUT: u64 = 60;
