//! Upstream provider adapters
//!
//! Each adapter keeps request building and response parsing pure and
//! synchronous; the network client performs the actual I/O.

mod types;

pub mod gemini;
pub mod tavily;

pub use types::{AttemptError, ProviderRequest, ProviderResponse, SearchResult};
