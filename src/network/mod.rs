//! HTTP networking module
//!
//! Provides the HTTP client used for all outbound provider requests.

mod client;

pub use client::HttpClient;
