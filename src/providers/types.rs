//! Provider wire types

use serde::{Deserialize, Serialize};
use url::Url;

/// Why a single provider attempt failed
#[derive(Debug, thiserror::Error)]
pub enum AttemptError {
    /// Explicit error payload returned by the provider
    #[error("provider error: {0}")]
    Provider(String),
    /// Network or decode fault before a usable payload existed
    #[error("transport fault: {0}")]
    Transport(String),
    /// Well-formed response that carried no generated text
    #[error("no generated text in response")]
    MissingText,
}

/// Outbound JSON request to a provider
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    /// Full request URL
    pub url: Url,
    /// Request headers
    pub headers: Vec<(String, String)>,
    /// JSON body
    pub body: Option<serde_json::Value>,
}

impl ProviderRequest {
    /// Create a POST request
    pub fn post(url: Url) -> Self {
        Self {
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Add a bearer token
    pub fn bearer(self, token: &str) -> Self {
        self.header("Authorization", format!("Bearer {token}"))
    }

    /// Set the JSON body
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Captured response from a provider request
#[derive(Debug)]
pub struct ProviderResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
}

impl ProviderResponse {
    /// Parse response as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.text)
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A single web search result, in provider relevance order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let url = Url::parse("https://api.example.com/search").unwrap();
        let request = ProviderRequest::post(url)
            .bearer("secret")
            .json(serde_json::json!({ "query": "q" }));

        assert_eq!(
            request.headers,
            vec![("Authorization".to_string(), "Bearer secret".to_string())]
        );
        assert_eq!(request.body.unwrap()["query"], "q");
    }

    #[test]
    fn test_response_status_classes() {
        let ok = ProviderResponse {
            status: 200,
            text: String::new(),
        };
        let denied = ProviderResponse {
            status: 401,
            text: String::new(),
        };
        assert!(ok.is_success());
        assert!(!denied.is_success());
    }
}
