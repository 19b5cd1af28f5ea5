//! Tavily search provider
//!
//! Single shallow keyword search used to gather static context for the
//! ungrounded generation tier.

use super::types::{AttemptError, ProviderRequest, ProviderResponse, SearchResult};
use crate::config::SearchFallbackSettings;
use anyhow::Result;
use serde::Deserialize;
use serde_json::json;
use url::Url;

/// Adapter for the Tavily search API
pub struct TavilyProvider {
    endpoint: Url,
    api_key: String,
    search_depth: String,
    max_results: u32,
}

impl TavilyProvider {
    /// Create a provider for the given API base URL
    pub fn new(
        endpoint: &str,
        api_key: impl Into<String>,
        search_depth: impl Into<String>,
        max_results: u32,
    ) -> Result<Self> {
        Ok(Self {
            endpoint: Url::parse(endpoint)?,
            api_key: api_key.into(),
            search_depth: search_depth.into(),
            max_results,
        })
    }

    /// Build a provider from settings; None when no API key is configured
    pub fn from_settings(settings: &SearchFallbackSettings) -> Result<Option<Self>> {
        let Some(ref api_key) = settings.api_key else {
            return Ok(None);
        };
        Ok(Some(Self::new(
            &settings.endpoint,
            api_key.clone(),
            settings.search_depth.clone(),
            settings.max_results,
        )?))
    }

    /// Build the search request for a query
    pub fn request(&self, query: &str) -> Result<ProviderRequest, AttemptError> {
        let url = self
            .endpoint
            .join("search")
            .map_err(|e| AttemptError::Transport(e.to_string()))?;

        Ok(ProviderRequest::post(url)
            .bearer(&self.api_key)
            .json(json!({
                "query": query,
                "search_depth": self.search_depth,
                "max_results": self.max_results,
            })))
    }

    /// Parse the ordered results list out of a search response
    pub fn response(&self, response: ProviderResponse) -> Result<Vec<SearchResult>, AttemptError> {
        if !response.is_success() {
            return Err(AttemptError::Provider(format!(
                "search request failed with status {}",
                response.status
            )));
        }

        let payload: SearchPayload = response
            .json()
            .map_err(|e| AttemptError::Transport(e.to_string()))?;

        Ok(payload
            .results
            .into_iter()
            .map(|r| SearchResult {
                title: r.title,
                snippet: r.content,
                url: r.url,
            })
            .collect())
    }
}

/// Search response payload
#[derive(Debug, Deserialize)]
struct SearchPayload {
    #[serde(default)]
    results: Vec<RawResult>,
}

#[derive(Debug, Deserialize)]
struct RawResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> TavilyProvider {
        TavilyProvider::new("https://api.tavily.com", "tv-key", "basic", 5).unwrap()
    }

    #[test]
    fn test_search_request_shape() {
        let request = provider().request("weather in Oslo").unwrap();

        assert!(request.url.path().ends_with("/search"));
        assert!(request
            .headers
            .iter()
            .any(|(k, v)| k == "Authorization" && v == "Bearer tv-key"));

        let body = request.body.unwrap();
        assert_eq!(body["query"], "weather in Oslo");
        assert_eq!(body["search_depth"], "basic");
        assert_eq!(body["max_results"], 5);
    }

    #[test]
    fn test_results_preserve_order_and_map_content() {
        let response = ProviderResponse {
            status: 200,
            text: r#"{"results":[
                {"title":"A","content":"first","url":"https://a"},
                {"title":"B","content":"second","url":"https://b"}
            ]}"#
            .to_string(),
        };

        let results = provider().response(response).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "A");
        assert_eq!(results[0].snippet, "first");
        assert_eq!(results[1].url, "https://b");
    }

    #[test]
    fn test_missing_results_field_is_empty() {
        let response = ProviderResponse {
            status: 200,
            text: r#"{"answer":"unused"}"#.to_string(),
        };
        assert!(provider().response(response).unwrap().is_empty());
    }

    #[test]
    fn test_non_success_status_is_a_provider_error() {
        let response = ProviderResponse {
            status: 401,
            text: String::new(),
        };
        match provider().response(response) {
            Err(AttemptError::Provider(reason)) => {
                assert!(reason.contains("401"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
