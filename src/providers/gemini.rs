//! Gemini generation provider
//!
//! Builds `generateContent` requests against the Generative Language API and
//! extracts the generated text (or the provider's error) from responses. The
//! same adapter serves both cascade tiers; only the grounding flag and the
//! system instruction differ.

use super::types::{AttemptError, ProviderRequest, ProviderResponse};
use anyhow::Result;
use serde::Deserialize;
use serde_json::json;
use url::Url;

/// Whether a generation call may consult the live web index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grounding {
    Enabled,
    Disabled,
}

/// Inputs for one generation attempt
#[derive(Debug, Clone)]
pub struct GenerationTask<'a> {
    /// The user's search query, verbatim
    pub query: &'a str,
    /// Fully assembled system instruction (date header, optional context, persona)
    pub system_instruction: &'a str,
    /// Grounding toggle for this tier
    pub grounding: Grounding,
}

/// Adapter for the Gemini `generateContent` endpoint
pub struct GeminiProvider {
    endpoint: Url,
    api_key: String,
}

impl GeminiProvider {
    /// Create a provider for the given API base URL
    pub fn new(endpoint: &str, api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            endpoint: Url::parse(endpoint)?,
            api_key: api_key.into(),
        })
    }

    /// Build the generateContent request for one model
    pub fn request(
        &self,
        model: &str,
        task: &GenerationTask<'_>,
    ) -> Result<ProviderRequest, AttemptError> {
        let mut url = self
            .endpoint
            .join(&format!("v1beta/models/{model}:generateContent"))
            .map_err(|e| AttemptError::Transport(e.to_string()))?;
        url.query_pairs_mut().append_pair("key", &self.api_key);

        let mut body = json!({
            "system_instruction": {
                "parts": [{ "text": task.system_instruction }]
            },
            "contents": [{
                "parts": [{ "text": format!("Search Query: {}", task.query) }]
            }],
        });
        if task.grounding == Grounding::Enabled {
            body["tools"] = json!([{ "google_search": {} }]);
        }

        Ok(ProviderRequest::post(url).json(body))
    }

    /// Extract the generated text from a generateContent response
    ///
    /// The provider reports its own failures as a JSON `error` object, also on
    /// non-2xx statuses, so the payload is inspected before the status code.
    pub fn response(&self, response: ProviderResponse) -> Result<String, AttemptError> {
        let payload: GenerateResponse = response
            .json()
            .map_err(|e| AttemptError::Transport(e.to_string()))?;

        if let Some(error) = payload.error {
            return Err(AttemptError::Provider(error.message));
        }

        payload
            .candidates
            .into_iter()
            .flatten()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
            .and_then(|parts| parts.into_iter().next())
            .and_then(|p| p.text)
            .filter(|text| !text.is_empty())
            .ok_or(AttemptError::MissingText)
    }
}

/// generateContent response payload
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    error: Option<ApiError>,
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ContentPart>>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> GeminiProvider {
        GeminiProvider::new("https://generativelanguage.googleapis.com", "k").unwrap()
    }

    fn task(grounding: Grounding) -> GenerationTask<'static> {
        GenerationTask {
            query: "rust programming",
            system_instruction: "TODAY IS: test.\npersona",
            grounding,
        }
    }

    #[test]
    fn test_grounded_request_shape() {
        let request = provider()
            .request("gemini-2.5-flash", &task(Grounding::Enabled))
            .unwrap();

        assert!(request
            .url
            .path()
            .ends_with("/v1beta/models/gemini-2.5-flash:generateContent"));
        assert_eq!(request.url.query(), Some("key=k"));

        let body = request.body.unwrap();
        assert!(body["tools"][0]["google_search"].is_object());
        assert_eq!(
            body["contents"][0]["parts"][0]["text"],
            "Search Query: rust programming"
        );
        assert_eq!(
            body["system_instruction"]["parts"][0]["text"],
            "TODAY IS: test.\npersona"
        );
    }

    #[test]
    fn test_ungrounded_request_has_no_tools() {
        let request = provider()
            .request("gemini-2.5-flash", &task(Grounding::Disabled))
            .unwrap();
        assert!(request.body.unwrap().get("tools").is_none());
    }

    #[test]
    fn test_response_happy_path() {
        let response = ProviderResponse {
            status: 200,
            text: r#"{"candidates":[{"content":{"parts":[{"text":"generated"}]}}]}"#.to_string(),
        };
        assert_eq!(provider().response(response).unwrap(), "generated");
    }

    #[test]
    fn test_response_error_payload_wins() {
        // Error payloads arrive with non-2xx statuses and must be surfaced verbatim
        let response = ProviderResponse {
            status: 429,
            text: r#"{"error":{"message":"quota exceeded","code":429}}"#.to_string(),
        };
        match provider().response(response) {
            Err(AttemptError::Provider(message)) => assert_eq!(message, "quota exceeded"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_response_without_text_is_missing() {
        let empty_candidates = ProviderResponse {
            status: 200,
            text: r#"{"candidates":[]}"#.to_string(),
        };
        assert!(matches!(
            provider().response(empty_candidates),
            Err(AttemptError::MissingText)
        ));

        let no_parts = ProviderResponse {
            status: 200,
            text: r#"{"candidates":[{"content":{}}]}"#.to_string(),
        };
        assert!(matches!(
            provider().response(no_parts),
            Err(AttemptError::MissingText)
        ));
    }

    #[test]
    fn test_unparseable_body_is_a_transport_fault() {
        let response = ProviderResponse {
            status: 502,
            text: "<html>bad gateway</html>".to_string(),
        };
        assert!(matches!(
            provider().response(response),
            Err(AttemptError::Transport(_))
        ));
    }
}
