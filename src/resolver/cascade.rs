//! The two-tier answer resolution cascade

use super::models::{ErrorTrail, ResolveError};
use crate::config::Settings;
use crate::network::HttpClient;
use crate::persona;
use crate::providers::gemini::{GeminiProvider, GenerationTask, Grounding};
use crate::providers::tavily::TavilyProvider;
use crate::providers::{AttemptError, SearchResult};
use anyhow::Result;
use tracing::{info, warn};

/// Resolves a query to an answer by walking a fixed fallback cascade
///
/// Holds no mutable state; one instance is shared across all inbound
/// requests. Every outbound attempt is awaited to completion before the
/// next candidate runs.
pub struct AnswerResolver {
    client: HttpClient,
    gemini: GeminiProvider,
    tavily: Option<TavilyProvider>,
    models: Vec<String>,
    instruction: String,
}

impl AnswerResolver {
    /// Build a resolver from settings
    ///
    /// Fails on an empty model list so a total failure always carries at
    /// least one recorded reason.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        if settings.generation.models.is_empty() {
            anyhow::bail!("generation.models must list at least one model");
        }

        let client = HttpClient::with_settings(&settings.outgoing)?;
        let gemini = GeminiProvider::new(
            &settings.generation.endpoint,
            settings.generation.api_key.clone().unwrap_or_default(),
        )?;
        let tavily = TavilyProvider::from_settings(&settings.search_fallback)?;

        Ok(Self {
            client,
            gemini,
            tavily,
            models: settings.generation.models.clone(),
            instruction: settings.persona.instruction.clone(),
        })
    }

    /// Walk the cascade; the first well-formed answer wins
    pub async fn resolve(&self, query: &str) -> Result<String, ResolveError> {
        let mut trail = ErrorTrail::new();

        // Primary tier: grounded generation, models in preference order
        let system = persona::system_instruction(&self.instruction);
        if let Some(answer) = self
            .run_models(query, &system, Grounding::Enabled, &mut trail)
            .await
        {
            return Ok(answer);
        }

        // Fallback tier: one shallow search feeding ungrounded generation
        let Some(ref tavily) = self.tavily else {
            trail.record("search fallback", "no search API key configured");
            return Err(ResolveError::new(trail));
        };

        info!("grounded tier exhausted, attempting web search fallback");

        let results = match self.search(tavily, query).await {
            Ok(results) => results,
            Err(err) => {
                warn!("search fallback failed: {err}");
                trail.record("tavily search", err);
                return Err(ResolveError::new(trail));
            }
        };

        let system = persona::system_instruction_with_context(&self.instruction, &results);
        if let Some(answer) = self
            .run_models(query, &system, Grounding::Disabled, &mut trail)
            .await
        {
            return Ok(answer);
        }

        Err(ResolveError::new(trail))
    }

    /// One sequential pass over the model list; shared by both tiers
    async fn run_models(
        &self,
        query: &str,
        system_instruction: &str,
        grounding: Grounding,
        trail: &mut ErrorTrail,
    ) -> Option<String> {
        let tier = match grounding {
            Grounding::Enabled => "grounded",
            Grounding::Disabled => "fallback",
        };
        let task = GenerationTask {
            query,
            system_instruction,
            grounding,
        };

        for model in &self.models {
            match self.generate(model, &task).await {
                Ok(text) => {
                    info!("model {model} answered ({tier})");
                    return Some(text);
                }
                Err(err) => {
                    warn!("model {model} failed ({tier}): {err}");
                    trail.record(format!("{model} ({tier})"), err);
                }
            }
        }

        None
    }

    /// One generation attempt against one model
    async fn generate(
        &self,
        model: &str,
        task: &GenerationTask<'_>,
    ) -> Result<String, AttemptError> {
        let request = self.gemini.request(model, task)?;
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| AttemptError::Transport(e.to_string()))?;
        self.gemini.response(response)
    }

    /// The single shallow search feeding the fallback tier
    async fn search(
        &self,
        tavily: &TavilyProvider,
        query: &str,
    ) -> Result<Vec<SearchResult>, AttemptError> {
        let request = tavily.request(query)?;
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| AttemptError::Transport(e.to_string()))?;
        tavily.response(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_model_list_is_rejected() {
        let mut settings = Settings::default();
        settings.generation.models.clear();
        assert!(AnswerResolver::from_settings(&settings).is_err());
    }

    #[test]
    fn test_missing_search_key_disables_fallback_only() {
        let settings = Settings::default();
        let resolver = AnswerResolver::from_settings(&settings).unwrap();
        assert!(resolver.tavily.is_none());
        assert_eq!(resolver.models.len(), 3);
    }
}
