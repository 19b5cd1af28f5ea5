//! Application state shared across handlers

use crate::config::Settings;
use crate::resolver::AnswerResolver;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Answer resolver
    pub resolver: Arc<AnswerResolver>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let resolver = Arc::new(AnswerResolver::from_settings(&settings)?);

        Ok(Self {
            settings: Arc::new(settings),
            resolver,
        })
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }
}
