//! Error trail and aggregated failure types

/// A single recorded failure in the cascade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptFailure {
    /// Which attempt failed: model plus tier, or a provider name
    pub label: String,
    /// Why it failed
    pub reason: String,
}

/// Ordered record of every failure across the whole cascade
///
/// Used only to compose the final diagnostic; on success the trail is
/// discarded and never reaches the caller.
#[derive(Debug, Default)]
pub struct ErrorTrail {
    failures: Vec<AttemptFailure>,
}

impl ErrorTrail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one failure; call order is preserved
    pub fn record(&mut self, label: impl Into<String>, reason: impl ToString) {
        self.failures.push(AttemptFailure {
            label: label.into(),
            reason: reason.to_string(),
        });
    }

    pub fn failures(&self) -> &[AttemptFailure] {
        &self.failures
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Render the trail as one diagnostic line, in attempt order
    pub fn summary(&self) -> String {
        self.failures
            .iter()
            .map(|f| format!("{}: {}", f.label, f.reason))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Total-failure error carrying the accumulated trail
#[derive(Debug, thiserror::Error)]
#[error("all attempts failed: {}", .trail.summary())]
pub struct ResolveError {
    trail: ErrorTrail,
}

impl ResolveError {
    pub fn new(trail: ErrorTrail) -> Self {
        Self { trail }
    }

    pub fn trail(&self) -> &ErrorTrail {
        &self.trail
    }
}
