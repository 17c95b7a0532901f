//! Shared Cognitive State (spec section 3): the engine rendezvous point.
//! Engines write only to their own slot and never read concurrently
//! without snapshotting (spec section 5); this module enforces that by
//! handing each engine a narrow writer type rather than the full struct.

use std::sync::Arc;

use noetic_common::clamp::clamp01;
use parking_lot::RwLock;

use crate::affordance::Affordance;
use crate::salience::Scenario;

/// `pastContext`, `presentFocus`, `futureOptions`, `coherence`,
/// `integration` (spec section 3).
#[derive(Debug, Clone, Default)]
pub struct SharedCognitiveState {
    pub past_context: Vec<Affordance>,
    pub present_focus: Option<String>,
    pub future_options: Vec<Scenario>,
    pub coherence: f64,
    pub integration: f64,
}

#[derive(Clone)]
pub struct SharedStateHandle(Arc<RwLock<SharedCognitiveState>>);

impl SharedStateHandle {
    pub fn new() -> Self {
        Self(Arc::new(RwLock::new(SharedCognitiveState::default())))
    }

    pub fn snapshot(&self) -> SharedCognitiveState {
        self.0.read().clone()
    }

    pub fn set_coherence(&self, value: f64) {
        self.0.write().coherence = clamp01(value);
    }

    pub fn set_integration(&self, value: f64) {
        self.0.write().integration = clamp01(value);
    }

    /// The Affordance engine's write slot.
    pub fn write_past_context(&self, affordances: Vec<Affordance>) {
        self.0.write().past_context = affordances;
    }

    /// The Relevance engine's write slot.
    pub fn write_present_focus(&self, focus: Option<String>) {
        self.0.write().present_focus = focus;
    }

    /// The Salience engine's write slot.
    pub fn write_future_options(&self, scenarios: Vec<Scenario>) {
        self.0.write().future_options = scenarios;
    }
}

impl Default for SharedStateHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_engine_writes_only_its_own_slot() {
        let handle = SharedStateHandle::new();
        handle.write_past_context(vec![Affordance::new("act", "ctx", 0.5, 0.5, chrono::Utc::now())]);
        handle.write_present_focus(Some("focus".into()));
        handle.write_future_options(vec![]);

        let snap = handle.snapshot();
        assert_eq!(snap.past_context.len(), 1);
        assert_eq!(snap.present_focus.as_deref(), Some("focus"));
        assert!(snap.future_options.is_empty());
    }

    #[test]
    fn coherence_and_integration_are_clamped() {
        let handle = SharedStateHandle::new();
        handle.set_coherence(5.0);
        handle.set_integration(-5.0);
        let snap = handle.snapshot();
        assert_eq!(snap.coherence, 1.0);
        assert_eq!(snap.integration, 0.0);
    }
}
