//! Phase classification and the per-step context handed to engine handlers
//! (spec section 4.7's common contract).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared_state::SharedCognitiveState;

/// Expressive for steps 0..3 and 6..9; Reflective for 4,5,10,11; Meta
/// overlays at the cycle transition 11 -> 0 (spec section 4.8). Individual
/// engines additionally mark their own pivotal steps Reflective per spec
/// section 4.7's per-engine rules (e.g. Affordance at its step 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Expressive,
    Reflective,
    Meta,
}

/// What a single engine observes when its handler runs for one step.
#[derive(Debug, Clone)]
pub struct StepContext {
    pub step: u8,
    pub phase: Phase,
    pub previous_output: Option<String>,
    pub shared_snapshot: SharedCognitiveState,
    pub timestamp: DateTime<Utc>,
}
