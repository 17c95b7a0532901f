//! The snapshot payload the Persistence Adapter writes (spec section
//! 4.12): identity, cognitive-state vector, wisdom metrics, and a bounded
//! Thought tail.

use chrono::{DateTime, Utc};
use noetic_memory::Thought;
use noetic_state::CognitiveState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub serial: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WisdomMetrics {
    pub knowledge_depth: f64,
    pub reasoning_quality: f64,
    pub insight_frequency: f64,
    pub behavioral_coherence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedSnapshot {
    pub identity: Identity,
    pub cognitive_state: CognitiveState,
    pub wisdom: WisdomMetrics,
    pub thought_tail: Vec<Thought>,
    pub taken_at: DateTime<Utc>,
}

impl PersistedSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        let snapshot = PersistedSnapshot {
            identity: Identity { name: "noetic".into(), serial: "0001".into() },
            cognitive_state: CognitiveState::default(),
            wisdom: WisdomMetrics::default(),
            thought_tail: Vec::new(),
            taken_at: Utc::now(),
        };
        let json = snapshot.to_json().unwrap();
        let restored = PersistedSnapshot::from_json(&json).unwrap();
        assert_eq!(restored.identity.name, "noetic");
    }
}
