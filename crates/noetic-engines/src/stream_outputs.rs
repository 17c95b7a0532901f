//! Per-step outputs from each engine's sub-streams (spec section 4.9): the
//! Coherence sub-stream (PresentMomentAwareness, PatternRecognition,
//! ConsistencyCheck), the Memory sub-stream (Retrieval, Integration,
//! Consolidation), and the Salience sub-stream (Simulation, Creative,
//! Possibility). The [`StreamOutputBoard`] is the per-cycle buffer the
//! Integration Engine reads at steps 4, 8, and cycle close; spec section
//! 5's ordering guarantee ("integration at step 4 observes all
//! Coherence-stream step outputs from the same cycle") is realized by
//! engines publishing here and the Integration Engine reading the latest
//! value per stream rather than replaying history.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

/// Inputs to `noetic-integration`'s Coherence Synthesis (spec section
/// 4.9.1), produced by the Affordance/Relevance engines across steps 0-3.
/// `BTreeMap` rather than `HashMap`: the synthesis arithmetic sums over
/// these maps in key order, and R3 requires that repeatable given the
/// same inputs (spec section 8).
#[derive(Debug, Clone, Default)]
pub struct CoherenceStreamOutputs {
    pub salience: BTreeMap<String, f64>,
    pub pattern_strength: BTreeMap<String, f64>,
    pub pattern_descriptions: BTreeMap<String, String>,
    pub contradiction_severity: f64,
    pub pattern_involvement: f64,
    pub consistency_score: f64,
    pub urgency_level: f64,
}

/// Inputs to Memory Synthesis (spec section 4.9.2), produced across steps
/// 4-7.
#[derive(Debug, Clone, Default)]
pub struct MemoryStreamOutputs {
    pub integration_quality: f64,
    pub retrieval_confidence: f64,
    pub new_connections: Vec<String>,
    pub strengthened_memories: Vec<String>,
    pub retrieved_memories: Vec<String>,
    pub pruned: Vec<String>,
}

/// Inputs to Full Tetrahedral Integration's Salience-side edges (spec
/// section 4.9.3), produced across steps 6-11 by the Salience engine.
#[derive(Debug, Clone, Default)]
pub struct SalienceStreamOutputs {
    pub knowledge_confidence: f64,
    pub attention_confidence: f64,
    pub simulation_confidence: f64,
    pub integration_health: f64,
    pub top_possibility_success: f64,
    pub consolidation_insights: Vec<String>,
    pub coherence_issues: Vec<String>,
    pub novelty_scores: Vec<f64>,
    pub top_possibility_goal_alignment: f64,
    pub top_possibility_description: Option<String>,
    /// The first concrete next-step of the top possibility (spec section
    /// 4.9.3), distinct from `top_possibility_description`: full
    /// integration's `unifiedIntention` draws on this, `unifiedAttention`
    /// on the description.
    pub top_possibility_next_step: Option<String>,
    pub simulation_recommended_action: Option<String>,
    pub active_knowledge_items: Vec<String>,
}

#[derive(Default)]
struct Board {
    coherence: Option<(u8, CoherenceStreamOutputs)>,
    memory: Option<(u8, MemoryStreamOutputs)>,
    salience: Option<(u8, SalienceStreamOutputs)>,
}

/// Shared, single-producer-per-field buffer: each engine publishes to its
/// own stream only, mirroring [`crate::shared_state::SharedStateHandle`]'s
/// per-slot write discipline.
#[derive(Clone)]
pub struct StreamOutputBoard(Arc<RwLock<Board>>);

impl StreamOutputBoard {
    pub fn new() -> Self {
        Self(Arc::new(RwLock::new(Board::default())))
    }

    pub fn publish_coherence(&self, step: u8, outputs: CoherenceStreamOutputs) {
        self.0.write().coherence = Some((step, outputs));
    }

    pub fn publish_memory(&self, step: u8, outputs: MemoryStreamOutputs) {
        self.0.write().memory = Some((step, outputs));
    }

    pub fn publish_salience(&self, step: u8, outputs: SalienceStreamOutputs) {
        self.0.write().salience = Some((step, outputs));
    }

    /// Latest Coherence output, if any engine has produced one this cycle.
    /// `None` means the integration point must fall back to the documented
    /// default synthesis input (spec section 4.8's DegradedIntegration
    /// path).
    pub fn take_coherence(&self) -> Option<CoherenceStreamOutputs> {
        self.0.write().coherence.take().map(|(_, o)| o)
    }

    pub fn take_memory(&self) -> Option<MemoryStreamOutputs> {
        self.0.write().memory.take().map(|(_, o)| o)
    }

    pub fn take_salience(&self) -> Option<SalienceStreamOutputs> {
        self.0.write().salience.take().map(|(_, o)| o)
    }
}

impl Default for StreamOutputBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_then_take_round_trips_and_clears() {
        let board = StreamOutputBoard::new();
        board.publish_coherence(3, CoherenceStreamOutputs::default());
        assert!(board.take_coherence().is_some());
        assert!(board.take_coherence().is_none());
    }
}
