//! The Integration/Synthesis Engine itself: invoked by the Scheduler at
//! step transitions 3→4, 7→8, and 11→0 (spec section 4.8 step 5, section
//! 4.9). Degrades gracefully when an engine hasn't published its stream
//! output yet, per spec section 4.8's documented-default rule.

use noetic_common::clamp::clamp01;
use noetic_engines::{CoherenceStreamOutputs, MemoryStreamOutputs, SalienceStreamOutputs, SharedStateHandle, StreamOutputBoard};
use noetic_events::{EventBus, NoeticEvent, Priority};
use parking_lot::RwLock;

use crate::coherence::{synthesize_coherence, CoherenceSynthesis};
use crate::full::{synthesize_full, FullIntegration, FullIntegrationInputs};
use crate::memory::{synthesize_memory, MemorySynthesis};

/// Running totals carried across cycles: the previous coherence score (fed
/// back into the next cycle's d3 term) and accumulated wisdom.
#[derive(Debug, Clone, Default)]
pub struct WisdomLedger {
    pub knowledge_depth: f64,
    pub reasoning_quality: f64,
    pub insight_frequency: f64,
    pub behavioral_coherence: f64,
}

impl WisdomLedger {
    fn accumulate(&mut self, delta: &crate::full::WisdomDelta) {
        self.knowledge_depth = clamp01(self.knowledge_depth + delta.knowledge_depth);
        self.reasoning_quality = clamp01(self.reasoning_quality + delta.reasoning_quality);
        self.insight_frequency = clamp01(self.insight_frequency + delta.insight_frequency);
        self.behavioral_coherence = clamp01(self.behavioral_coherence + delta.behavioral_coherence);
    }
}

struct State {
    last_coherence: Option<CoherenceSynthesis>,
    last_memory: Option<MemorySynthesis>,
    previous_coherence_score: f64,
    wisdom: WisdomLedger,
}

impl Default for State {
    fn default() -> Self {
        Self {
            last_coherence: None,
            last_memory: None,
            previous_coherence_score: 0.5,
            wisdom: WisdomLedger::default(),
        }
    }
}

pub struct IntegrationEngine {
    board: StreamOutputBoard,
    shared: SharedStateHandle,
    events: EventBus,
    state: RwLock<State>,
}

impl IntegrationEngine {
    pub fn new(board: StreamOutputBoard, shared: SharedStateHandle, events: EventBus) -> Self {
        Self {
            board,
            shared,
            events,
            state: RwLock::new(State::default()),
        }
    }

    pub fn wisdom(&self) -> WisdomLedger {
        self.state.read().wisdom.clone()
    }

    /// Step 3→4 transition.
    pub fn run_coherence_integration(&self) -> CoherenceSynthesis {
        let inputs = match self.board.take_coherence() {
            Some(outputs) => outputs,
            None => {
                self.publish_degraded("coherence stream had no output at step 4");
                CoherenceStreamOutputs::default()
            }
        };

        let previous = self.state.read().previous_coherence_score;
        let synthesis = synthesize_coherence(&inputs, previous);

        self.shared.set_coherence(synthesis.coherence_score);

        let mut state = self.state.write();
        state.previous_coherence_score = synthesis.coherence_score;
        state.last_coherence = Some(synthesis.clone());
        synthesis
    }

    /// Step 7→8 transition.
    pub fn run_memory_integration(&self) -> MemorySynthesis {
        let inputs = match self.board.take_memory() {
            Some(outputs) => outputs,
            None => {
                self.publish_degraded("memory stream had no output at step 8");
                MemoryStreamOutputs::default()
            }
        };

        let synthesis = synthesize_memory(&inputs);
        self.shared.set_integration(synthesis.triadic_flow);
        self.state.write().last_memory = Some(synthesis.clone());
        synthesis
    }

    /// Step 11→0 transition (cycle close).
    pub fn run_full_integration(&self, cycle: u64, current_attention_focus: Option<&str>) -> FullIntegration {
        let salience_inputs = match self.board.take_salience() {
            Some(outputs) => outputs,
            None => {
                self.publish_degraded("salience stream had no output at cycle close");
                SalienceStreamOutputs::default()
            }
        };

        let mut state = self.state.write();
        let coherence = state.last_coherence.clone().unwrap_or_else(|| synthesize_coherence(&CoherenceStreamOutputs::default(), state.previous_coherence_score));
        let memory = state.last_memory.clone().unwrap_or_else(|| synthesize_memory(&MemoryStreamOutputs::default()));

        let full = synthesize_full(FullIntegrationInputs {
            coherence: &coherence,
            memory: &memory,
            salience: &salience_inputs,
            current_attention_focus,
        });

        state.wisdom.accumulate(&full.wisdom_delta);
        drop(state);

        self.events.publish(
            NoeticEvent::FullIntegrationComplete {
                cycle,
                overall_coherence: full.overall_coherence,
                action_confidence: full.action_confidence,
                energy_recommendation: format!("{:?}", full.energy_recommendation),
            },
            Priority::Normal,
        );

        full
    }

    fn publish_degraded(&self, reason: &str) {
        self.events.publish(
            NoeticEvent::DegradedIntegration { reason: reason.to_string() },
            Priority::High,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_stream_output_degrades_instead_of_panicking() {
        let board = StreamOutputBoard::new();
        let shared = SharedStateHandle::new();
        let events = EventBus::new(10, 10);
        let mut rx = events.subscribe();
        let engine = IntegrationEngine::new(board, shared, events);

        let synthesis = engine.run_coherence_integration();
        assert_eq!(synthesis.coherence_score, 0.0);

        let envelope = rx.try_recv().expect("degraded event published");
        assert!(matches!(envelope.event, NoeticEvent::DegradedIntegration { .. }));
    }

    #[test]
    fn full_integration_accumulates_wisdom_across_calls() {
        let board = StreamOutputBoard::new();
        let shared = SharedStateHandle::new();
        let events = EventBus::new(10, 10);
        let engine = IntegrationEngine::new(board, shared, events);

        engine.run_coherence_integration();
        engine.run_memory_integration();
        engine.run_full_integration(1, None);
        let first = engine.wisdom();

        engine.run_coherence_integration();
        engine.run_memory_integration();
        engine.run_full_integration(2, None);
        let second = engine.wisdom();

        assert!(second.reasoning_quality >= first.reasoning_quality);
    }
}
