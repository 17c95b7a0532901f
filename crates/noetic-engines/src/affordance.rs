//! AffordanceEngine (past), spec section 4.7.1, plus the `Affordance`
//! record it produces (spec section 3).

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use noetic_common::clamp::clamp01;
use noetic_common::ticker::TickerFabric;
use noetic_memory::WorkingMemorySnapshot;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::phase_sync::PhaseSynchronizer;
use crate::shared_state::SharedStateHandle;
use crate::step_context::{Phase, StepContext};
use crate::stream_outputs::{CoherenceStreamOutputs, StreamOutputBoard};

/// A possible action inferred from past experience (spec glossary).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Affordance {
    pub action_key: String,
    pub context: String,
    pub past_success: f64,
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
}

impl Affordance {
    pub fn new(
        action_key: impl Into<String>,
        context: impl Into<String>,
        past_success: f64,
        confidence: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            action_key: action_key.into(),
            context: context.into(),
            past_success: clamp01(past_success),
            confidence: clamp01(confidence),
            timestamp,
        }
    }
}

type StepHandler = Box<dyn Fn(&StepContext) + Send + Sync>;

const ENGINE_STEPS: u8 = 6;

/// Engine-local steps 0..5, wrapping. Step 0 is pivotal and rendezvous at
/// the `"step0"` barrier before processing (spec section 4.7.1).
pub struct AffordanceEngine {
    step: u8,
    shared: SharedStateHandle,
    sync: Arc<PhaseSynchronizer>,
    board: StreamOutputBoard,
    handlers: Vec<Option<StepHandler>>,
    memory_source: Box<dyn Fn() -> WorkingMemorySnapshot + Send + Sync>,
}

impl AffordanceEngine {
    pub fn new(
        shared: SharedStateHandle,
        sync: Arc<PhaseSynchronizer>,
        board: StreamOutputBoard,
        memory_source: impl Fn() -> WorkingMemorySnapshot + Send + Sync + 'static,
    ) -> Self {
        Self {
            step: 0,
            shared,
            sync,
            board,
            handlers: (0..ENGINE_STEPS).map(|_| None).collect(),
            memory_source: Box::new(memory_source),
        }
    }

    pub fn register_handler(&mut self, step: u8, handler: StepHandler) {
        self.handlers[(step % ENGINE_STEPS) as usize] = Some(handler);
    }

    /// Runs until `stop` is signalled. Drives itself on `ticker`, which the
    /// caller vends from a shared [`TickerFabric`] so cancellation is
    /// uniform across workers (spec section 5).
    pub async fn run(&mut self, fabric: &TickerFabric, mut stop: watch::Receiver<bool>, step_duration: Duration) {
        let mut ticker = fabric.spawn(step_duration);
        loop {
            tokio::select! {
                _ = stop.changed() => { if *stop.borrow() { return; } }
                tick = ticker.tick() => {
                    if tick.is_none() {
                        return;
                    }
                    self.run_step().await;
                }
            }
        }
    }

    async fn run_step(&mut self) {
        let step = self.step;

        if step == 0 {
            self.sync.rendezvous("step0").await;
        }

        let phase = if step == 0 { Phase::Reflective } else { Phase::Expressive };
        let snapshot = self.shared.snapshot();
        let ctx = StepContext {
            step,
            phase,
            previous_output: None,
            shared_snapshot: snapshot,
            timestamp: Utc::now(),
        };

        if let Some(handler) = self.handlers[step as usize].as_ref() {
            handler(&ctx);
        }

        let affordances = self.process_affordances(&ctx);
        self.board.publish_coherence(step, self.coherence_output(&affordances));
        self.shared.write_past_context(affordances);

        self.step = (self.step + 1) % ENGINE_STEPS;
    }

    /// Extracts candidate actions from past experience. The spec leaves
    /// this design-level and implementation-free; this heuristic treats
    /// every resident Working Memory Thought as a candidate affordance
    /// weighted by its importance, which is enough to drive the
    /// downstream synthesis arithmetic deterministically.
    fn process_affordances(&self, ctx: &StepContext) -> Vec<Affordance> {
        let snapshot = (self.memory_source)();
        snapshot
            .thoughts
            .iter()
            .map(|t| {
                Affordance::new(
                    format!("recall:{}", t.id),
                    t.content.clone(),
                    t.importance(),
                    0.5 + 0.5 * t.importance(),
                    ctx.timestamp,
                )
            })
            .collect()
    }

    fn coherence_output(&self, affordances: &[Affordance]) -> CoherenceStreamOutputs {
        let mut salience = std::collections::BTreeMap::new();
        let mut pattern_strength = std::collections::BTreeMap::new();
        let mut pattern_descriptions = std::collections::BTreeMap::new();

        for (idx, a) in affordances.iter().enumerate() {
            salience.insert(a.action_key.clone(), a.confidence);
            let pattern_id = format!("pattern-{idx}");
            pattern_strength.insert(pattern_id.clone(), a.past_success);
            pattern_descriptions.insert(pattern_id, a.context.clone());
        }

        CoherenceStreamOutputs {
            salience,
            pattern_strength,
            pattern_descriptions,
            contradiction_severity: 0.0,
            pattern_involvement: if affordances.is_empty() { 0.0 } else { 0.5 },
            consistency_score: 1.0,
            urgency_level: 0.0,
        }
    }
}
