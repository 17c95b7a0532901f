//! SalienceEngine (future), spec section 4.7.3, plus the `Scenario` record
//! it produces (spec section 3).

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
use crate::stream_outputs::{SalienceStreamOutputs, StreamOutputBoard};

/// A simulated future possibility (spec glossary). `next_steps` is the
/// ordered list of concrete actions that would realize it, distinct from
/// `description` (spec section 4.9.3 distinguishes the two: `unifiedAttention`
/// names the possibility, `unifiedIntention` names what to do about it).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub description: String,
    pub goal_alignment: f64,
    pub estimated_success: f64,
    pub novelty: f64,
    pub timestamp: DateTime<Utc>,
    pub next_steps: Vec<String>,
}

impl Scenario {
    pub fn new(
        description: impl Into<String>,
        goal_alignment: f64,
        estimated_success: f64,
        novelty: f64,
        timestamp: DateTime<Utc>,
        next_steps: Vec<String>,
    ) -> Self {
        Self {
            description: description.into(),
            goal_alignment: clamp01(goal_alignment),
            estimated_success: clamp01(estimated_success),
            novelty: clamp01(novelty),
            timestamp,
            next_steps,
        }
    }
}

type StepHandler = Box<dyn Fn(&StepContext) + Send + Sync>;

const ENGINE_STEPS: u8 = 6;
const ENGINE_BASE: u8 = 6;

/// Engine-local steps 6..11, wrapping. Step 6 is pivotal and rendezvous at
/// the `"step6"` barrier before processing (spec section 4.7.3).
pub struct SalienceEngine {
    local_step: u8,
    shared: SharedStateHandle,
    sync: Arc<PhaseSynchronizer>,
    board: StreamOutputBoard,
    handlers: Vec<Option<StepHandler>>,
    memory_source: Box<dyn Fn() -> WorkingMemorySnapshot + Send + Sync>,
}

impl SalienceEngine {
    pub fn new(
        shared: SharedStateHandle,
        sync: Arc<PhaseSynchronizer>,
        board: StreamOutputBoard,
        memory_source: impl Fn() -> WorkingMemorySnapshot + Send + Sync + 'static,
    ) -> Self {
        Self {
            local_step: 0,
            shared,
            sync,
            board,
            handlers: (0..ENGINE_STEPS).map(|_| None).collect(),
            memory_source: Box::new(memory_source),
        }
    }

    pub fn register_handler(&mut self, local_step: u8, handler: StepHandler) {
        self.handlers[(local_step % ENGINE_STEPS) as usize] = Some(handler);
    }

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
        let global_step = ENGINE_BASE + self.local_step;

        if self.local_step == 0 {
            self.sync.rendezvous("step6").await;
        }

        let phase = if matches!(self.local_step, 1 | 2) { Phase::Reflective } else { Phase::Expressive };
        let snapshot = self.shared.snapshot();
        let ctx = StepContext {
            step: global_step,
            phase,
            previous_output: None,
            shared_snapshot: snapshot,
            timestamp: Utc::now(),
        };

        if let Some(handler) = self.handlers[self.local_step as usize].as_ref() {
            handler(&ctx);
        }

        let scenarios = self.simulate_scenarios(&ctx);
        self.board.publish_salience(global_step, self.salience_output(&scenarios));
        self.shared.write_future_options(scenarios);

        self.local_step = (self.local_step + 1) % ENGINE_STEPS;
    }

    /// Simulates candidate future scenarios. Design-level/implementation-free
    /// per the spec; this heuristic forks one scenario per resident Working
    /// Memory Thought, scoring goal alignment and success from the source
    /// Thought's importance/valence so later synthesis arithmetic has
    /// deterministic, non-degenerate inputs.
    fn simulate_scenarios(&self, ctx: &StepContext) -> Vec<Scenario> {
        let snapshot = (self.memory_source)();
        snapshot
            .thoughts
            .iter()
            .map(|t| {
                Scenario::new(
                    format!("pursue:{}", t.id),
                    0.5 + 0.5 * t.emotional_valence().max(0.0),
                    t.importance(),
                    1.0 - t.importance(),
                    ctx.timestamp,
                    vec![format!("begin:{}", t.id)],
                )
            })
            .collect()
    }

    fn salience_output(&self, scenarios: &[Scenario]) -> SalienceStreamOutputs {
        let top = scenarios
            .iter()
            .max_by(|a, b| a.estimated_success.total_cmp(&b.estimated_success));

        SalienceStreamOutputs {
            knowledge_confidence: if scenarios.is_empty() { 0.0 } else { 0.6 },
            attention_confidence: 0.5,
            simulation_confidence: top.map(|s| s.estimated_success).unwrap_or(0.0),
            integration_health: 1.0,
            top_possibility_success: top.map(|s| s.estimated_success).unwrap_or(0.0),
            consolidation_insights: Vec::new(),
            coherence_issues: Vec::new(),
            novelty_scores: scenarios.iter().map(|s| s.novelty).collect(),
            top_possibility_goal_alignment: top.map(|s| s.goal_alignment).unwrap_or(0.0),
            top_possibility_description: top.map(|s| s.description.clone()),
            top_possibility_next_step: top.and_then(|s| s.next_steps.first().cloned()),
            simulation_recommended_action: top.map(|s| s.description.clone()),
            active_knowledge_items: Vec::new(),
        }
    }
}
