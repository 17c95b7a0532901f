//! RelevanceEngine (present), spec section 4.7.2. Unlike Affordance and
//! Salience it has no step range of its own: it polls the scheduler's
//! global step and only acts at the pivotal steps {0, 6}.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tracing::trace;

use crate::phase_sync::PhaseSynchronizer;
use crate::shared_state::SharedStateHandle;
use crate::step_context::{Phase, StepContext};

/// Read-only view of the Scheduler's global step counter (spec section
/// 4.8), vended by `noetic-core` the same way `noetic_common::ticker`
/// vends cancellation: a `watch::Receiver` the consumer polls or awaits.
pub type GlobalStepWatch = watch::Receiver<u8>;

type Handler = Box<dyn Fn(&StepContext) + Send + Sync>;

const PIVOTAL_STEPS: [u8; 2] = [0, 6];

/// Polls `global_step` every `poll_interval` (default 500ms); when the
/// observed step is a new pivotal step, rendezvous at its barrier and run
/// relevance realization.
pub struct RelevanceEngine {
    shared: SharedStateHandle,
    sync: Arc<PhaseSynchronizer>,
    global_step: GlobalStepWatch,
    last_handled: Option<u8>,
    handler: Option<Handler>,
}

impl RelevanceEngine {
    pub fn new(shared: SharedStateHandle, sync: Arc<PhaseSynchronizer>, global_step: GlobalStepWatch) -> Self {
        Self {
            shared,
            sync,
            global_step,
            last_handled: None,
            handler: None,
        }
    }

    pub fn register_handler(&mut self, handler: Handler) {
        self.handler = Some(handler);
    }

    pub async fn run(&mut self, mut stop: watch::Receiver<bool>, poll_interval: Duration) {
        let mut interval = tokio::time::interval(poll_interval);
        loop {
            tokio::select! {
                _ = stop.changed() => { if *stop.borrow() { return; } }
                _ = interval.tick() => {
                    self.poll_once().await;
                }
            }
        }
    }

    async fn poll_once(&mut self) {
        let step = *self.global_step.borrow();
        if !PIVOTAL_STEPS.contains(&step) {
            return;
        }
        if self.last_handled == Some(step) {
            return;
        }
        self.last_handled = Some(step);

        let label = if step == 0 { "step0" } else { "step6" };
        self.sync.rendezvous(label).await;
        trace!(step, "relevance engine acting at pivotal step");

        let snapshot = self.shared.snapshot();
        let ctx = StepContext {
            step,
            phase: Phase::Reflective,
            previous_output: None,
            shared_snapshot: snapshot.clone(),
            timestamp: Utc::now(),
        };

        if let Some(handler) = self.handler.as_ref() {
            handler(&ctx);
        }

        let focus = self.realize_relevance(&ctx);
        self.shared.write_present_focus(focus);
    }

    /// Scores candidates by integrating `pastContext` and `futureOptions`
    /// (spec section 4.7.2): the affordance with highest confidence and the
    /// scenario with highest estimated success compete, and the higher of
    /// the two supplies the new present focus.
    fn realize_relevance(&self, ctx: &StepContext) -> Option<String> {
        let best_affordance = ctx
            .shared_snapshot
            .past_context
            .iter()
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence));
        let best_scenario = ctx
            .shared_snapshot
            .future_options
            .iter()
            .max_by(|a, b| a.estimated_success.total_cmp(&b.estimated_success));

        match (best_affordance, best_scenario) {
            (Some(a), Some(s)) if s.estimated_success > a.confidence => Some(s.description.clone()),
            (Some(a), _) => Some(a.context.clone()),
            (None, Some(s)) => Some(s.description.clone()),
            (None, None) => None,
        }
    }
}
