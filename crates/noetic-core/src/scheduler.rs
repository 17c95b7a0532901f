//! The 12-Step Scheduler (spec section 4.8): owns the global step counter
//! and cycle count, publishes StepStart/StepEnd, broadcasts the current
//! step to the Relevance engine, and invokes the Integration Engine at the
//! three per-cycle transitions. Grounded in `beagle-scheduler`'s
//! fixed-interval worker-loop shape, generalized with tokio's burst
//! missed-tick recovery so up to one missed step is caught up silently and
//! more than one is reported as a `Skew` event (spec section 4.8's
//! tie-breaking rule) rather than handled by the plain regression-skips-a-
//! tick semantics `noetic_common::ticker::Ticker` provides elsewhere.

use std::sync::Arc;
use std::time::{Duration, Instant};

use noetic_engines::GlobalStepWatch;
use noetic_events::{EventBus, NoeticEvent, Priority};
use noetic_integration::{FullIntegration, IntegrationEngine};
use parking_lot::{Mutex, RwLock};
use tokio::sync::watch;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct FullIntegrationSummary {
    pub cycle: u64,
    pub overall_coherence: f64,
    pub action_confidence: f64,
    pub energy_recommendation: String,
}

impl From<(u64, &FullIntegration)> for FullIntegrationSummary {
    fn from((cycle, full): (u64, &FullIntegration)) -> Self {
        Self {
            cycle,
            overall_coherence: full.overall_coherence,
            action_confidence: full.action_confidence,
            energy_recommendation: format!("{:?}", full.energy_recommendation),
        }
    }
}

pub struct SchedulerConfig {
    pub step_duration: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { step_duration: Duration::from_secs(1) }
    }
}

struct Counter {
    step: u8,
    cycle: u64,
}

pub struct GlobalScheduler {
    counter: Mutex<Counter>,
    step_tx: watch::Sender<u8>,
    events: EventBus,
    integration: Arc<IntegrationEngine>,
    attention_source: Box<dyn Fn() -> Option<String> + Send + Sync>,
    last_full_integration: RwLock<Option<FullIntegrationSummary>>,
}

impl GlobalScheduler {
    pub fn new(
        events: EventBus,
        integration: Arc<IntegrationEngine>,
        attention_source: impl Fn() -> Option<String> + Send + Sync + 'static,
    ) -> (Self, GlobalStepWatch) {
        let (step_tx, step_rx) = watch::channel(0u8);
        let scheduler = Self {
            counter: Mutex::new(Counter { step: 0, cycle: 0 }),
            step_tx,
            events,
            integration,
            attention_source: Box::new(attention_source),
            last_full_integration: RwLock::new(None),
        };
        (scheduler, step_rx)
    }

    pub fn global_step(&self) -> u8 {
        self.counter.lock().step
    }

    pub fn cycle(&self) -> u64 {
        self.counter.lock().cycle
    }

    pub fn last_full_integration(&self) -> Option<FullIntegrationSummary> {
        self.last_full_integration.read().clone()
    }

    /// Runs until `stop` fires, ticking every `config.step_duration`.
    pub async fn run(&self, config: SchedulerConfig, mut stop: watch::Receiver<bool>) {
        let mut interval = tokio::time::interval(config.step_duration);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Burst);
        let mut last_fire = Instant::now();

        loop {
            tokio::select! {
                _ = stop.changed() => { if *stop.borrow() { return; } }
                _ = interval.tick() => {
                    let now = Instant::now();
                    let elapsed = now.duration_since(last_fire);
                    last_fire = now;
                    let missed = missed_steps(elapsed, config.step_duration);

                    if missed > 1 {
                        let resumed_step = self.global_step();
                        warn!(missed, resumed_step, "scheduler missed more than one step, resuming from current step");
                        self.events.publish(
                            NoeticEvent::Skew { missed, resumed_step },
                            Priority::High,
                        );
                        self.advance_one_step().await;
                    } else if missed == 1 {
                        // Up to one missed step is caught up by an
                        // immediate re-tick before the regular one.
                        self.advance_one_step().await;
                        self.advance_one_step().await;
                    } else {
                        self.advance_one_step().await;
                    }
                }
            }
        }
    }

    async fn advance_one_step(&self) {
        let (cycle, step) = {
            let counter = self.counter.lock();
            (counter.cycle, counter.step)
        };

        self.events.publish(NoeticEvent::StepStart { cycle, step }, Priority::Normal);
        self.events.publish(NoeticEvent::StepEnd { cycle, step }, Priority::Normal);

        match step {
            3 => {
                self.integration.run_coherence_integration();
            }
            7 => {
                self.integration.run_memory_integration();
            }
            11 => {
                let focus = (self.attention_source)();
                let full = self.integration.run_full_integration(cycle, focus.as_deref());
                *self.last_full_integration.write() = Some(FullIntegrationSummary::from((cycle, &full)));
            }
            _ => {}
        }

        let (next_step, next_cycle) = {
            let mut counter = self.counter.lock();
            counter.step = (counter.step + 1) % 12;
            if counter.step == 0 {
                counter.cycle += 1;
            }
            (counter.step, counter.cycle)
        };
        let _ = next_cycle;
        let _ = self.step_tx.send(next_step);
    }
}

/// Number of step intervals elapsed since the last fire, minus the one
/// this tick itself represents. 0 means on-time; 1 means exactly one tick
/// was missed; >1 triggers a Skew event.
fn missed_steps(elapsed: Duration, step_duration: Duration) -> u32 {
    if step_duration.is_zero() {
        return 0;
    }
    let ratio = elapsed.as_secs_f64() / step_duration.as_secs_f64();
    (ratio.round().max(1.0) as u32).saturating_sub(1)
}
