//! The Wake/Rest worker: periodically monitors fatigue, drives the
//! `WakeRestController` state machine, and runs the Dream Phase while
//! Dreaming. One of the parallel workers spec section 5 enumerates.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use noetic_events::{EventBus, NoeticEvent, Priority};
use noetic_hypergraph::HypergraphStore;
use noetic_integration::WisdomLedger;
use noetic_memory::WorkingMemorySnapshot;
use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::dream::{DreamConfig, DreamPhase};
use crate::state_machine::{RestConfig, RestState, WakeRestController};

pub struct WakeRestWorkerConfig {
    pub monitoring_tick: Duration,
    pub rest: RestConfig,
    pub dream: DreamConfig,
}

impl Default for WakeRestWorkerConfig {
    fn default() -> Self {
        Self {
            monitoring_tick: Duration::from_secs(5),
            rest: RestConfig::default(),
            dream: DreamConfig::default(),
        }
    }
}

/// Collaborators the worker needs at every monitoring tick, supplied as
/// closures so this crate never depends on `noetic-core`'s scheduler or
/// `noetic-thought`'s controller directly.
pub struct WakeRestCollaborators<S: HypergraphStore> {
    pub store: Arc<S>,
    pub load_source: Box<dyn Fn() -> f64 + Send + Sync>,
    pub working_memory_source: Box<dyn Fn() -> WorkingMemorySnapshot + Send + Sync>,
    pub wisdom_source: Box<dyn Fn() -> WisdomLedger + Send + Sync>,
}

pub struct WakeRestWorker<S: HypergraphStore> {
    controller: Mutex<WakeRestController>,
    dream_phase: DreamPhase<S>,
    collaborators: WakeRestCollaborators<S>,
    events: EventBus,
    config: WakeRestWorkerConfig,
}

impl<S: HypergraphStore> WakeRestWorker<S> {
    pub fn new(collaborators: WakeRestCollaborators<S>, events: EventBus, config: WakeRestWorkerConfig) -> Self {
        let store = collaborators.store.clone();
        let dream_phase = DreamPhase::new(store, config.dream.clone());
        Self {
            controller: Mutex::new(WakeRestController::new(Utc::now(), config.rest.clone())),
            dream_phase,
            collaborators,
            events,
            config,
        }
    }

    pub fn state(&self) -> RestState {
        self.controller.lock().state()
    }

    /// An explicit `rest()` Control Surface command (spec section 6.4).
    pub async fn command_rest(&self) {
        let now = Utc::now();
        let entered = {
            let mut ctrl = self.controller.lock();
            if ctrl.state() == RestState::Awake {
                ctrl.rest(now);
                true
            } else {
                false
            }
        };
        if entered {
            self.enter_dreaming(now).await;
        }
    }

    /// An explicit `wake()` Control Surface command (spec section 6.4).
    pub fn command_wake(&self) -> bool {
        let now = Utc::now();
        let woke = self.controller.lock().wake(now);
        if woke {
            self.events.publish(NoeticEvent::WakeInitiated, Priority::High);
        }
        woke
    }

    /// Runs until `stop` fires. Every tick: accrues fatigue while Awake,
    /// checks the threshold transition, and lets a self-terminating Dream
    /// Phase finish on its own clock.
    pub async fn run(&self, mut stop: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.config.monitoring_tick);
        loop {
            tokio::select! {
                _ = stop.changed() => { if *stop.borrow() { return; } }
                _ = ticker.tick() => self.tick().await,
            }
        }
    }

    async fn tick(&self) {
        let now = Utc::now();
        let state = self.controller.lock().state();

        match state {
            RestState::Awake => {
                let load = (self.collaborators.load_source)();
                let should_rest = {
                    let mut ctrl = self.controller.lock();
                    ctrl.tick_awake(load);
                    ctrl.should_rest(now)
                };
                if should_rest {
                    self.controller.lock().rest(now);
                    self.enter_dreaming(now).await;
                }
            }
            RestState::Dreaming => {
                if self.controller.lock().dream_duration_elapsed(now) {
                    let woke = self.controller.lock().wake(now);
                    if woke {
                        self.events.publish(NoeticEvent::WakeInitiated, Priority::High);
                    }
                }
            }
            RestState::Resting => {}
        }
    }

    async fn enter_dreaming(&self, now: chrono::DateTime<Utc>) {
        self.events.publish(NoeticEvent::RestInitiated, Priority::High);
        self.events.publish(NoeticEvent::DreamStarted, Priority::Normal);

        let working_memory = (self.collaborators.working_memory_source)();
        let ledger = (self.collaborators.wisdom_source)();

        match self.dream_phase.run(working_memory, &ledger, now).await {
            Ok(outcome) => {
                info!(
                    clusters = outcome.clusters_found,
                    concepts = outcome.concepts_written,
                    edges = outcome.edges_written,
                    pruned = outcome.episodes_pruned,
                    "dream phase complete"
                );
                self.events.publish(
                    NoeticEvent::DreamEnded { insights: outcome.insights_generated.len() },
                    Priority::Normal,
                );
            }
            Err(err) => {
                warn!(error = %err, "dream phase consolidation failed, waking without consolidating");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noetic_hypergraph::InMemoryHypergraph;

    fn collaborators(store: Arc<InMemoryHypergraph>) -> WakeRestCollaborators<InMemoryHypergraph> {
        WakeRestCollaborators {
            store,
            load_source: Box::new(|| 1.0),
            working_memory_source: Box::new(|| WorkingMemorySnapshot { thoughts: Vec::new(), focus: None }),
            wisdom_source: Box::new(WisdomLedger::default),
        }
    }

    #[tokio::test]
    async fn explicit_rest_command_runs_dream_phase_and_publishes_events() {
        let store = Arc::new(InMemoryHypergraph::new());
        let events = EventBus::new(20, 20);
        let mut rx = events.subscribe();
        let worker = WakeRestWorker::new(collaborators(store), events, WakeRestWorkerConfig::default());

        worker.command_rest().await;
        assert_eq!(worker.state(), RestState::Dreaming);

        let mut seen = Vec::new();
        while let Ok(envelope) = rx.try_recv() {
            seen.push(envelope.event.type_name());
        }
        assert!(seen.contains(&"RestInitiated"));
        assert!(seen.contains(&"DreamStarted"));
        assert!(seen.contains(&"DreamEnded"));
    }

    #[tokio::test]
    async fn wake_command_is_refused_while_awake() {
        let store = Arc::new(InMemoryHypergraph::new());
        let events = EventBus::new(20, 20);
        let worker = WakeRestWorker::new(collaborators(store), events, WakeRestWorkerConfig::default());
        assert!(!worker.command_wake());
    }
}
