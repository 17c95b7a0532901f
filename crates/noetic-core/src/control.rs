//! Control Surface (spec section 6.4): `start`/`stop`/`wake`/`rest`/
//! `status`, wired over an already-constructed scheduler and worker set.
//! Grounded in `beagle-bin`'s top-level lifecycle handle, generalized from
//! a single eternal loop into the supervise-many-workers shape spec
//! section 5 requires.

use std::sync::Arc;
use std::time::{Duration, Instant};

use noetic_common::ticker::TickerFabric;
use noetic_hypergraph::HypergraphStore;
use noetic_rest::WakeRestWorker;
use noetic_thought::ThoughtGenerationController;
use tokio::task::JoinHandle;
use tracing::info;

use crate::counters::{EventDispatcher, SubsystemCounters};
use crate::scheduler::{FullIntegrationSummary, GlobalScheduler, SchedulerConfig};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone)]
pub struct StatusSnapshot {
    pub version: &'static str,
    pub state: String,
    pub uptime: Duration,
    pub cycle_count: u64,
    pub global_step: u8,
    pub last_full_integration: Option<FullIntegrationSummary>,
    pub counters: SubsystemCounters,
}

/// Grace period the Control Surface waits for workers to exit on `stop()`
/// before giving up (spec section 5's "bounded grace, default 1s").
const STOP_GRACE: Duration = Duration::from_secs(1);

pub struct CoreWorkers<S: HypergraphStore> {
    pub scheduler: Arc<GlobalScheduler>,
    pub scheduler_config: SchedulerConfig,
    pub wake_rest: Arc<WakeRestWorker<S>>,
    pub thought: Arc<ThoughtGenerationController>,
    pub dispatcher: Arc<EventDispatcher>,
}

pub struct ControlSurface<S: HypergraphStore> {
    fabric: TickerFabric,
    workers: CoreWorkers<S>,
    started_at: Instant,
    handles: parking_lot::Mutex<Vec<JoinHandle<()>>>,
}

impl<S: HypergraphStore + 'static> ControlSurface<S> {
    pub fn new(fabric: TickerFabric, workers: CoreWorkers<S>) -> Self {
        Self {
            fabric,
            workers,
            started_at: Instant::now(),
            handles: parking_lot::Mutex::new(Vec::new()),
        }
    }

    /// Spawns every worker loop. Returns once all spawns have been issued;
    /// the workers themselves run for the lifetime of the process (or
    /// until `stop()`).
    pub async fn start(&self, stimuli: tokio::sync::mpsc::Receiver<noetic_thought::Stimulus>) {
        let stop = self.fabric.stop_signal();
        let mut handles = self.handles.lock();

        let scheduler = self.workers.scheduler.clone();
        let scheduler_config = self.workers.scheduler_config.step_duration;
        let stop_sched = stop.clone();
        handles.push(tokio::spawn(async move {
            scheduler.run(SchedulerConfig { step_duration: scheduler_config }, stop_sched).await;
        }));

        let wake_rest = self.workers.wake_rest.clone();
        let stop_rest = stop.clone();
        handles.push(tokio::spawn(async move {
            wake_rest.run(stop_rest).await;
        }));

        let thought = self.workers.thought.clone();
        let stop_thought = stop.clone();
        handles.push(tokio::spawn(async move {
            thought.run(stop_thought, stimuli).await;
        }));

        let dispatcher = self.workers.dispatcher.clone();
        let stop_dispatch = stop.clone();
        handles.push(tokio::spawn(async move {
            dispatcher.run(stop_dispatch).await;
        }));

        info!("all workers spawned");
    }

    /// Signals cancellation and waits up to `STOP_GRACE` for every worker
    /// to exit.
    pub async fn stop(&self) {
        self.fabric.stop();
        let handles: Vec<_> = self.handles.lock().drain(..).collect();
        let joined = tokio::time::timeout(STOP_GRACE, futures_join_all(handles)).await;
        if joined.is_err() {
            tracing::warn!("stop() grace period elapsed before all workers exited");
        }
    }

    pub async fn wake(&self) -> bool {
        self.workers.wake_rest.command_wake()
    }

    pub async fn rest(&self) {
        self.workers.wake_rest.command_rest().await;
    }

    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            version: VERSION,
            state: format!("{:?}", self.workers.wake_rest.state()),
            uptime: self.started_at.elapsed(),
            cycle_count: self.workers.scheduler.cycle(),
            global_step: self.workers.scheduler.global_step(),
            last_full_integration: self.workers.scheduler.last_full_integration(),
            counters: self.workers.dispatcher.counters(),
        }
    }
}

async fn futures_join_all(handles: Vec<JoinHandle<()>>) {
    for handle in handles {
        let _ = handle.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noetic_engines::{SharedStateHandle, StreamOutputBoard};
    use noetic_events::EventBus;
    use noetic_hypergraph::InMemoryHypergraph;
    use noetic_integration::{IntegrationEngine, WisdomLedger};
    use noetic_llm::MockThoughtProducer;
    use noetic_memory::{EmptyTopicExtractor, InterestTable, WorkingMemory, WorkingMemorySnapshot};
    use noetic_rest::{WakeRestCollaborators, WakeRestWorkerConfig};
    use noetic_state::CognitiveState;
    use noetic_thought::CadenceConfig;

    fn control_surface() -> ControlSurface<InMemoryHypergraph> {
        let fabric = TickerFabric::new();
        let events = EventBus::new(20, 20);

        let integration = Arc::new(IntegrationEngine::new(StreamOutputBoard::new(), SharedStateHandle::new(), events.clone()));
        let (scheduler, _rx) = GlobalScheduler::new(events.clone(), integration, || None);

        let store = Arc::new(InMemoryHypergraph::new());
        let wake_rest = Arc::new(WakeRestWorker::new(
            WakeRestCollaborators {
                store,
                load_source: Box::new(|| 0.1),
                working_memory_source: Box::new(|| WorkingMemorySnapshot { thoughts: Vec::new(), focus: None }),
                wisdom_source: Box::new(WisdomLedger::default),
            },
            events.clone(),
            WakeRestWorkerConfig::default(),
        ));

        let thought = Arc::new(ThoughtGenerationController::new(
            WorkingMemory::new(7),
            InterestTable::new(0.01, 0.01),
            Arc::new(MockThoughtProducer),
            events.clone(),
            Box::new(EmptyTopicExtractor),
            CognitiveState::default,
            || None,
            CadenceConfig::default(),
        ));

        let dispatcher = Arc::new(EventDispatcher::new(events));

        ControlSurface::new(fabric, CoreWorkers {
            scheduler: Arc::new(scheduler),
            scheduler_config: SchedulerConfig { step_duration: Duration::from_millis(5) },
            wake_rest,
            thought,
            dispatcher,
        })
    }

    #[tokio::test]
    async fn status_reports_initial_awake_state() {
        let control = control_surface();
        let status = control.status();
        assert_eq!(status.state, "Awake");
        assert_eq!(status.global_step, 0);
    }

    #[tokio::test]
    async fn rest_transitions_to_dreaming() {
        let control = control_surface();
        control.rest().await;
        assert_eq!(control.status().state, "Dreaming");
    }

    #[tokio::test]
    async fn start_then_stop_exits_cleanly() {
        let control = control_surface();
        let (_tx, rx) = tokio::sync::mpsc::channel(4);
        control.start(rx).await;
        tokio::time::sleep(Duration::from_millis(30)).await;
        control.stop().await;
    }
}
