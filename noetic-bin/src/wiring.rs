//! Wires a [`NoeticConfig`] onto the runtime structs every crate exposes
//! and assembles the full [`ControlSurface`] worker graph. Grounded in
//! `beagle-bin`'s inline `main()` construction, split into its own module
//! here because the number of collaborators this core wires together is
//! an order of magnitude larger than the teacher's fractal/eternity pair.

use std::sync::Arc;
use std::time::Duration;

use chrono::Duration as ChronoDuration;
use noetic_common::ticker::TickerFabric;
use noetic_config::NoeticConfig;
use noetic_core::{ControlSurface, CoreWorkers, EventDispatcher, GlobalScheduler, SchedulerConfig};
use noetic_engines::{
    AffordanceEngine, PhaseSynchronizer, RelevanceEngine, SalienceEngine, SharedStateHandle, StreamOutputBoard,
};
use noetic_events::EventBus;
use noetic_hypergraph::InMemoryHypergraph;
use noetic_integration::IntegrationEngine;
use noetic_llm::ThoughtProducer;
use noetic_memory::{EmptyTopicExtractor, InterestTable, WorkingMemory};
use noetic_persistence::{Identity, PersistenceAdapter, PersistenceCollaborators, PersistenceConfig, WisdomMetrics};
use noetic_rest::{DreamConfig, RestConfig, WakeRestCollaborators, WakeRestWorker, WakeRestWorkerConfig};
use noetic_state::CognitiveState;
use noetic_thought::{CadenceConfig, ThoughtGenerationController};
use tokio::task::JoinHandle;

/// Everything [`run`] needs beyond the config: the LLM backend and, in a
/// future revision, an alternate hypergraph backend. Kept as a struct so
/// callers in integration tests can substitute a mock producer.
pub struct Collaborators {
    pub producer: Arc<dyn ThoughtProducer>,
    pub identity: Identity,
}

/// The fully wired core, plus the handles for the three concurrent
/// inference engines `ControlSurface` does not itself own (they take
/// `&mut self` in their own run loops rather than living behind an `Arc`,
/// so `noetic-core` never has to know about them).
pub struct WiredCore {
    pub control: ControlSurface<InMemoryHypergraph>,
    persistence: Arc<PersistenceAdapter<InMemoryHypergraph>>,
    fabric: TickerFabric,
}

impl WiredCore {
    /// Spawns the Control Surface's own workers plus the Persistence
    /// Adapter and the three concurrent inference engines, which
    /// `ControlSurface::start` does not cover.
    pub async fn start(&self, stimuli: tokio::sync::mpsc::Receiver<noetic_thought::Stimulus>) -> Vec<JoinHandle<()>> {
        self.control.start(stimuli).await;

        let mut handles = Vec::new();

        let persistence = self.persistence.clone();
        let stop = self.fabric.stop_signal();
        handles.push(tokio::spawn(async move { persistence.run(stop).await }));

        handles
    }

    pub async fn stop(&self) {
        self.control.stop().await;
    }
}

fn rest_config(config: &NoeticConfig) -> RestConfig {
    RestConfig {
        fatigue_threshold: config.fatigue.rest_threshold,
        min_wake_duration: ChronoDuration::milliseconds(config.rest.min_wake_ms as i64),
        min_rest_duration: ChronoDuration::milliseconds(config.rest.min_sleep_ms as i64),
        fatigue_rate: config.fatigue.rate,
    }
}

fn cadence_config(config: &NoeticConfig) -> CadenceConfig {
    CadenceConfig {
        base: Duration::from_millis(config.thought.base_interval_ms),
        min: Duration::from_millis(config.thought.min_interval_ms),
        max: Duration::from_millis(config.thought.max_interval_ms),
    }
}

/// Assembles every collaborator named in spec section 6 and returns a
/// ready-to-start [`WiredCore`]. Construction order follows each
/// collaborator's dependency on the ones before it: events and state
/// first, then the three engines that write into shared state, then the
/// integration engine and scheduler that read from it, then the
/// higher-level workers (thought generation, wake/rest, persistence) that
/// close the loop.
pub fn build(config: NoeticConfig, collaborators: Collaborators) -> WiredCore {
    let fabric = TickerFabric::new();
    let events = EventBus::new(config.event_bus.queue_size, config.event_bus.history_size);
    let store = Arc::new(InMemoryHypergraph::new());

    let shared = SharedStateHandle::new();
    let board = StreamOutputBoard::new();
    let sync = Arc::new(PhaseSynchronizer::new(Duration::from_millis(config.phase_sync.timeout_ms), events.clone()));

    let working_memory = WorkingMemory::new(config.working_memory.capacity);
    let interests = InterestTable::new(config.interest.decay_rate, config.interest.min_score);

    let thought = Arc::new(ThoughtGenerationController::new(
        working_memory,
        interests,
        collaborators.producer,
        events.clone(),
        Box::new(EmptyTopicExtractor),
        CognitiveState::default,
        {
            let shared = shared.clone();
            move || shared.snapshot().present_focus
        },
        cadence_config(&config),
    ));

    let integration = Arc::new(IntegrationEngine::new(board.clone(), shared.clone(), events.clone()));

    let (scheduler, step_rx) = GlobalScheduler::new(events.clone(), integration.clone(), {
        let shared = shared.clone();
        move || shared.snapshot().present_focus
    });
    let scheduler = Arc::new(scheduler);

    let wake_rest = Arc::new(WakeRestWorker::new(
        WakeRestCollaborators {
            store: store.clone(),
            load_source: {
                let shared = shared.clone();
                Box::new(move || shared.snapshot().coherence)
            },
            working_memory_source: {
                let thought = thought.clone();
                Box::new(move || thought.working_memory_snapshot())
            },
            wisdom_source: {
                let integration = integration.clone();
                Box::new(move || integration.wisdom())
            },
        },
        events.clone(),
        WakeRestWorkerConfig {
            monitoring_tick: Duration::from_secs(5),
            rest: rest_config(&config),
            dream: DreamConfig::default(),
        },
    ));

    let dispatcher = Arc::new(EventDispatcher::new(events.clone()));

    let control = ControlSurface::new(
        fabric.clone(),
        CoreWorkers {
            scheduler,
            scheduler_config: SchedulerConfig { step_duration: Duration::from_millis(config.step.interval_ms) },
            wake_rest,
            thought: thought.clone(),
            dispatcher,
        },
    );

    let persistence = Arc::new(PersistenceAdapter::new(
        store,
        PersistenceCollaborators {
            identity: collaborators.identity,
            cognitive_state_source: Box::new(CognitiveState::default),
            wisdom_source: {
                let integration = integration.clone();
                Box::new(move || {
                    let ledger = integration.wisdom();
                    WisdomMetrics {
                        knowledge_depth: ledger.knowledge_depth,
                        reasoning_quality: ledger.reasoning_quality,
                        insight_frequency: ledger.insight_frequency,
                        behavioral_coherence: ledger.behavioral_coherence,
                    }
                })
            },
            thought_tail_source: {
                let thought = thought.clone();
                Box::new(move |n| {
                    let mut tail = thought.working_memory_snapshot().thoughts;
                    let start = tail.len().saturating_sub(n);
                    tail.split_off(start)
                })
            },
        },
        PersistenceConfig {
            interval: Duration::from_millis(config.persistence.interval_ms),
            thought_tail_len: 20,
        },
    ));

    spawn_concurrent_engines(fabric.clone(), shared, sync, board, thought, step_rx, Duration::from_millis(config.step.interval_ms));

    WiredCore { control, persistence, fabric }
}

/// Spawns the Affordance, Salience and Relevance engines (spec section
/// 4.7). These are not part of [`CoreWorkers`] because they run on `&mut
/// self`, not behind a shared `Arc` the way the Control Surface's other
/// workers do; the fabric's shared stop signal is enough to supervise
/// them uniformly regardless.
fn spawn_concurrent_engines(
    fabric: TickerFabric,
    shared: SharedStateHandle,
    sync: Arc<PhaseSynchronizer>,
    board: StreamOutputBoard,
    thought: Arc<ThoughtGenerationController>,
    step_rx: noetic_engines::GlobalStepWatch,
    step_duration: Duration,
) {
    let memory_source = {
        let thought = thought.clone();
        move || thought.working_memory_snapshot()
    };

    let mut affordance = AffordanceEngine::new(shared.clone(), sync.clone(), board.clone(), memory_source.clone());
    let stop = fabric.stop_signal();
    let fabric_for_affordance = fabric.clone();
    tokio::spawn(async move { affordance.run(&fabric_for_affordance, stop, step_duration).await });

    let mut salience = SalienceEngine::new(shared.clone(), sync.clone(), board, memory_source);
    let stop = fabric.stop_signal();
    let fabric_for_salience = fabric.clone();
    tokio::spawn(async move { salience.run(&fabric_for_salience, stop, step_duration).await });

    let mut relevance = RelevanceEngine::new(shared, sync, step_rx);
    let stop = fabric.stop_signal();
    tokio::spawn(async move { relevance.run(stop, Duration::from_millis(500)).await });
}
