//! The Persistence Adapter worker (spec section 4.12): one of the
//! parallel workers spec section 5 enumerates. Never blocks the scheduler
//! on a write failure — logs and continues, matching the taxonomy spec
//! section 7 assigns to hypergraph `Unavailable` errors.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use noetic_hypergraph::{HypergraphStore, Node, NodeType};
use tokio::sync::watch;
use tracing::{error, warn};

use crate::snapshot::{Identity, PersistedSnapshot, WisdomMetrics};

/// Collaborators the adapter reads from at every tick, supplied as
/// closures so this crate never depends on `noetic-core`, `noetic-rest`,
/// or `noetic-thought` directly.
pub struct PersistenceCollaborators {
    pub identity: Identity,
    pub cognitive_state_source: Box<dyn Fn() -> noetic_state::CognitiveState + Send + Sync>,
    pub wisdom_source: Box<dyn Fn() -> WisdomMetrics + Send + Sync>,
    pub thought_tail_source: Box<dyn Fn(usize) -> Vec<noetic_memory::Thought> + Send + Sync>,
}

pub struct PersistenceConfig {
    pub interval: Duration,
    pub thought_tail_len: usize,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(300),
            thought_tail_len: 20,
        }
    }
}

pub struct PersistenceAdapter<S: HypergraphStore> {
    store: Arc<S>,
    collaborators: PersistenceCollaborators,
    config: PersistenceConfig,
}

impl<S: HypergraphStore> PersistenceAdapter<S> {
    pub fn new(store: Arc<S>, collaborators: PersistenceCollaborators, config: PersistenceConfig) -> Self {
        Self { store, collaborators, config }
    }

    /// Builds the current snapshot payload from the injected collaborators.
    pub fn build_snapshot(&self) -> PersistedSnapshot {
        PersistedSnapshot {
            identity: self.collaborators.identity.clone(),
            cognitive_state: (self.collaborators.cognitive_state_source)(),
            wisdom: (self.collaborators.wisdom_source)(),
            thought_tail: (self.collaborators.thought_tail_source)(self.config.thought_tail_len),
            taken_at: Utc::now(),
        }
    }

    /// One persistence attempt. Returns whether the write succeeded; never
    /// panics or propagates, per spec section 4.12's "log and continue".
    pub async fn persist_once(&self) -> bool {
        let snapshot = self.build_snapshot();
        let content = match snapshot.to_json() {
            Ok(json) => json,
            Err(err) => {
                error!(error = %err, "failed to serialize persistence snapshot");
                return false;
            }
        };

        let node = Node::new(NodeType::Snapshot, content, 1.0);
        match self.store.store_node(node).await {
            Ok(_) => true,
            Err(err) => {
                warn!(error = %err, "persistence write failed, will retry next tick");
                false
            }
        }
    }

    /// Runs until `stop` fires, persisting on a fixed interval.
    pub async fn run(&self, mut stop: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.config.interval);
        loop {
            tokio::select! {
                _ = stop.changed() => { if *stop.borrow() { return; } }
                _ = ticker.tick() => { self.persist_once().await; }
            }
        }
    }
}
