//! Dream Phase consolidation (spec section 4.10): a five-step sequence run
//! while `RestState::Dreaming`. Every step recomputes its output from
//! externally-observable state (the hypergraph, the Working Memory
//! snapshot, the wisdom ledger) rather than from private incremental
//! state, so re-running the whole sequence after an interruption converges
//! on an equivalent final state (spec section 4.10's restartability
//! requirement).

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use noetic_hypergraph::{Edge, HypergraphError, HypergraphStore, Node, NodeType};
use noetic_integration::WisdomLedger;
use noetic_memory::{Thought, ThoughtOrigin, ThoughtSource, ThoughtType, WorkingMemorySnapshot};
use tracing::debug;
use uuid::Uuid;

#[derive(Clone)]
pub struct DreamConfig {
    pub episode_query_limit: usize,
    pub min_cluster_size: usize,
    pub insight_importance: f64,
    pub prune_horizon: ChronoDuration,
    pub prune_threshold: f64,
    /// Weight added to an existing member-to-concept edge when the same
    /// co-activation recurs across Dream Phase runs (spec section 4.10:
    /// "strengthen existing edges between co-activated nodes").
    pub edge_strengthen_increment: f64,
}

impl Default for DreamConfig {
    fn default() -> Self {
        Self {
            episode_query_limit: 200,
            min_cluster_size: 3,
            insight_importance: 0.8,
            prune_horizon: ChronoDuration::days(7),
            prune_threshold: 0.2,
            edge_strengthen_increment: 0.1,
        }
    }
}

/// Step 1 output: the slice of the world Dream Phase reasons over.
pub struct DreamSnapshot {
    pub working_memory: WorkingMemorySnapshot,
    pub episodes: Vec<Node>,
}

/// Step 2 output: a candidate Concept grounded in co-occurring episodes.
pub struct PatternCluster {
    pub token: String,
    pub members: Vec<Uuid>,
}

/// The record of one completed Dream Phase run, for callers (the Wake/Rest
/// worker, tests) to inspect.
pub struct DreamOutcome {
    pub clusters_found: usize,
    pub insights_generated: Vec<Thought>,
    pub concepts_written: usize,
    pub edges_written: usize,
    pub episodes_pruned: usize,
}

pub struct DreamPhase<S: HypergraphStore> {
    store: Arc<S>,
    config: DreamConfig,
}

impl<S: HypergraphStore> DreamPhase<S> {
    pub fn new(store: Arc<S>, config: DreamConfig) -> Self {
        Self { store, config }
    }

    /// Step 1: snapshot Working Memory and recent Episode nodes.
    pub async fn snapshot(&self, working_memory: WorkingMemorySnapshot) -> Result<DreamSnapshot, HypergraphError> {
        let episodes = self.store.query_by_type(NodeType::Episode, self.config.episode_query_limit).await?;
        Ok(DreamSnapshot { working_memory, episodes })
    }

    /// Step 2: group episodes sharing a content token (>=5 chars) into
    /// candidate Concept clusters.
    pub fn extract_patterns(&self, snapshot: &DreamSnapshot) -> Vec<PatternCluster> {
        let mut by_token: BTreeMap<String, Vec<Uuid>> = BTreeMap::new();
        for episode in &snapshot.episodes {
            for token in significant_tokens(&episode.content) {
                by_token.entry(token).or_default().push(episode.id);
            }
        }

        by_token
            .into_iter()
            .filter(|(_, members)| members.len() >= self.config.min_cluster_size)
            .map(|(token, members)| PatternCluster { token, members })
            .collect()
    }

    /// Step 3: one Insight-type wisdom-summary Thought per qualifying
    /// cluster, at fixed importance (spec section 4.10).
    pub fn generate_insights(&self, clusters: &[PatternCluster], now: DateTime<Utc>) -> Vec<Thought> {
        clusters
            .iter()
            .map(|cluster| {
                Thought::new(
                    Uuid::new_v4().to_string(),
                    format!(
                        "Recurring pattern around \"{}\" across {} episodes.",
                        cluster.token,
                        cluster.members.len()
                    ),
                    ThoughtType::Insight,
                    ThoughtSource::Internal,
                    ThoughtOrigin::Generated { fallback: false },
                    now,
                    self.config.insight_importance,
                    0.0,
                )
            })
            .collect()
    }

    /// Step 4: write a Concept node per cluster not already present by
    /// content (restart-idempotence), an edge from every member Episode to
    /// it (strengthening the edge in place if that member was already
    /// linked to the concept from an earlier Dream Phase, rather than
    /// leaving the co-activation unrecorded), and prune stale
    /// low-importance Episodes from the store.
    pub async fn consolidate(&self, clusters: &[PatternCluster], snapshot: &DreamSnapshot, now: DateTime<Utc>) -> Result<(usize, usize, usize), HypergraphError> {
        let existing_concepts = self.store.query_by_type(NodeType::Concept, usize::MAX).await?;
        let mut concept_by_content: BTreeMap<String, Uuid> =
            existing_concepts.into_iter().map(|n| (n.content, n.id)).collect();

        let mut concepts_written = 0;
        let mut edges_written = 0;

        for cluster in clusters {
            let content = concept_content(&cluster.token);
            let concept_id = match concept_by_content.get(&content) {
                Some(id) => *id,
                None => {
                    let concept = Node::new(NodeType::Concept, content.clone(), self.config.insight_importance);
                    let id = self.store.store_node(concept).await?;
                    concept_by_content.insert(content, id);
                    concepts_written += 1;
                    id
                }
            };

            for member in &cluster.members {
                let existing = self
                    .store
                    .edges_from(*member)
                    .await?
                    .into_iter()
                    .find(|e| e.target_id == concept_id);

                let edge = match existing {
                    Some(mut edge) => {
                        edge.weight = (edge.weight + self.config.edge_strengthen_increment).min(1.0);
                        edge
                    }
                    None => Edge::new(*member, concept_id, "supports", 0.5),
                };
                self.store.store_edge(edge).await?;
                edges_written += 1;
            }
        }

        let mut episodes_pruned = 0;
        for episode in &snapshot.episodes {
            let age = now.signed_duration_since(episode.created_at);
            if age >= self.config.prune_horizon && episode.importance < self.config.prune_threshold {
                debug!(episode_id = %episode.id, "pruning stale low-importance episode");
                self.store.delete_node(episode.id).await?;
                episodes_pruned += 1;
            }
        }

        Ok((concepts_written, edges_written, episodes_pruned))
    }

    /// Step 5: fold the wisdom ledger's accumulated deltas since the last
    /// wake period into a durable Goal-type node recording the totals. The
    /// ledger itself is reset by the caller after this returns.
    pub async fn update_wisdom_metrics(&self, ledger: &WisdomLedger, now: DateTime<Utc>) -> Result<Uuid, HypergraphError> {
        let content = format!(
            "wisdom update: knowledge_depth={:.4} reasoning_quality={:.4} insight_frequency={:.4} behavioral_coherence={:.4}",
            ledger.knowledge_depth, ledger.reasoning_quality, ledger.insight_frequency, ledger.behavioral_coherence,
        );
        let mut node = Node::new(NodeType::Goal, content, ledger.reasoning_quality);
        node.updated_at = now;
        self.store.store_node(node).await
    }

    /// Runs the full five-step sequence. Safe to call again after an
    /// interruption: every step is recomputed from current store state.
    pub async fn run(&self, working_memory: WorkingMemorySnapshot, ledger: &WisdomLedger, now: DateTime<Utc>) -> Result<DreamOutcome, HypergraphError> {
        let snapshot = self.snapshot(working_memory).await?;
        let clusters = self.extract_patterns(&snapshot);
        let insights = self.generate_insights(&clusters, now);
        let (concepts_written, edges_written, episodes_pruned) = self.consolidate(&clusters, &snapshot, now).await?;
        self.update_wisdom_metrics(ledger, now).await?;

        Ok(DreamOutcome {
            clusters_found: clusters.len(),
            insights_generated: insights,
            concepts_written,
            edges_written,
            episodes_pruned,
        })
    }
}

fn significant_tokens(content: &str) -> BTreeSet<String> {
    content
        .split_whitespace()
        .map(|raw| raw.chars().filter(|c| c.is_alphanumeric()).collect::<String>().to_lowercase())
        .filter(|w| w.chars().count() >= 5)
        .collect()
}

fn concept_content(token: &str) -> String {
    format!("pattern: {token}")
}
