//! The Memory Collaborator abstraction (spec section 6.2), generalized
//! from `beagle-hypergraph::traits::HypergraphStorage`'s async CRUD +
//! query surface. Persistence is eventually consistent; the core never
//! assumes read-your-write within the same cycle (spec section 6.2).

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::HypergraphError;
use crate::models::{Edge, Node, NodeType};

/// Abstract hypergraph store the Wake/Rest Controller's Dream Phase and
/// the Persistence Adapter write into. Concrete backends (Postgres, Neo4j,
/// ...) are injected at `start()`; this crate ships only an in-memory
/// stand-in (see [`crate::memory_store::InMemoryHypergraph`]).
#[async_trait]
pub trait HypergraphStore: Send + Sync {
    async fn store_node(&self, node: Node) -> Result<Uuid, HypergraphError>;
    async fn store_edge(&self, edge: Edge) -> Result<Uuid, HypergraphError>;
    async fn query_by_type(&self, node_type: NodeType, limit: usize) -> Result<Vec<Node>, HypergraphError>;
    async fn edges_from(&self, id: Uuid) -> Result<Vec<Edge>, HypergraphError>;
    async fn edges_to(&self, id: Uuid) -> Result<Vec<Edge>, HypergraphError>;

    /// Removes a node (spec section 4.10's Dream Phase pruning step).
    /// Returns `Ok(())` whether or not `id` was present, matching
    /// `store_node`/`store_edge`'s idempotent-upsert tolerance for a
    /// Memory Collaborator that is eventually consistent.
    async fn delete_node(&self, id: Uuid) -> Result<(), HypergraphError>;

    /// Optional similarity search; the default falls back to substring
    /// match over node content (spec section 6.2).
    async fn similarity_search(&self, text: &str, k: usize) -> Result<Vec<(Node, f32)>, HypergraphError> {
        let candidates = self.query_by_type(NodeType::Concept, usize::MAX).await?;
        let needle = text.to_lowercase();
        let mut hits: Vec<(Node, f32)> = candidates
            .into_iter()
            .filter(|n| n.content.to_lowercase().contains(&needle))
            .map(|n| (n, 1.0))
            .collect();
        hits.truncate(k);
        Ok(hits)
    }

    async fn health_check(&self) -> Result<bool, HypergraphError>;
}
