//! In-memory `HypergraphStore`, standing in for the Postgres/Neo4j-backed
//! production store (spec section 6.2's "a fully in-memory run must be
//! correct"). Grounded in the `tokio::sync::RwLock<HashMap<..>>` doctest
//! pattern shown in `beagle-hypergraph::traits`.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::HypergraphError;
use crate::models::{Edge, Node, NodeType};
use crate::traits::HypergraphStore;

#[derive(Default)]
pub struct InMemoryHypergraph {
    nodes: RwLock<HashMap<Uuid, Node>>,
    edges: RwLock<HashMap<Uuid, Edge>>,
}

impl InMemoryHypergraph {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HypergraphStore for InMemoryHypergraph {
    async fn store_node(&self, node: Node) -> Result<Uuid, HypergraphError> {
        let id = node.id;
        self.nodes.write().await.insert(id, node);
        Ok(id)
    }

    async fn store_edge(&self, edge: Edge) -> Result<Uuid, HypergraphError> {
        let id = edge.id;
        self.edges.write().await.insert(id, edge);
        Ok(id)
    }

    async fn query_by_type(&self, node_type: NodeType, limit: usize) -> Result<Vec<Node>, HypergraphError> {
        let nodes = self.nodes.read().await;
        Ok(nodes
            .values()
            .filter(|n| n.node_type == node_type)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn edges_from(&self, id: Uuid) -> Result<Vec<Edge>, HypergraphError> {
        let edges = self.edges.read().await;
        Ok(edges.values().filter(|e| e.source_id == id).cloned().collect())
    }

    async fn edges_to(&self, id: Uuid) -> Result<Vec<Edge>, HypergraphError> {
        let edges = self.edges.read().await;
        Ok(edges.values().filter(|e| e.target_id == id).cloned().collect())
    }

    async fn delete_node(&self, id: Uuid) -> Result<(), HypergraphError> {
        self.nodes.write().await.remove(&id);
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, HypergraphError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_and_queries_nodes_by_type() {
        let store = InMemoryHypergraph::new();
        store
            .store_node(Node::new(NodeType::Concept, "wisdom", 0.8))
            .await
            .unwrap();
        store
            .store_node(Node::new(NodeType::Episode, "yesterday", 0.4))
            .await
            .unwrap();

        let concepts = store.query_by_type(NodeType::Concept, 10).await.unwrap();
        assert_eq!(concepts.len(), 1);
        assert_eq!(concepts[0].content, "wisdom");
    }

    #[tokio::test]
    async fn edges_from_and_to_round_trip() {
        let store = InMemoryHypergraph::new();
        let a = Node::new(NodeType::Concept, "a", 0.5);
        let b = Node::new(NodeType::Concept, "b", 0.5);
        let (a_id, b_id) = (a.id, b.id);
        store.store_node(a).await.unwrap();
        store.store_node(b).await.unwrap();
        store
            .store_edge(Edge::new(a_id, b_id, "relates_to", 0.9))
            .await
            .unwrap();

        assert_eq!(store.edges_from(a_id).await.unwrap().len(), 1);
        assert_eq!(store.edges_to(b_id).await.unwrap().len(), 1);
        assert!(store.edges_to(a_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn similarity_search_falls_back_to_substring_match() {
        let store = InMemoryHypergraph::new();
        store
            .store_node(Node::new(NodeType::Concept, "the nature of wisdom", 0.7))
            .await
            .unwrap();

        let hits = store.similarity_search("wisdom", 5).await.unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn delete_node_removes_it_from_query_results() {
        let store = InMemoryHypergraph::new();
        let node = Node::new(NodeType::Episode, "stale episode", 0.1);
        let id = node.id;
        store.store_node(node).await.unwrap();

        store.delete_node(id).await.unwrap();

        assert!(store.query_by_type(NodeType::Episode, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_node_on_an_absent_id_is_not_an_error() {
        let store = InMemoryHypergraph::new();
        store.delete_node(Uuid::new_v4()).await.unwrap();
    }

    #[tokio::test]
    async fn health_check_reports_ok() {
        let store = InMemoryHypergraph::new();
        assert!(store.health_check().await.unwrap());
    }
}
