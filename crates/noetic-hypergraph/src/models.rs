//! Node/edge shape for the Memory collaborator (spec section 6.2).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    Episode,
    Concept,
    Skill,
    Goal,
    Thought,
    /// A Persistence Adapter snapshot (spec section 4.12): identity,
    /// cognitive-state vector, wisdom metrics, and a bounded Thought tail,
    /// serialized as JSON into `Node::content`.
    Snapshot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: Uuid,
    pub node_type: NodeType,
    pub content: String,
    pub metadata: HashMap<String, String>,
    pub importance: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Node {
    pub fn new(node_type: NodeType, content: impl Into<String>, importance: f64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            node_type,
            content: content.into(),
            metadata: HashMap::new(),
            importance: importance.clamp(0.0, 1.0),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub id: Uuid,
    pub source_id: Uuid,
    pub target_id: Uuid,
    pub edge_type: String,
    pub weight: f64,
    pub created_at: DateTime<Utc>,
}

impl Edge {
    pub fn new(
        source_id: Uuid,
        target_id: Uuid,
        edge_type: impl Into<String>,
        weight: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_id,
            target_id,
            edge_type: edge_type.into(),
            weight: weight.clamp(0.0, 1.0),
            created_at: Utc::now(),
        }
    }
}
