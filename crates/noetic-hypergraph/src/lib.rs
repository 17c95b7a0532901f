//! The Memory Collaborator (spec section 6.2): an opaque hypergraph
//! key-value store the core never owns. Grounded in
//! `beagle-hypergraph::traits::HypergraphStorage`, generalized to the
//! Node/Edge shape spec section 6.2 names and trimmed to what this core
//! actually calls (no SQL backend, no CRDT sync, no embeddings pipeline —
//! those live entirely outside the core's scope).

pub mod error;
pub mod memory_store;
pub mod models;
pub mod traits;

pub use error::HypergraphError;
pub use memory_store::InMemoryHypergraph;
pub use models::{Edge, Node, NodeType};
pub use traits::HypergraphStore;
