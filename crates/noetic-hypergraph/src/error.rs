//! Error taxonomy for the hypergraph collaborator (spec section 6.2).
//! Grounded verbatim in the shape of `beagle-hypergraph::error::HypergraphError`,
//! trimmed to the failure modes an in-memory / trait-object store can
//! actually raise (no SQL or pool-specific variants: the production
//! Postgres/Neo4j-backed store sits behind the `HypergraphStorage` trait
//! object and is outside this crate's scope).

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum HypergraphError {
    #[error("node not found: {0}")]
    NodeNotFound(Uuid),

    #[error("edge not found: {0}")]
    EdgeNotFound(Uuid),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("invalid node or edge: {0}")]
    Invalid(String),
}

impl HypergraphError {
    /// Transient per spec section 7's taxonomy: the store is unreachable
    /// right now but may recover. The core never stops for this; it logs,
    /// emits a typed event, and continues with stalled consolidation.
    pub fn is_transient(&self) -> bool {
        matches!(self, HypergraphError::Unavailable(_))
    }
}
