//! Persistence Adapter (spec section 4.12): a periodic snapshot of
//! identity, cognitive-state vector, wisdom metrics, and a bounded Thought
//! tail, written through the Memory collaborator. Grounded in
//! `beagle-scheduler`'s fixed-interval worker-loop shape.

pub mod adapter;
pub mod snapshot;

pub use adapter::{PersistenceAdapter, PersistenceCollaborators, PersistenceConfig};
pub use snapshot::{Identity, PersistedSnapshot, WisdomMetrics};
