//! The three concurrent inference engines, their phase synchronizer, and
//! the shared state/stream-output contracts between them (spec section
//! 4.7). Grounded in `beagle-triad`'s three-stream decomposition and
//! `beagle-consciousness::global_workspace`'s snapshot-based shared state.

pub mod affordance;
pub mod phase_sync;
pub mod relevance;
pub mod salience;
pub mod shared_state;
pub mod step_context;
pub mod stream_outputs;

pub use affordance::{Affordance, AffordanceEngine};
pub use phase_sync::{PhaseSynchronizer, RendezvousOutcome, REQUIRED_ARRIVALS};
pub use relevance::{GlobalStepWatch, RelevanceEngine};
pub use salience::{SalienceEngine, Scenario};
pub use shared_state::{SharedCognitiveState, SharedStateHandle};
pub use step_context::{Phase, StepContext};
pub use stream_outputs::{CoherenceStreamOutputs, MemoryStreamOutputs, SalienceStreamOutputs, StreamOutputBoard};
