//! Integration/Synthesis Engine (spec section 4.9): Coherence Synthesis at
//! step 4, Memory Synthesis at step 8, Full Tetrahedral Integration at
//! cycle close. Grounded in `beagle-consciousness::global_workspace`'s
//! competitive-then-broadcast shape, generalized from neural ignition
//! dynamics to the spec's closed-form per-cycle arithmetic.

pub mod coherence;
pub mod engine;
pub mod full;
pub mod memory;

pub use coherence::{synthesize_coherence, CoherenceSynthesis};
pub use engine::{IntegrationEngine, WisdomLedger};
pub use full::{synthesize_full, EnergyRecommendation, FullIntegration, FullIntegrationInputs, WisdomDelta};
pub use memory::{synthesize_memory, MemorySynthesis};
