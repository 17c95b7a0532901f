//! Thought Generation Controller (spec section 4.6). Grounded in
//! `beagle-llm`'s backend-router shape for calling out to a producer, and
//! `beagle-triad`'s prompt-assembly style for building the per-cycle
//! context snapshot handed to it.

pub mod association;
pub mod cadence;
pub mod controller;
pub mod scoring;
pub mod selection;
pub mod stimulus;
pub mod templates;

pub use association::find_associations;
pub use cadence::next_interval;
pub use controller::{CadenceConfig, ThoughtGenerationController};
pub use scoring::{emotional_valence, importance, interest_match_score};
pub use selection::{select_thought_type, SelectionInputs};
pub use stimulus::{Stimulus, StimulusType};
pub use templates::fallback_text;
