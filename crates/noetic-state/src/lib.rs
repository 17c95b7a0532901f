//! The Cognitive State Vector and Attention Pointer (spec sections 4.4,
//! 4.5). Grounded in `beagle-personality::emotional`'s bounded scalar
//! vector plus decay/update style, generalized to the dimensions spec
//! section 3 names.

mod attention;
mod cognitive_state;

pub use attention::AttentionPointer;
pub use cognitive_state::CognitiveState;
