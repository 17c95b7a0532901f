//! Typed event bus for cross-component coupling and telemetry (spec
//! section 4.11). Generalizes the per-subscriber broadcast registry used
//! throughout the teacher workspace's observer crate into a bounded,
//! typed, metered pub/sub fabric.

mod bus;
mod events;
mod metrics;

pub use bus::EventBus;
pub use events::{EventEnvelope, NoeticEvent, Priority};
pub use metrics::EventMetrics;
