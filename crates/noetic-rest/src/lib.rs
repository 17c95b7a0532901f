//! Wake/Rest Controller and Dream Phase (spec section 4.10). Grounded in
//! `beagle-scheduler`'s worker-loop shape, generalized from a fixed polling
//! cadence to the fatigue-threshold state machine this spec names.

pub mod dream;
pub mod state_machine;
pub mod worker;

pub use dream::{DreamConfig, DreamOutcome, DreamPhase, DreamSnapshot, PatternCluster};
pub use state_machine::{RestConfig, RestState, WakeRestController};
pub use worker::{WakeRestCollaborators, WakeRestWorker, WakeRestWorkerConfig};
