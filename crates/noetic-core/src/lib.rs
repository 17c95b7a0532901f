//! The 12-Step Scheduler, the event-bus dispatcher, and the Control
//! Surface that wires every other crate's workers into one supervised
//! process (spec sections 4.8, 4.9 step-transition invocation, 5, 6.4).

pub mod control;
pub mod counters;
pub mod scheduler;
pub mod step;

pub use control::{ControlSurface, CoreWorkers, StatusSnapshot, VERSION};
pub use counters::{EventDispatcher, SubsystemCounters};
pub use scheduler::{FullIntegrationSummary, GlobalScheduler, SchedulerConfig};
pub use step::{active_stream, is_cycle_transition, is_pivotal, metadata_for, phase_for, triad_of, ActiveStream, Phase, StepMetadata};
