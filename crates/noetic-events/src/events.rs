use chrono::{DateTime, Utc};
use serde::Serialize;

/// Every event kind the core or its workers may publish (spec section
/// 4.11). Tagged so a JSON-consuming introspection tool can distinguish
/// variants without guessing from shape, the way `beagle-events::EventType`
/// tags its category/payload pairs.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "payload")]
pub enum NoeticEvent {
    StepStart { cycle: u64, step: u8 },
    StepEnd { cycle: u64, step: u8 },
    ThoughtGenerated {
        thought_id: String,
        kind: String,
        fallback: bool,
    },
    StimulusReceived { source: String },
    PhaseSyncTimeout {
        step: u8,
        arrived: usize,
        required: usize,
    },
    DegradedIntegration { reason: String },
    FullIntegrationComplete {
        cycle: u64,
        overall_coherence: f64,
        action_confidence: f64,
        energy_recommendation: String,
    },
    WakeInitiated,
    RestInitiated,
    DreamStarted,
    DreamEnded { insights: usize },
    /// More than one step tick was missed (spec section 4.8); the
    /// scheduler resumes from the actual current step rather than
    /// replaying every missed one.
    Skew { missed: u32, resumed_step: u8 },
    VitalSignsUpdate {
        arousal: f64,
        valence: f64,
        load: f64,
        fatigue: f64,
    },
    /// Not itself publishable through the queue it describes — recorded
    /// directly into history when an overflow is detected (see `Bus::publish`).
    DroppedEvent { event_type: &'static str },
}

impl NoeticEvent {
    /// Stable discriminant name, used for per-type subscription routing
    /// and for the dropped-event counter's label.
    pub fn type_name(&self) -> &'static str {
        match self {
            NoeticEvent::StepStart { .. } => "StepStart",
            NoeticEvent::StepEnd { .. } => "StepEnd",
            NoeticEvent::ThoughtGenerated { .. } => "ThoughtGenerated",
            NoeticEvent::StimulusReceived { .. } => "StimulusReceived",
            NoeticEvent::PhaseSyncTimeout { .. } => "PhaseSyncTimeout",
            NoeticEvent::DegradedIntegration { .. } => "DegradedIntegration",
            NoeticEvent::FullIntegrationComplete { .. } => "FullIntegrationComplete",
            NoeticEvent::WakeInitiated => "WakeInitiated",
            NoeticEvent::RestInitiated => "RestInitiated",
            NoeticEvent::DreamStarted => "DreamStarted",
            NoeticEvent::DreamEnded { .. } => "DreamEnded",
            NoeticEvent::Skew { .. } => "Skew",
            NoeticEvent::VitalSignsUpdate { .. } => "VitalSignsUpdate",
            NoeticEvent::DroppedEvent { .. } => "DroppedEvent",
        }
    }
}

/// Priority tag carried alongside an event. The bus does not reorder on
/// priority today, but subscribers may use it to decide what to read first
/// under backpressure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Priority {
    Low,
    Normal,
    High,
}

/// An event plus the bookkeeping the bus attaches: a monotonic id, a
/// wall-clock timestamp, and its priority.
#[derive(Debug, Clone, Serialize)]
pub struct EventEnvelope {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub priority: Priority,
    pub event: NoeticEvent,
}
