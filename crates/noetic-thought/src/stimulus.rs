//! External stimuli (spec section 6.3): `submitStimulus` inputs. The
//! Control Surface (`noetic-core`) accepts these from callers and forwards
//! them here; the Thought Generation Controller both interrupts its sleep
//! on arrival and, above the priority threshold, admits the stimulus
//! directly as an external Thought.

use chrono::{DateTime, Utc};
use noetic_common::clamp::clamp01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StimulusType {
    Perception,
    Question,
    Command,
    Information,
    Emotional,
}

#[derive(Debug, Clone)]
pub struct Stimulus {
    pub kind: StimulusType,
    pub content: String,
    pub intensity: f64,
    pub timestamp: DateTime<Utc>,
    pub source: String,
}

impl Stimulus {
    pub fn new(kind: StimulusType, content: impl Into<String>, intensity: f64, timestamp: DateTime<Utc>, source: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            intensity: clamp01(intensity),
            timestamp,
            source: source.into(),
        }
    }
}
