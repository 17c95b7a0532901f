//! Cognitive State Vector (spec section 4.4): scalar fields used both as
//! inputs to the scheduler and as observable outputs.

use noetic_common::clamp::{clamp01, clamp_signed};
use serde::{Deserialize, Serialize};

/// A single scalar dimension of the Cognitive State Vector. `update`
/// dispatches on this so callers don't need nine separate setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Arousal,
    Valence,
    Clarity,
    Openness,
    Load,
    Capacity,
    Fatigue,
    Curiosity,
    FocusDepth,
}

/// Arousal, valence, clarity, openness, load, capacity, fatigue, curiosity,
/// focus-depth, all clamped to `[0,1]` (valence to `[-1,1]`); the three
/// stream weights sum to approximately 1.0 (spec section 3).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CognitiveState {
    pub arousal: f64,
    pub valence: f64,
    pub clarity: f64,
    pub openness: f64,
    pub load: f64,
    pub capacity: f64,
    pub fatigue: f64,
    pub curiosity: f64,
    pub focus_depth: f64,
    pub past_weight: f64,
    pub present_weight: f64,
    pub future_weight: f64,
}

impl Default for CognitiveState {
    fn default() -> Self {
        Self {
            arousal: 0.3,
            valence: 0.0,
            clarity: 0.5,
            openness: 0.5,
            load: 0.2,
            capacity: 1.0,
            fatigue: 0.0,
            curiosity: 0.5,
            focus_depth: 0.3,
            past_weight: 1.0 / 3.0,
            present_weight: 1.0 / 3.0,
            future_weight: 1.0 / 3.0,
        }
    }
}

impl CognitiveState {
    /// Clamp `value` into the dimension's documented range and assign it.
    pub fn update(&mut self, dimension: Dimension, value: f64) {
        match dimension {
            Dimension::Arousal => self.arousal = clamp01(value),
            Dimension::Valence => self.valence = clamp_signed(value),
            Dimension::Clarity => self.clarity = clamp01(value),
            Dimension::Openness => self.openness = clamp01(value),
            Dimension::Load => self.load = clamp01(value),
            Dimension::Capacity => self.capacity = clamp01(value),
            Dimension::Fatigue => self.fatigue = clamp01(value),
            Dimension::Curiosity => self.curiosity = clamp01(value),
            Dimension::FocusDepth => self.focus_depth = clamp01(value),
        }
    }

    /// `load := memoryFill * 0.7 + baseLoad * 0.3` (spec section 4.4; the
    /// coefficients are design-level constants, exposed here so they are
    /// not duplicated at call sites).
    pub fn composite_load(memory_fill: f64, base_load: f64) -> f64 {
        clamp01(memory_fill * 0.7 + base_load * 0.3)
    }

    /// Clamped assignment of the four scalars most frequently updated
    /// together by the scheduler and wake/rest controller.
    pub fn update_cognitive_state(&mut self, load: f64, fatigue: f64, curiosity: f64, focus: f64) {
        self.load = clamp01(load);
        self.fatigue = clamp01(fatigue);
        self.curiosity = clamp01(curiosity);
        self.focus_depth = clamp01(focus);
    }

    /// Re-normalizes the three stream weights so they sum to 1.0, preserving
    /// their relative proportions. Falls back to an equal split if all three
    /// are zero (e.g. freshly constructed state with a caller-supplied zero
    /// triple).
    pub fn normalize_stream_weights(&mut self) {
        let sum = self.past_weight + self.present_weight + self.future_weight;
        if sum <= f64::EPSILON {
            self.past_weight = 1.0 / 3.0;
            self.present_weight = 1.0 / 3.0;
            self.future_weight = 1.0 / 3.0;
        } else {
            self.past_weight /= sum;
            self.present_weight /= sum;
            self.future_weight /= sum;
        }
    }
}
