//! Attention Pointer (spec section 4.5): current target, intensity,
//! last-shift time, automatic diffusion/re-focus.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use noetic_common::clamp::clamp01;
use rand::Rng;

const DECAY_FACTOR: f64 = 0.95;
const DIFFUSION_TIMEOUT_SECS: i64 = 30;
const DIFFUSION_INTENSITY: f64 = 0.6;
const EXTERNAL_SHIFT_THRESHOLD: f64 = 0.6;

/// Current target, intensity, and shift bookkeeping. `target` is opaque to
/// this crate (a topic string, a Thought id, free text) per spec section
/// 3; the Attention Pointer only tracks intensity dynamics around it.
#[derive(Debug, Clone)]
pub struct AttentionPointer {
    target: Option<String>,
    intensity: f64,
    last_shift: DateTime<Utc>,
}

impl AttentionPointer {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            target: None,
            intensity: 0.0,
            last_shift: now,
        }
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    /// `duration := now - lastShift`.
    pub fn duration_since_shift(&self, now: DateTime<Utc>) -> ChronoDuration {
        now.signed_duration_since(self.last_shift)
    }

    /// Every second of wall time: decay intensity, and if more than 30s
    /// have elapsed since the last shift, pick a new target uniformly at
    /// random from the top-5 interests and re-shift with the diffusion
    /// intensity (spec section 4.5).
    pub fn tick(&mut self, now: DateTime<Utc>, top_interests: &[(String, f64)]) {
        self.intensity = clamp01(self.intensity * DECAY_FACTOR);

        if self.duration_since_shift(now).num_seconds() > DIFFUSION_TIMEOUT_SECS {
            if let Some(target) = pick_uniform(top_interests) {
                self.target = Some(target);
                self.intensity = DIFFUSION_INTENSITY;
                self.last_shift = now;
            }
        }
    }

    /// An external stimulus with `intensity > 0.6` overrides the target
    /// immediately, regardless of the diffusion timeout (spec section 4.5).
    pub fn external_shift(&mut self, target: impl Into<String>, intensity: f64, now: DateTime<Utc>) {
        if intensity > EXTERNAL_SHIFT_THRESHOLD {
            self.target = Some(target.into());
            self.intensity = clamp01(intensity);
            self.last_shift = now;
        }
    }
}

fn pick_uniform(candidates: &[(String, f64)]) -> Option<String> {
    let top5 = &candidates[..candidates.len().min(5)];
    if top5.is_empty() {
        return None;
    }
    let idx = rand::thread_rng().gen_range(0..top5.len());
    Some(top5[idx].0.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_decays_intensity() {
        let now = Utc::now();
        let mut pointer = AttentionPointer::new(now);
        pointer.intensity = 1.0;
        pointer.tick(now, &[]);
        assert!((pointer.intensity() - 0.95).abs() < 1e-9);
    }

    #[test]
    fn tick_reshifts_after_timeout_from_top_interests() {
        let start = Utc::now();
        let mut pointer = AttentionPointer::new(start);
        let later = start + ChronoDuration::seconds(31);
        let interests = vec![("wisdom".to_string(), 1.0)];
        pointer.tick(later, &interests);
        assert_eq!(pointer.target(), Some("wisdom"));
        assert_eq!(pointer.intensity(), 0.6);
    }

    #[test]
    fn tick_does_not_reshift_before_timeout() {
        let start = Utc::now();
        let mut pointer = AttentionPointer::new(start);
        let soon = start + ChronoDuration::seconds(5);
        pointer.tick(soon, &[("other".into(), 1.0)]);
        assert_eq!(pointer.target(), None);
    }

    #[test]
    fn external_shift_above_threshold_overrides_immediately() {
        let now = Utc::now();
        let mut pointer = AttentionPointer::new(now);
        pointer.external_shift("urgent", 0.9, now);
        assert_eq!(pointer.target(), Some("urgent"));
        assert_eq!(pointer.intensity(), 0.9);
    }

    #[test]
    fn external_shift_below_threshold_is_ignored() {
        let now = Utc::now();
        let mut pointer = AttentionPointer::new(now);
        pointer.external_shift("minor", 0.3, now);
        assert_eq!(pointer.target(), None);
    }
}
