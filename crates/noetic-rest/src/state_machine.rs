//! Wake/Rest state machine (spec section 4.10).

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use noetic_common::clamp::clamp01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestState {
    Awake,
    Resting,
    Dreaming,
}

#[derive(Clone)]
pub struct RestConfig {
    pub fatigue_threshold: f64,
    pub min_wake_duration: ChronoDuration,
    pub min_rest_duration: ChronoDuration,
    pub fatigue_rate: f64,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            fatigue_threshold: 0.75,
            min_wake_duration: ChronoDuration::minutes(30),
            min_rest_duration: ChronoDuration::minutes(5),
            fatigue_rate: 0.01,
        }
    }
}

/// Owns `fatigue`, `state`, and the rest/wake timestamps; single-writer
/// per spec section 5.
pub struct WakeRestController {
    state: RestState,
    fatigue: f64,
    last_rest: DateTime<Utc>,
    rest_entered_at: Option<DateTime<Utc>>,
    config: RestConfig,
}

impl WakeRestController {
    pub fn new(now: DateTime<Utc>, config: RestConfig) -> Self {
        Self {
            state: RestState::Awake,
            fatigue: 0.0,
            last_rest: now,
            rest_entered_at: None,
            config,
        }
    }

    pub fn state(&self) -> RestState {
        self.state
    }

    pub fn fatigue(&self) -> f64 {
        self.fatigue
    }

    /// Accrue fatigue for one monitoring tick while Awake (spec section
    /// 4.10: `fatigue += load * fatigueRate`). A no-op outside Awake.
    pub fn tick_awake(&mut self, load: f64) {
        if self.state != RestState::Awake {
            return;
        }
        self.fatigue = clamp01(self.fatigue + load * self.config.fatigue_rate);
    }

    /// Evaluate the Awake -> Resting threshold condition. Does not itself
    /// transition; callers combine this with an explicit `rest()` command.
    pub fn should_rest(&self, now: DateTime<Utc>) -> bool {
        self.state == RestState::Awake
            && self.fatigue > self.config.fatigue_threshold
            && now.signed_duration_since(self.last_rest) >= self.config.min_wake_duration
    }

    /// Forces Awake -> Resting -> Dreaming, regardless of the threshold
    /// (spec section 4.10: "OR on explicit command").
    pub fn rest(&mut self, now: DateTime<Utc>) {
        if self.state == RestState::Awake {
            self.state = RestState::Dreaming;
            self.rest_entered_at = Some(now);
        }
    }

    /// An external wake command. Honored immediately if Resting, or if
    /// Dreaming and at least half of `min_rest_duration` has elapsed.
    pub fn wake(&mut self, now: DateTime<Utc>) -> bool {
        match self.state {
            RestState::Awake => false,
            RestState::Resting => {
                self.complete_rest(now);
                true
            }
            RestState::Dreaming => {
                let elapsed = self.rest_entered_at.map(|t| now.signed_duration_since(t)).unwrap_or_default();
                if elapsed >= self.config.min_rest_duration / 2 {
                    self.complete_rest(now);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Whether enough wall time has passed in Dreaming to wake on its own
    /// (spec section 4.10: "Dreaming runs consolidation until
    /// minRestDuration elapses").
    pub fn dream_duration_elapsed(&self, now: DateTime<Utc>) -> bool {
        self.rest_entered_at
            .map(|t| now.signed_duration_since(t) >= self.config.min_rest_duration)
            .unwrap_or(false)
    }

    fn complete_rest(&mut self, now: DateTime<Utc>) {
        self.state = RestState::Awake;
        self.fatigue = 0.0;
        self.last_rest = now;
        self.rest_entered_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatigue_accrues_only_while_awake() {
        let now = Utc::now();
        let mut ctrl = WakeRestController::new(now, RestConfig::default());
        ctrl.tick_awake(1.0);
        assert!((ctrl.fatigue() - 0.01).abs() < 1e-9);

        ctrl.rest(now);
        ctrl.tick_awake(1.0);
        assert!((ctrl.fatigue() - 0.01).abs() < 1e-9);
    }

    #[test]
    fn should_rest_requires_both_fatigue_and_minimum_wake_duration() {
        let now = Utc::now();
        let mut ctrl = WakeRestController::new(now, RestConfig::default());
        ctrl.fatigue = 0.9;
        assert!(!ctrl.should_rest(now + ChronoDuration::minutes(1)));
        assert!(ctrl.should_rest(now + ChronoDuration::minutes(31)));
    }

    #[test]
    fn explicit_rest_enters_dreaming_immediately() {
        let now = Utc::now();
        let mut ctrl = WakeRestController::new(now, RestConfig::default());
        ctrl.rest(now);
        assert_eq!(ctrl.state(), RestState::Dreaming);
    }

    #[test]
    fn wake_during_dreaming_before_half_rest_is_refused() {
        let now = Utc::now();
        let mut ctrl = WakeRestController::new(now, RestConfig::default());
        ctrl.rest(now);
        assert!(!ctrl.wake(now + ChronoDuration::minutes(1)));
        assert_eq!(ctrl.state(), RestState::Dreaming);
    }

    #[test]
    fn wake_during_dreaming_after_half_rest_succeeds_and_clears_fatigue() {
        let now = Utc::now();
        let mut ctrl = WakeRestController::new(now, RestConfig::default());
        ctrl.fatigue = 0.9;
        ctrl.rest(now);
        let later = now + ChronoDuration::minutes(3);
        assert!(ctrl.wake(later));
        assert_eq!(ctrl.state(), RestState::Awake);
        assert_eq!(ctrl.fatigue(), 0.0);
    }

    #[test]
    fn dream_duration_elapsed_after_min_rest_duration() {
        let now = Utc::now();
        let mut ctrl = WakeRestController::new(now, RestConfig::default());
        ctrl.rest(now);
        assert!(!ctrl.dream_duration_elapsed(now + ChronoDuration::minutes(1)));
        assert!(ctrl.dream_duration_elapsed(now + ChronoDuration::minutes(5)));
    }
}
