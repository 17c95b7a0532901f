//! State-driven emission cadence (spec section 4.6): replaces a
//! fixed-interval timer with a load/fatigue/curiosity/focus-sensitive
//! interval, clamped to `[minI, maxI]`.

use std::time::Duration;

/// `I = clamp( base*(1+load)*(1+2*fatigue) / ((1+curiosity)*(1-0.5*focusDepth)), minI, maxI )`.
pub fn next_interval(
    base: Duration,
    min: Duration,
    max: Duration,
    load: f64,
    fatigue: f64,
    curiosity: f64,
    focus_depth: f64,
) -> Duration {
    let base_secs = base.as_secs_f64();
    let numerator = base_secs * (1.0 + load) * (1.0 + 2.0 * fatigue);
    let denominator = (1.0 + curiosity) * (1.0 - 0.5 * focus_depth);
    let raw = if denominator <= f64::EPSILON {
        max.as_secs_f64()
    } else {
        numerator / denominator
    };

    let clamped = raw.clamp(min.as_secs_f64(), max.as_secs_f64());
    Duration::from_secs_f64(clamped)
}
