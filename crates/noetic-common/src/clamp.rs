//! Scalar clamping helpers used throughout the cognitive state vector,
//! interest table and synthesis arithmetic. Centralized so the [0,1] and
//! [-1,1] ranges invoked by spec section 3 stay consistent everywhere.

/// Clamp `v` into `[0.0, 1.0]`.
pub fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

/// Clamp `v` into `[-1.0, 1.0]`, used for emotional valence.
pub fn clamp_signed(v: f64) -> f64 {
    v.clamp(-1.0, 1.0)
}
