use crate::{ConfigError, NoeticConfig};

/// Cross-field invariants no single `#[serde(default)]` can express.
pub(crate) fn validate(config: &NoeticConfig) -> Result<(), ConfigError> {
    let t = &config.thought;
    if !(t.min_interval_ms <= t.base_interval_ms && t.base_interval_ms <= t.max_interval_ms) {
        return Err(ConfigError::Invalid(format!(
            "thought interval bounds out of order: min={} base={} max={}",
            t.min_interval_ms, t.base_interval_ms, t.max_interval_ms
        )));
    }

    if config.working_memory.capacity == 0 {
        return Err(ConfigError::Invalid(
            "working_memory.capacity must be at least 1".into(),
        ));
    }

    if !(0.0..=1.0).contains(&config.interest.decay_rate) {
        return Err(ConfigError::Invalid(
            "interest.decay_rate must be in [0, 1]".into(),
        ));
    }

    if !(0.0..=1.0).contains(&config.fatigue.rate) {
        return Err(ConfigError::Invalid(
            "fatigue.rate must be in [0, 1]".into(),
        ));
    }
    if !(0.0..=1.0).contains(&config.fatigue.rest_threshold) {
        return Err(ConfigError::Invalid(
            "fatigue.rest_threshold must be in [0, 1]".into(),
        ));
    }

    if config.event_bus.queue_size == 0 {
        return Err(ConfigError::Invalid(
            "event_bus.queue_size must be at least 1".into(),
        ));
    }

    Ok(())
}
