use thiserror::Error;

/// Configuration failures are always Fatal (spec section 7): they can only
/// occur at startup, and the core refuses to start rather than run against
/// a broken or self-contradictory config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed configuration document: {0}")]
    Malformed(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn is_fatal(&self) -> bool {
        true
    }
}
