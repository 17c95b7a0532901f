//! Error-kind taxonomy (spec section 7): Transient, Invariant violation,
//! Fatal. Every crate that can fail maps its own error enum onto this
//! classification so the scheduler can treat handler errors uniformly.

use thiserror::Error;

/// Coarse classification of a failure, independent of which subsystem
/// raised it. The scheduler and engines branch on this, never on the
/// concrete error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Retried or degraded automatically; logged at warn, never stops the core.
    Transient,
    /// Corrected locally (clamp, drop); emits a DegradedIntegration event.
    InvariantViolation,
    /// Only raised at startup; refuses to start.
    Fatal,
}

/// Generic error type for cross-crate glue code that doesn't warrant its
/// own `thiserror` enum. Subsystem-specific crates (noetic-hypergraph,
/// noetic-llm, ...) define their own richer error enums and implement
/// `classify` analogously.
#[derive(Debug, Error)]
pub enum NoeticError {
    #[error("transient failure: {0}")]
    Transient(String),

    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("fatal startup error: {0}")]
    Fatal(String),
}

impl NoeticError {
    pub fn classify(&self) -> ErrorKind {
        match self {
            NoeticError::Transient(_) => ErrorKind::Transient,
            NoeticError::InvariantViolation(_) => ErrorKind::InvariantViolation,
            NoeticError::Fatal(_) => ErrorKind::Fatal,
        }
    }

    pub fn is_transient(&self) -> bool {
        self.classify() == ErrorKind::Transient
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_variants() {
        assert_eq!(
            NoeticError::Transient("x".into()).classify(),
            ErrorKind::Transient
        );
        assert_eq!(
            NoeticError::InvariantViolation("x".into()).classify(),
            ErrorKind::InvariantViolation
        );
        assert_eq!(NoeticError::Fatal("x".into()).classify(), ErrorKind::Fatal);
    }
}
