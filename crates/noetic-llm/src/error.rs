//! Error taxonomy for the Thought Producer (spec section 6.1).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("thought producer unavailable: {0}")]
    Unavailable(String),

    #[error("thought producer timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("invalid prompt: {0}")]
    InvalidPrompt(String),
}

impl LlmError {
    /// All three documented failure modes fall back to the same templated
    /// path (spec section 6.1: "errors: Unavailable ..., Timeout (same),
    /// InvalidPrompt (logged, treated as Unavailable)"). The Thought
    /// Generation Controller calls this rather than matching variants.
    pub fn triggers_fallback(&self) -> bool {
        true
    }
}
