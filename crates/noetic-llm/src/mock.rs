//! Deterministic mocks for tests and for exercising the fallback path
//! without a real backend. Grounded in
//! `beagle-llm::clients::mock::MockLlmClient`.

use async_trait::async_trait;

use crate::{finalize_text, GenerateOptions, LlmError, ThoughtProducer};

/// Echoes a deterministic transform of the prompt. Useful for tests that
/// need a producer that always succeeds.
pub struct MockThoughtProducer;

#[async_trait]
impl ThoughtProducer for MockThoughtProducer {
    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> Result<String, LlmError> {
        let text = format!("MOCK_THOUGHT: {}", prompt.chars().take(40).collect::<String>());
        Ok(finalize_text(&text, &options.stop_sequences))
    }
}

/// Always fails with `Unavailable`, for exercising the Thought Generation
/// Controller's fallback-template path (spec section 6.1, scenarios 1 and
/// 2 in spec section 8).
pub struct UnavailableThoughtProducer;

#[async_trait]
impl ThoughtProducer for UnavailableThoughtProducer {
    async fn generate(&self, _prompt: &str, _options: &GenerateOptions) -> Result<String, LlmError> {
        Err(LlmError::Unavailable("no backend configured".into()))
    }
}
