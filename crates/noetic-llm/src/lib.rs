//! The Thought Producer (spec section 6.1): an opaque text-generation
//! service. Grounded in `beagle_core::traits::LlmClient` /
//! `beagle-llm`'s multi-backend client shape (`complete`, `chat`),
//! generalized to the single `generate(prompt, options) -> text` contract
//! this core needs, with an HTTP backend over `reqwest` alongside a
//! deterministic mock (`beagle_core::context::MockLlmClient`'s pattern).

mod error;
mod http;
mod mock;

pub use error::LlmError;
pub use http::HttpThoughtProducer;
pub use mock::{MockThoughtProducer, UnavailableThoughtProducer};

use async_trait::async_trait;

/// Generation knobs (spec section 6.1). `max_tokens` in `[50,1000]`,
/// `temperature` in `[0,1.5]`, `top_p` in `[0,1]`.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub stop_sequences: Vec<String>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            max_tokens: 150,
            temperature: 0.7,
            top_p: 1.0,
            stop_sequences: Vec::new(),
        }
    }
}

/// A single chunk of a streamed response. `StreamEnd` terminates the
/// sequence; the core concatenates chunks before building a Thought.
#[derive(Debug, Clone)]
pub enum StreamChunk {
    Text(String),
    StreamEnd,
}

/// The capability set a concrete LLM backend must provide. `stream` is
/// optional (spec section 6.1: "Streaming variant (optional)"); the
/// default implementation synthesizes a one-shot stream from `generate`.
#[async_trait]
pub trait ThoughtProducer: Send + Sync {
    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> Result<String, LlmError>;

    async fn stream(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<Vec<StreamChunk>, LlmError> {
        let text = self.generate(prompt, options).await?;
        Ok(vec![StreamChunk::Text(text), StreamChunk::StreamEnd])
    }
}

/// Trims whitespace and truncates at the first stop sequence detected
/// (spec section 6.1). Shared by every backend so truncation semantics
/// stay identical regardless of transport.
pub fn finalize_text(raw: &str, stop_sequences: &[String]) -> String {
    let trimmed = raw.trim();
    let mut cut = trimmed.len();
    for stop in stop_sequences {
        if stop.is_empty() {
            continue;
        }
        if let Some(idx) = trimmed.find(stop.as_str()) {
            cut = cut.min(idx);
        }
    }
    trimmed[..cut].trim_end().to_string()
}
