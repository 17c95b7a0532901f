//! A `reqwest`-backed HTTP Thought Producer. Grounded in `beagle-llm`'s
//! HTTP client backends (`clients/claude.rs`, `clients/deepseek.rs`): a
//! thin JSON request/response shape over a configurable endpoint, with the
//! timeout spec section 6.5's `llm.timeoutMs` enforces applied per call.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{finalize_text, GenerateOptions, LlmError, ThoughtProducer};

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    prompt: &'a str,
    max_tokens: u32,
    temperature: f64,
    top_p: f64,
    stop: &'a [String],
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    text: String,
}

/// Talks to an opaque HTTP text-generation endpoint. The endpoint is
/// injected by the caller at `start()` (spec section 6.5: "There are no
/// required environment variables; any collaborator endpoints are
/// injected by the caller").
pub struct HttpThoughtProducer {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpThoughtProducer {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            timeout,
        }
    }
}

#[async_trait]
impl ThoughtProducer for HttpThoughtProducer {
    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> Result<String, LlmError> {
        if prompt.trim().is_empty() {
            return Err(LlmError::InvalidPrompt("prompt is empty".into()));
        }

        let request = CompletionRequest {
            prompt,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            top_p: options.top_p,
            stop: &options.stop_sequences,
        };

        let response = tokio::time::timeout(
            self.timeout,
            self.client.post(&self.endpoint).json(&request).send(),
        )
        .await
        .map_err(|_| LlmError::Timeout(self.timeout))?
        .map_err(|e| LlmError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(LlmError::Unavailable(format!(
                "backend returned status {}",
                response.status()
            )));
        }

        let body: CompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Unavailable(e.to_string()))?;

        Ok(finalize_text(&body.text, &options.stop_sequences))
    }
}
