//! Provider trait — the abstraction over the generative-language backend.
//!
//! A Provider takes a fully rendered prompt and returns the model's text:
//! single prompt in, completion out, no conversation state. The production
//! implementation lives in `askbot-providers`; tests use mocks.

use crate::error::ProviderError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single-shot completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The model to use (e.g. "gemini-1.5-flash-latest").
    pub model: String,

    /// The fully rendered prompt text.
    pub prompt: String,
}

/// A complete response from a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// The generated text. May be empty — callers decide what an empty
    /// completion means.
    pub text: String,

    /// Which model actually responded.
    pub model: String,
}

/// The core Provider trait.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "gemini").
    fn name(&self) -> &str;

    /// Send a prompt and get the completion text back.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<CompletionResponse, ProviderError>;
}
