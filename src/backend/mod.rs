//! Backend trait and normalized request/response types.
//!
//! The [`Backend`] trait is the generation capability: it takes a prompt plus
//! a declared output schema and returns the model's text, or an error. It
//! translates between the normalized [`LlmRequest`]/[`LlmResponse`] types and
//! a provider-specific HTTP API.
//!
//! ```text
//! PostPipeline ──► LlmRequest ──► Backend::complete() ──► LlmResponse
//!                                        │
//!                              ┌─────────┴─────────┐
//!                         OllamaBackend        MockBackend
//!                        /api/generate         canned replies
//!                     format = JSON schema
//! ```

pub mod mock;
pub mod ollama;

pub use mock::{MockBackend, MockReply};
pub use ollama::OllamaBackend;

use crate::client::LlmConfig;
use crate::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// A normalized LLM request, provider-agnostic.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    /// Model identifier (e.g. `"llama3.2:3b"`).
    pub model: String,

    /// The rendered prompt.
    pub prompt: String,

    /// JSON Schema the response text must satisfy, if the caller declares one.
    ///
    /// Backends that support structured output forward it to the provider.
    pub output_schema: Option<Value>,

    /// Sampling configuration.
    pub config: LlmConfig,
}

/// A normalized LLM response.
#[derive(Debug)]
pub struct LlmResponse {
    /// The generated text content.
    pub text: String,

    /// HTTP status code (for diagnostics/logging).
    pub status: u16,

    /// Provider-specific metadata (token counts, timing, model info).
    /// Stored as raw JSON; each provider returns different fields.
    pub metadata: Option<Value>,
}

/// Abstraction over LLM providers.
///
/// A single non-streaming call: the whole response arrives at once or the
/// call fails. Implementations report failures as
/// [`GenerationError`](crate::error::GenerationError)s wrapped in
/// [`PipelineError::Generation`](crate::error::PipelineError::Generation).
///
/// # Object Safety
///
/// This trait is object-safe and designed to be used as `Arc<dyn Backend>`.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Execute one completion.
    async fn complete(
        &self,
        client: &Client,
        base_url: &str,
        request: &LlmRequest,
    ) -> Result<LlmResponse>;

    /// Human-readable name for logging and diagnostics.
    fn name(&self) -> &'static str;
}
