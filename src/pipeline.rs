//! The generation pipeline: one call from canonical request to posts.
//!
//! [`PostPipeline`] renders the prompt for a [`GenerationRequest`], invokes
//! the context's [`Backend`](crate::backend::Backend) with the "array of
//! strings" schema, checks the response against that contract, and hands the
//! posts back untouched. It holds configuration only, so one instance can
//! serve any number of concurrent calls.

use crate::{
    backend::LlmRequest,
    client::LlmConfig,
    error::{GenerationError, PipelineError, Result},
    events::{emit, Event, Stage},
    exec_ctx::ExecCtx,
    output_parser::{self, posts_schema},
    prompt::{self, DEFAULT_TEMPLATE},
    request::{validate, GenerationRequest},
};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "llama3.2:3b";

/// A successful generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    /// The posts, in the order and form the model produced them.
    pub posts: Vec<String>,
    /// Reasoning the model emitted before answering, if any.
    pub reasoning: Option<String>,
    /// Raw response text from the backend.
    pub raw_response: String,
    /// Model that produced the posts.
    pub model: String,
    /// Provider metadata (token counts, durations), if reported.
    pub metadata: Option<Value>,
}

impl GenerationResult {
    /// Drop the diagnostics and keep the posts.
    pub fn into_posts(self) -> Vec<String> {
        self.posts
    }
}

/// Drives a single post-generation call end to end.
///
/// # Example
///
/// ```
/// use post_pipeline::{ExecCtx, MockBackend, PostPipeline};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let ctx = ExecCtx::builder("http://unused")
///     .backend(Arc::new(MockBackend::fixed(r#"["One", "Two", "Three"]"#)))
///     .build()?;
///
/// let result = PostPipeline::new()
///     .run(&ctx, &json!({"topic": "AI in marketing"}))
///     .await?;
/// assert_eq!(result.posts, vec!["One", "Two", "Three"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PostPipeline {
    /// Instance name (for logging/events).
    name: String,
    /// Prompt template with `{field}` placeholders.
    template: String,
    /// Model identifier.
    model: String,
    /// Sampling configuration.
    config: LlmConfig,
}

impl Default for PostPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl PostPipeline {
    /// A pipeline with the default template, model and sampling config.
    pub fn new() -> Self {
        Self {
            name: "posts".to_string(),
            template: DEFAULT_TEMPLATE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            config: LlmConfig::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Set the instance name used in events and logs.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replace the prompt template.
    ///
    /// Available placeholders: `{topic}`, `{tone}`, `{audience}`,
    /// `{postLength}`, `{hashtagsOrKeywords}`, `{numberOfPosts}`.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the sampling configuration.
    pub fn with_config(mut self, config: LlmConfig) -> Self {
        self.config = config;
        self
    }

    /// Render the prompt for `request`. Same request, same bytes.
    pub fn render_prompt(&self, request: &GenerationRequest) -> String {
        prompt::render_request(&self.template, request)
    }

    /// Build the backend request: rendered prompt plus the declared schema.
    pub fn build_request(&self, request: &GenerationRequest) -> LlmRequest {
        LlmRequest {
            model: self.model.clone(),
            prompt: self.render_prompt(request),
            output_schema: Some(posts_schema(request.number_of_posts())),
            config: self.config.clone(),
        }
    }

    /// Validate raw input, then generate.
    ///
    /// Invalid input fails with [`PipelineError::Validation`] before the
    /// backend is touched.
    pub async fn run(&self, ctx: &ExecCtx, input: &Value) -> Result<GenerationResult> {
        self.start(ctx);
        self.enter(ctx, Stage::Validating);

        let request = match validate(input) {
            Ok(request) => request,
            Err(e) => return self.finish(ctx, Err(e.into())),
        };

        let result = self.drive(ctx, &request).await;
        self.finish(ctx, result)
    }

    /// Generate posts for an already validated request.
    ///
    /// Makes exactly one backend call. Any failure, including a response
    /// that is not an array of exactly `numberOfPosts` strings, is returned
    /// as [`PipelineError::Generation`].
    pub async fn generate(
        &self,
        ctx: &ExecCtx,
        request: &GenerationRequest,
    ) -> Result<GenerationResult> {
        self.start(ctx);
        let result = self.drive(ctx, request).await;
        self.finish(ctx, result)
    }

    async fn drive(&self, ctx: &ExecCtx, request: &GenerationRequest) -> Result<GenerationResult> {
        self.enter(ctx, Stage::Prompting);
        let llm_request = self.build_request(request);
        debug!(
            pipeline = %self.name,
            model = %self.model,
            backend = ctx.backend.name(),
            prompt_chars = llm_request.prompt.len(),
            "prompt rendered"
        );

        self.enter(ctx, Stage::AwaitingResponse);
        let response = ctx
            .backend
            .complete(&ctx.client, &ctx.base_url, &llm_request)
            .await
            .map_err(into_generation_error)?;

        let parsed = output_parser::parse_posts(&response.text).map_err(|e| {
            GenerationError::MalformedOutput {
                reason: e.to_string(),
            }
        })?;

        let expected = request.number_of_posts().as_usize();
        if parsed.posts.len() != expected {
            return Err(GenerationError::CountMismatch {
                expected,
                actual: parsed.posts.len(),
            }
            .into());
        }

        Ok(GenerationResult {
            posts: parsed.posts,
            reasoning: parsed.reasoning,
            raw_response: response.text,
            model: self.model.clone(),
            metadata: response.metadata,
        })
    }

    fn start(&self, ctx: &ExecCtx) {
        emit(
            &ctx.event_handler,
            Event::RunStart {
                name: self.name.clone(),
            },
        );
    }

    fn enter(&self, ctx: &ExecCtx, stage: Stage) {
        emit(
            &ctx.event_handler,
            Event::StageEntered {
                name: self.name.clone(),
                stage,
            },
        );
    }

    fn finish(&self, ctx: &ExecCtx, result: Result<GenerationResult>) -> Result<GenerationResult> {
        let posts = match &result {
            Ok(output) => {
                self.enter(ctx, Stage::Succeeded);
                info!(pipeline = %self.name, posts = output.posts.len(), "posts generated");
                output.posts.len()
            }
            Err(PipelineError::Validation(e)) => {
                self.enter(ctx, Stage::Failed);
                debug!(pipeline = %self.name, field = e.field(), "request rejected: {}", e);
                0
            }
            Err(e) => {
                self.enter(ctx, Stage::Failed);
                warn!(pipeline = %self.name, "generation failed: {}", e);
                0
            }
        };
        emit(
            &ctx.event_handler,
            Event::RunEnd {
                name: self.name.clone(),
                ok: result.is_ok(),
                posts,
            },
        );
        result
    }
}

/// Fold any backend failure into the generation error kind.
fn into_generation_error(err: PipelineError) -> PipelineError {
    match err {
        PipelineError::Generation(_) => err,
        other => GenerationError::Backend(other.to_string()).into(),
    }
}
