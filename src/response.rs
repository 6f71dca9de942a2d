//! The caller-facing response: `{"posts": [...]}` or `{"error": "..."}`.

use crate::{
    error::{PipelineError, Result},
    exec_ctx::ExecCtx,
    pipeline::{GenerationResult, PostPipeline},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

/// Exactly one of a batch of posts or a user-displayable error message.
///
/// # Example
///
/// ```
/// use post_pipeline::PostsResponse;
///
/// let ok = PostsResponse::Posts { posts: vec!["Hello".into()] };
/// assert_eq!(serde_json::to_string(&ok).unwrap(), r#"{"posts":["Hello"]}"#);
///
/// let err = PostsResponse::Error { error: "topic required".into() };
/// assert_eq!(serde_json::to_string(&err).unwrap(), r#"{"error":"topic required"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostsResponse {
    Posts { posts: Vec<String> },
    Error { error: String },
}

impl PostsResponse {
    pub fn is_ok(&self) -> bool {
        matches!(self, PostsResponse::Posts { .. })
    }

    /// The posts, if the call succeeded.
    pub fn posts(&self) -> Option<&[String]> {
        match self {
            PostsResponse::Posts { posts } => Some(posts),
            PostsResponse::Error { .. } => None,
        }
    }

    /// The error message, if the call failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            PostsResponse::Error { error } => Some(error),
            PostsResponse::Posts { .. } => None,
        }
    }
}

impl From<Result<GenerationResult>> for PostsResponse {
    fn from(result: Result<GenerationResult>) -> Self {
        match result {
            Ok(output) => PostsResponse::Posts {
                posts: output.into_posts(),
            },
            Err(err) => {
                if !matches!(err, PipelineError::Validation(_)) {
                    error!("Error generating posts: {:?}", err);
                }
                PostsResponse::Error {
                    error: err.user_message(),
                }
            }
        }
    }
}

/// Validate `input`, generate, and fold the outcome into a [`PostsResponse`].
///
/// Never fails: generation failures are logged with their full cause and
/// reported to the caller with a generic message.
///
/// # Example
///
/// ```
/// use post_pipeline::{generate_posts, ExecCtx, MockBackend, PostPipeline};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() {
/// let ctx = ExecCtx::builder("http://unused")
///     .backend(Arc::new(MockBackend::fixed(r#"["a", "b", "c"]"#)))
///     .build()
///     .unwrap();
///
/// let response = generate_posts(&PostPipeline::new(), &ctx, &json!({"topic": ""})).await;
/// assert_eq!(response.error(), Some("topic required"));
/// # }
/// ```
pub async fn generate_posts(pipeline: &PostPipeline, ctx: &ExecCtx, input: &Value) -> PostsResponse {
    pipeline.run(ctx, input).await.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::error::GENERIC_FAILURE_MESSAGE;
    use serde_json::json;
    use std::sync::Arc;

    fn ctx_with(mock: MockBackend) -> ExecCtx {
        ExecCtx::builder("http://unused")
            .backend(Arc::new(mock))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_success_shape() {
        let ctx = ctx_with(MockBackend::fixed(r#"["s1", "s2", "s3"]"#));
        let response = generate_posts(&PostPipeline::new(), &ctx, &json!({"topic": "AI in marketing"})).await;

        assert!(response.is_ok());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"posts": ["s1", "s2", "s3"]})
        );
    }

    #[tokio::test]
    async fn test_validation_error_shape() {
        let ctx = ctx_with(MockBackend::fixed("[]"));
        let response = generate_posts(
            &PostPipeline::new(),
            &ctx,
            &json!({"topic": "X", "numberOfPosts": 8}),
        )
        .await;

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"error": "numberOfPosts out of range"})
        );
        assert_eq!(response.posts(), None);
    }

    #[tokio::test]
    async fn test_generation_error_is_generic() {
        let ctx = ctx_with(MockBackend::fixed(r#""only one post""#));
        let response = generate_posts(&PostPipeline::new(), &ctx, &json!({"topic": "X"})).await;

        assert_eq!(response.error(), Some(GENERIC_FAILURE_MESSAGE));
        assert!(!response.error().unwrap().contains("malformed"));
    }

    #[tokio::test]
    async fn test_http_failure_hides_provider_body() {
        let ctx = ctx_with(MockBackend::failing(500, "secret stack trace"));
        let response = generate_posts(&PostPipeline::new(), &ctx, &json!({"topic": "X"})).await;

        assert_eq!(response.error(), Some(GENERIC_FAILURE_MESSAGE));
    }

    #[test]
    fn test_deserialize_either_shape() {
        let ok: PostsResponse = serde_json::from_str(r#"{"posts":["a"]}"#).unwrap();
        assert_eq!(ok.posts(), Some(&["a".to_string()][..]));

        let err: PostsResponse = serde_json::from_str(r#"{"error":"topic required"}"#).unwrap();
        assert_eq!(err.error(), Some("topic required"));
    }
}
