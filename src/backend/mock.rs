//! Mock backend for testing without a live LLM.
//!
//! [`MockBackend`] returns pre-configured replies in order and records every
//! request it receives, allowing downstream consumers to write deterministic
//! tests against this crate.
//!
//! # Example
//!
//! ```
//! use post_pipeline::backend::MockBackend;
//!
//! let mock = MockBackend::fixed(r#"["First post", "Second post"]"#);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Client;

use super::{Backend, LlmRequest, LlmResponse};
use crate::error::{GenerationError, Result};

/// One scripted outcome of a [`MockBackend`] call.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Succeed with this response text.
    Text(String),
    /// Fail as if the provider answered with a non-success status.
    Http { status: u16, body: String },
    /// Fail with a backend error carrying this message.
    Fail(String),
}

impl From<&str> for MockReply {
    fn from(text: &str) -> Self {
        MockReply::Text(text.to_string())
    }
}

impl From<String> for MockReply {
    fn from(text: String) -> Self {
        MockReply::Text(text)
    }
}

/// A test backend that returns canned replies in order.
///
/// Cycles back to the beginning when all replies have been consumed.
#[derive(Debug)]
pub struct MockBackend {
    replies: Vec<MockReply>,
    index: AtomicUsize,
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockBackend {
    /// Create a mock backend with the given canned replies.
    ///
    /// Replies are returned in order. When exhausted, cycles from the beginning.
    pub fn new(replies: Vec<MockReply>) -> Self {
        assert!(!replies.is_empty(), "MockBackend requires at least one reply");
        Self {
            replies,
            index: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that always returns the same response text.
    pub fn fixed(response: impl Into<String>) -> Self {
        Self::new(vec![MockReply::Text(response.into())])
    }

    /// Create a mock that always fails with the given HTTP status.
    pub fn failing(status: u16, body: impl Into<String>) -> Self {
        Self::new(vec![MockReply::Http {
            status,
            body: body.into(),
        }])
    }

    /// Number of calls made so far.
    pub fn calls(&self) -> usize {
        self.index.load(Ordering::Relaxed)
    }

    /// Copies of every request received, oldest first.
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn next_reply(&self) -> MockReply {
        let idx = self.index.fetch_add(1, Ordering::Relaxed) % self.replies.len();
        self.replies[idx].clone()
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn complete(
        &self,
        _client: &Client,
        _base_url: &str,
        request: &LlmRequest,
    ) -> Result<LlmResponse> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());

        match self.next_reply() {
            MockReply::Text(text) => Ok(LlmResponse {
                text,
                status: 200,
                metadata: Default::default(),
            }),
            MockReply::Http { status, body } => Err(GenerationError::Http { status, body }.into()),
            MockReply::Fail(message) => Err(GenerationError::Backend(message).into()),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::LlmConfig;
    use crate::error::PipelineError;

    fn test_request(prompt: &str) -> LlmRequest {
        LlmRequest {
            model: "test".to_string(),
            prompt: prompt.to_string(),
            output_schema: None,
            config: LlmConfig::default(),
        }
    }

    #[tokio::test]
    async fn test_mock_fixed_response() {
        let mock = MockBackend::fixed("Hello!");
        let client = Client::new();
        let resp = mock
            .complete(&client, "http://unused", &test_request("p"))
            .await
            .unwrap();
        assert_eq!(resp.text, "Hello!");
        assert_eq!(resp.status, 200);
    }

    #[tokio::test]
    async fn test_mock_cycles_replies() {
        let mock = MockBackend::new(vec!["first".into(), "second".into()]);
        let client = Client::new();
        let request = test_request("p");
        let r1 = mock.complete(&client, "http://unused", &request).await.unwrap();
        let r2 = mock.complete(&client, "http://unused", &request).await.unwrap();
        let r3 = mock.complete(&client, "http://unused", &request).await.unwrap();
        assert_eq!(r1.text, "first");
        assert_eq!(r2.text, "second");
        assert_eq!(r3.text, "first"); // cycles
        assert_eq!(mock.calls(), 3);
    }

    #[tokio::test]
    async fn test_mock_scripted_failures() {
        let mock = MockBackend::new(vec![
            MockReply::Http {
                status: 503,
                body: "busy".into(),
            },
            MockReply::Fail("socket closed".into()),
        ]);
        let client = Client::new();
        let request = test_request("p");

        let err = mock.complete(&client, "http://unused", &request).await.unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Generation(GenerationError::Http { status: 503, .. })
        ));
        let err = mock.complete(&client, "http://unused", &request).await.unwrap_err();
        assert!(matches!(err, PipelineError::Generation(GenerationError::Backend(_))));
    }

    #[tokio::test]
    async fn test_mock_records_requests() {
        let mock = MockBackend::failing(500, "down");
        let client = Client::new();
        let _ = mock.complete(&client, "http://unused", &test_request("one")).await;
        let _ = mock.complete(&client, "http://unused", &test_request("two")).await;
        let prompts: Vec<String> = mock.requests().into_iter().map(|r| r.prompt).collect();
        assert_eq!(prompts, vec!["one", "two"]);
    }
}
