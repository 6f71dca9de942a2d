//! Backend for Ollama's native API.
//!
//! [`OllamaBackend`] translates normalized [`LlmRequest`]s into a
//! non-streaming `/api/generate` call. A declared output schema is sent as
//! the `format` field, which constrains the model to structured output.

use super::{Backend, LlmRequest, LlmResponse};
use crate::error::{GenerationError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

/// Backend for Ollama's native API.
///
/// Endpoint: `/api/generate` with `"stream": false`.
///
/// This is the default backend: `ExecCtx::builder("url").build()` uses it
/// unless another backend is set.
#[derive(Debug, Clone)]
pub struct OllamaBackend;

impl OllamaBackend {
    /// Build the Ollama `options` object from the LlmConfig.
    fn build_options(request: &LlmRequest) -> Value {
        let mut opts = json!({
            "temperature": request.config.temperature,
            "num_predict": request.config.max_tokens,
        });
        if let Some(ref custom) = request.config.options {
            if let (Some(base), Some(extra)) = (opts.as_object_mut(), custom.as_object()) {
                for (k, v) in extra {
                    base.insert(k.clone(), v.clone());
                }
            }
        }
        opts
    }

    /// Build the JSON body for `/api/generate`.
    fn build_generate_body(request: &LlmRequest) -> Value {
        let mut body = json!({
            "model": request.model,
            "prompt": request.prompt,
            "stream": false,
            "options": Self::build_options(request),
        });
        if let Some(ref schema) = request.output_schema {
            body["format"] = schema.clone();
        }
        body
    }

    /// Send a non-streaming request and parse the response envelope.
    async fn send_request(client: &Client, url: &str, body: &Value) -> Result<(Value, u16)> {
        let resp = client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(GenerationError::Request)?;

        let status = resp.status().as_u16();

        if !resp.status().is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(GenerationError::Http { status, body: text }.into());
        }

        let json_resp: Value = resp.json().await.map_err(GenerationError::Request)?;
        Ok((json_resp, status))
    }

    /// Pull the generated text out of an `/api/generate` response.
    fn extract_text(json_resp: &Value) -> Result<String> {
        json_resp
            .get("response")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                GenerationError::MalformedOutput {
                    reason: "Ollama response has no 'response' text field".into(),
                }
                .into()
            })
    }

    /// Extract metadata fields from an Ollama response.
    fn extract_metadata(json_resp: &Value) -> Option<Value> {
        let mut meta = serde_json::Map::new();
        for key in [
            "total_duration",
            "eval_count",
            "eval_duration",
            "prompt_eval_count",
            "model",
        ] {
            if let Some(v) = json_resp.get(key) {
                meta.insert(key.into(), v.clone());
            }
        }
        if meta.is_empty() {
            None
        } else {
            Some(Value::Object(meta))
        }
    }
}

#[async_trait]
impl Backend for OllamaBackend {
    async fn complete(
        &self,
        client: &Client,
        base_url: &str,
        request: &LlmRequest,
    ) -> Result<LlmResponse> {
        let url = format!("{}/api/generate", base_url.trim_end_matches('/'));
        let body = Self::build_generate_body(request);
        let (json_resp, status) = Self::send_request(client, &url, &body).await?;

        Ok(LlmResponse {
            text: Self::extract_text(&json_resp)?,
            status,
            metadata: Self::extract_metadata(&json_resp),
        })
    }

    fn name(&self) -> &'static str {
        "ollama"
    }
}
