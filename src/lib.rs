//! # Post Pipeline
//!
//! Validated request pipeline for generating batches of short-form social
//! posts with an LLM.
//!
//! A call takes a raw, loosely-typed input (a `serde_json::Value` straight
//! from a form or an HTTP body), normalizes it into a [`GenerationRequest`],
//! renders a deterministic prompt, asks the model for a JSON array of exactly
//! `numberOfPosts` strings, and checks the answer before handing it back.
//!
//! ## Core Concepts
//!
//! - **[`validate`]**: turns raw input into a [`GenerationRequest`] or the
//!   first [`ValidationError`], with defaults applied.
//! - **[`ExecCtx`]**: shared execution context (HTTP client, endpoint,
//!   backend, optional event handler).
//! - **[`PostPipeline`]**: renders the prompt, makes exactly one backend
//!   call, and enforces the "array of strings" contract.
//! - **[`Backend`](backend::Backend)**: the generation capability.
//!   [`OllamaBackend`] talks to a local model; [`MockBackend`] is for tests.
//! - **[`PostsResponse`]**: the caller-facing `{posts}` / `{error}` shape.
//!
//! ## Quick Start
//!
//! ```no_run
//! use post_pipeline::{generate_posts, ExecCtx, PostPipeline};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ctx = ExecCtx::builder("http://localhost:11434").build()?;
//!     let pipeline = PostPipeline::new().with_model("llama3.2:3b");
//!
//!     let response = generate_posts(
//!         &pipeline,
//!         &ctx,
//!         &json!({
//!             "topic": "AI in marketing",
//!             "tone": "Casual",
//!             "audience": "Founders",
//!             "numberOfPosts": 2
//!         }),
//!     )
//!     .await;
//!
//!     println!("{}", serde_json::to_string_pretty(&response)?);
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod client;
pub mod error;
pub mod events;
pub mod exec_ctx;
pub mod output_parser;
pub mod pipeline;
pub mod prompt;
pub mod request;
pub mod response;

pub use backend::{MockBackend, MockReply, OllamaBackend};
pub use client::LlmConfig;
pub use error::{GenerationError, PipelineError, Result, ValidationError};
pub use events::{Event, EventHandler, FnEventHandler, Stage};
pub use exec_ctx::{ExecCtx, ExecCtxBuilder};
pub use pipeline::{GenerationResult, PostPipeline};
pub use request::{validate, Audience, GenerationRequest, PostCount, PostLength, Tone};
pub use response::{generate_posts, PostsResponse};
