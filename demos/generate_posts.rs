//! Example: generate a batch of posts against a local Ollama server.
//!
//! Run with: `cargo run --example generate_posts -- '{"topic": "AI in marketing"}'`
//!
//! `OLLAMA_URL` (default `http://localhost:11434`) and `OLLAMA_MODEL`
//! (default `llama3.2:3b`) pick the endpoint and model. Set `RUST_LOG=debug`
//! to see the pipeline's stage transitions.

use anyhow::Context;
use post_pipeline::{generate_posts, Event, ExecCtx, FnEventHandler, PostPipeline};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let base_url = std::env::var("OLLAMA_URL").unwrap_or_else(|_| "http://localhost:11434".into());
    let model = std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.2:3b".into());

    let input: Value = match std::env::args().nth(1) {
        Some(arg) => serde_json::from_str(&arg).context("input must be a JSON object")?,
        None => json!({
            "topic": "AI in marketing",
            "tone": "Storytelling",
            "audience": "Founders",
            "postLength": "Short",
            "hashtagsOrKeywords": "#ai, #marketing",
            "numberOfPosts": 3
        }),
    };

    let ctx = ExecCtx::builder(base_url)
        .event_handler(Arc::new(FnEventHandler(|event: Event| {
            if let Event::StageEntered { stage, .. } = event {
                eprintln!("-> {}", stage);
            }
        })))
        .build()?;
    let pipeline = PostPipeline::new().with_model(model);

    let response = generate_posts(&pipeline, &ctx, &input).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    if let Some(posts) = response.posts() {
        for (i, post) in posts.iter().enumerate() {
            println!("\n--- Post {} ---\n{}", i + 1, post);
        }
    }
    Ok(())
}
