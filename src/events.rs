//! Event system for pipeline lifecycle hooks.
//!
//! Provides an optional, non-intrusive way to observe a generation call.
//! Each call walks `Validating → Prompting → AwaitingResponse` and ends in
//! `Succeeded` or `Failed`; the pipeline emits an event on every transition.
//! Implement [`EventHandler`] to receive them for progress indicators or
//! custom logging.

use std::fmt;
use std::sync::Arc;

/// Per-call pipeline state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Raw input is being turned into a canonical request.
    Validating,
    /// The prompt is being rendered.
    Prompting,
    /// The generation capability has been called and has not answered yet.
    AwaitingResponse,
    /// Terminal: the batch of posts was returned.
    Succeeded,
    /// Terminal: the call failed.
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Validating => "validating",
            Stage::Prompting => "prompting",
            Stage::AwaitingResponse => "awaiting-response",
            Stage::Succeeded => "succeeded",
            Stage::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Events emitted during a generation call.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A call has started.
    RunStart {
        /// Instance name of the pipeline.
        name: String,
    },
    /// The call moved to a new stage.
    StageEntered {
        /// Instance name of the pipeline.
        name: String,
        stage: Stage,
    },
    /// A call has finished.
    RunEnd {
        /// Instance name of the pipeline.
        name: String,
        /// Whether the call succeeded.
        ok: bool,
        /// Number of posts returned (0 on failure).
        posts: usize,
    },
}

/// Handler for pipeline lifecycle events.
///
/// This is entirely optional -- the pipeline works without an event handler.
///
/// # Example
///
/// ```
/// use post_pipeline::events::{Event, EventHandler};
///
/// struct PrintHandler;
///
/// impl EventHandler for PrintHandler {
///     fn on_event(&self, event: Event) {
///         match event {
///             Event::StageEntered { name, stage } => println!("[{}] {}", name, stage),
///             Event::RunEnd { name, ok, posts } => println!("[{}] ok={} posts={}", name, ok, posts),
///             Event::RunStart { .. } => {}
///         }
///     }
/// }
/// ```
pub trait EventHandler: Send + Sync {
    /// Called when the pipeline emits an event.
    fn on_event(&self, event: Event);
}

/// Emit an event if a handler is present. No-op otherwise.
pub(crate) fn emit(handler: &Option<Arc<dyn EventHandler>>, event: Event) {
    if let Some(ref h) = handler {
        h.on_event(event);
    }
}

/// An [`EventHandler`] backed by a closure.
///
/// # Example
///
/// ```
/// use post_pipeline::events::{Event, FnEventHandler};
/// use std::sync::Arc;
///
/// let handler = Arc::new(FnEventHandler(|event: Event| {
///     if let Event::RunEnd { ok, .. } = event {
///         println!("finished, ok = {}", ok);
///     }
/// }));
/// ```
pub struct FnEventHandler<F: Fn(Event) + Send + Sync>(pub F);

impl<F: Fn(Event) + Send + Sync> EventHandler for FnEventHandler<F> {
    fn on_event(&self, event: Event) {
        (self.0)(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_emit_without_handler_is_noop() {
        emit(&None, Event::RunStart { name: "x".into() });
    }

    #[test]
    fn test_fn_handler_receives_events() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let handler: Arc<dyn EventHandler> =
            Arc::new(FnEventHandler(move |e: Event| sink.lock().unwrap().push(e)));

        emit(
            &Some(handler),
            Event::StageEntered {
                name: "posts".into(),
                stage: Stage::Prompting,
            },
        );

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![Event::StageEntered {
                name: "posts".into(),
                stage: Stage::Prompting
            }]
        );
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Validating.to_string(), "validating");
        assert_eq!(Stage::AwaitingResponse.to_string(), "awaiting-response");
    }
}
