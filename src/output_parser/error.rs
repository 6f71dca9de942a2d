//! Error types for the output contract check.

/// Ways a model response can fail the "array of strings" contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The response was empty or whitespace-only.
    #[error("empty LLM response")]
    EmptyResponse,

    /// The payload was not JSON at all.
    #[error("response is not valid JSON: {text}")]
    Unparseable {
        /// A truncated copy of the cleaned payload (max 200 chars).
        text: String,
    },

    /// The payload was JSON, but not an array.
    #[error("expected an array of strings, got {found}")]
    NotAnArray {
        /// JSON type name of the payload.
        found: &'static str,
    },

    /// An array element was not a string.
    #[error("expected a string at index {index}, got {found}")]
    NonStringItem {
        index: usize,
        /// JSON type name of the offending element.
        found: &'static str,
    },
}

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
pub(crate) fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &s[..cut]),
        None => s.to_string(),
    }
}
