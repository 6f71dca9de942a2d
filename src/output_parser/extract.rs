//! Transport-noise removal applied before the output contract is checked.
//!
//! Models wrap structured answers in reasoning blocks and markdown fences
//! even when asked not to. These helpers peel those layers off without
//! touching the payload inside.

const REASONING_TAGS: [(&str, &str); 2] = [("<think>", "</think>"), ("<thinking>", "</thinking>")];

/// Model output split into its reasoning and its answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Separated {
    /// Text of the leading reasoning blocks, joined by blank lines.
    pub reasoning: Option<String>,
    /// Everything after the reasoning blocks, trimmed.
    pub answer: String,
}

/// Split leading `<think>`/`<thinking>` blocks from the answer.
///
/// Only blocks that open the text count as reasoning; a tag further in is
/// part of the answer. An unclosed leading block swallows the rest of the
/// text, as a truncated reasoning run has no answer after it.
///
/// # Examples
///
/// ```
/// use post_pipeline::output_parser::extract::separate_reasoning;
///
/// let out = separate_reasoning("<think>plan it</think>[\"post\"]");
/// assert_eq!(out.reasoning.as_deref(), Some("plan it"));
/// assert_eq!(out.answer, "[\"post\"]");
/// ```
pub fn separate_reasoning(text: &str) -> Separated {
    let mut rest = text.trim_start();
    let mut reasoning = Vec::new();

    while let Some((open, close)) = REASONING_TAGS
        .iter()
        .find(|(open, _)| rest.starts_with(open))
    {
        let body = &rest[open.len()..];
        match body.find(close) {
            Some(end) => {
                let block = body[..end].trim();
                if !block.is_empty() {
                    reasoning.push(block.to_string());
                }
                rest = body[end + close.len()..].trim_start();
            }
            None => {
                rest = "";
                break;
            }
        }
    }

    Separated {
        reasoning: (!reasoning.is_empty()).then(|| reasoning.join("\n\n")),
        answer: rest.trim().to_string(),
    }
}

/// Body of a code fence that wraps the whole text, with its language hint.
///
/// The text must open with a fence line and end with a closing fence, so
/// backticks inside the body are left alone.
///
/// # Examples
///
/// ```
/// use post_pipeline::output_parser::extract::unwrap_fence;
///
/// let input = "```json\n[\"a\"]\n```";
/// assert_eq!(unwrap_fence(input), Some((Some("json"), "[\"a\"]")));
/// assert_eq!(unwrap_fence("Here:\n```json\n[\"a\"]\n```"), None);
/// ```
pub fn unwrap_fence(text: &str) -> Option<(Option<&str>, &str)> {
    let inner = text.trim().strip_prefix("```")?.strip_suffix("```")?;
    let line_end = inner.find('\n')?;
    let lang = inner[..line_end].trim();
    Some(((!lang.is_empty()).then_some(lang), inner[line_end + 1..].trim()))
}

/// The answer with leading reasoning removed and a wrapping code fence
/// unwrapped.
///
/// Returns `(reasoning, payload)`.
pub fn unwrap_answer(text: &str) -> (Option<String>, String) {
    let Separated { reasoning, answer } = separate_reasoning(text);
    let payload = match unwrap_fence(&answer) {
        Some((_, body)) => body.to_string(),
        None => answer,
    };
    (reasoning, payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reasoning_complete_block() {
        let out = separate_reasoning("<think>reasoning</think>result");
        assert_eq!(out.reasoning.as_deref(), Some("reasoning"));
        assert_eq!(out.answer, "result");
    }

    #[test]
    fn reasoning_unclosed_block() {
        let out = separate_reasoning("<think>reasoning without close");
        assert_eq!(out.reasoning, None);
        assert_eq!(out.answer, "");
    }

    #[test]
    fn reasoning_multiple_leading_blocks() {
        let out = separate_reasoning("<think>a</think>\n<thinking>b</thinking>end");
        assert_eq!(out.reasoning.as_deref(), Some("a\n\nb"));
        assert_eq!(out.answer, "end");
    }

    #[test]
    fn reasoning_tag_inside_answer_kept() {
        let out = separate_reasoning("<think>x</think>[\"Why I <think> first\"]");
        assert_eq!(out.reasoning.as_deref(), Some("x"));
        assert_eq!(out.answer, "[\"Why I <think> first\"]");

        let out = separate_reasoning("[\"Why I <think> first\"]");
        assert_eq!(out.reasoning, None);
        assert_eq!(out.answer, "[\"Why I <think> first\"]");
    }

    #[test]
    fn reasoning_empty_block_dropped() {
        let out = separate_reasoning("<think>  </think>  actual content ");
        assert_eq!(out.reasoning, None);
        assert_eq!(out.answer, "actual content");
    }

    #[test]
    fn fence_bare() {
        let input = "```\n[\"a\"]\n```";
        assert_eq!(unwrap_fence(input), Some((None, "[\"a\"]")));
    }

    #[test]
    fn fence_missing_or_partial() {
        assert!(unwrap_fence("no code blocks here").is_none());
        assert!(unwrap_fence("```json\n[\"unterminated\"]").is_none());
        assert!(unwrap_fence("[\"uses ``` inline\"]").is_none());
    }

    #[test]
    fn fence_keeps_inner_backticks() {
        let input = "```json\n[\n  \"open with ```rust\",\n  \"close with ```\"\n]\n```";
        let (lang, body) = unwrap_fence(input).unwrap();
        assert_eq!(lang, Some("json"));
        assert_eq!(body, "[\n  \"open with ```rust\",\n  \"close with ```\"\n]");
    }

    #[test]
    fn unwrap_answer_peels_both_layers() {
        let (reasoning, payload) =
            unwrap_answer("<think>draft three</think>\n```json\n[\"a\", \"b\"]\n```\n");
        assert_eq!(reasoning.as_deref(), Some("draft three"));
        assert_eq!(payload, "[\"a\", \"b\"]");
    }

    #[test]
    fn unwrap_answer_plain_payload() {
        let (reasoning, payload) = unwrap_answer("  [\"a\"]  ");
        assert_eq!(reasoning, None);
        assert_eq!(payload, "[\"a\"]");
    }
}
