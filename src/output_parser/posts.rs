//! The "array of strings" output contract.
//!
//! [`posts_schema`] declares the contract to the generation capability;
//! [`parse_posts`] checks a response against it. Elements are returned
//! exactly as the model wrote them.

use serde_json::{json, Value};

use crate::output_parser::error::{truncate, ParseError};
use crate::output_parser::extract::unwrap_answer;
use crate::request::PostCount;

/// A response that satisfied the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPosts {
    /// Array elements in response order, untouched.
    pub posts: Vec<String>,
    /// Reasoning the model emitted before its answer, if any.
    pub reasoning: Option<String>,
}

/// JSON Schema for an array of exactly `count` strings.
///
/// # Examples
///
/// ```
/// use post_pipeline::output_parser::posts_schema;
/// use post_pipeline::request::PostCount;
///
/// let schema = posts_schema(PostCount::new(2).unwrap());
/// assert_eq!(schema["type"], "array");
/// assert_eq!(schema["minItems"], 2);
/// ```
pub fn posts_schema(count: PostCount) -> Value {
    json!({
        "type": "array",
        "items": { "type": "string" },
        "minItems": count.get(),
        "maxItems": count.get(),
    })
}

/// Check a raw model response against the "array of strings" contract.
///
/// The response is parsed as JSON first. Only if that fails are leading
/// reasoning blocks and a wrapping code fence removed before a second
/// attempt. The payload must be a JSON array whose every element is a
/// string. No repair is attempted.
///
/// # Examples
///
/// ```
/// use post_pipeline::output_parser::parse_posts;
///
/// let parsed = parse_posts("```json\n[\"One\", \"Two \"]\n```").unwrap();
/// assert_eq!(parsed.posts, vec!["One", "Two "]);
///
/// assert!(parse_posts("\"just one post\"").is_err());
/// ```
pub fn parse_posts(response: &str) -> Result<ParsedPosts, ParseError> {
    let trimmed = response.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyResponse);
    }

    let (value, reasoning) = match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => (value, None),
        Err(_) => {
            let (reasoning, payload) = unwrap_answer(trimmed);
            if payload.is_empty() {
                return Err(ParseError::EmptyResponse);
            }
            let value = serde_json::from_str::<Value>(&payload).map_err(|_| {
                ParseError::Unparseable {
                    text: truncate(&payload, 200),
                }
            })?;
            (value, reasoning)
        }
    };

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(ParseError::NotAnArray {
                found: json_type(&other),
            })
        }
    };

    let posts = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(s) => Ok(s),
            other => Err(ParseError::NonStringItem {
                index,
                found: json_type(&other),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ParsedPosts { posts, reasoning })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_array() {
        let parsed = parse_posts(r#"["a", "b", "c"]"#).unwrap();
        assert_eq!(parsed.posts, vec!["a", "b", "c"]);
        assert_eq!(parsed.reasoning, None);
    }

    #[test]
    fn elements_untouched() {
        let parsed = parse_posts(r#"["  padded  ", "dup", "dup", ""]"#).unwrap();
        assert_eq!(parsed.posts, vec!["  padded  ", "dup", "dup", ""]);
    }

    #[test]
    fn posts_containing_code_fences() {
        let response = "[\n  \"Tip: wrap snippets in ```rust fences\",\n  \"Close them with ``` too\",\n  \"Third post\"\n]";
        let parsed = parse_posts(response).unwrap();
        assert_eq!(
            parsed.posts,
            vec![
                "Tip: wrap snippets in ```rust fences",
                "Close them with ``` too",
                "Third post"
            ]
        );

        let fenced = format!("```json\n{}\n```", response);
        assert_eq!(parse_posts(&fenced).unwrap().posts.len(), 3);
    }

    #[test]
    fn posts_containing_think_tags() {
        let parsed = parse_posts(r#"["Why I <think> before I ship", "b", "c"]"#).unwrap();
        assert_eq!(parsed.posts, vec!["Why I <think> before I ship", "b", "c"]);
        assert_eq!(parsed.reasoning, None);

        let parsed = parse_posts(r#"<think>plan</think>["Why I <think> before I ship"]"#).unwrap();
        assert_eq!(parsed.posts, vec!["Why I <think> before I ship"]);
        assert_eq!(parsed.reasoning.as_deref(), Some("plan"));
    }

    #[test]
    fn think_then_fenced_array() {
        let parsed = parse_posts("<think>three angles</think>\n```json\n[\"x\"]\n```").unwrap();
        assert_eq!(parsed.posts, vec!["x"]);
        assert_eq!(parsed.reasoning.as_deref(), Some("three angles"));
    }

    #[test]
    fn empty_responses() {
        assert_eq!(parse_posts(""), Err(ParseError::EmptyResponse));
        assert_eq!(parse_posts("   \n"), Err(ParseError::EmptyResponse));
        assert_eq!(parse_posts("<think>only thoughts</think>"), Err(ParseError::EmptyResponse));
    }

    #[test]
    fn single_string_rejected() {
        assert_eq!(
            parse_posts(r#""one post""#),
            Err(ParseError::NotAnArray { found: "string" })
        );
        assert!(matches!(
            parse_posts("Here is one post about AI."),
            Err(ParseError::Unparseable { .. })
        ));
    }

    #[test]
    fn wrapped_object_rejected() {
        assert_eq!(
            parse_posts(r#"{"posts": ["a", "b"]}"#),
            Err(ParseError::NotAnArray { found: "object" })
        );
        assert_eq!(parse_posts("null"), Err(ParseError::NotAnArray { found: "null" }));
    }

    #[test]
    fn non_string_element_rejected() {
        assert_eq!(
            parse_posts(r#"["a", 2, "c"]"#),
            Err(ParseError::NonStringItem {
                index: 1,
                found: "number"
            })
        );
        assert_eq!(
            parse_posts(r#"["a", null]"#),
            Err(ParseError::NonStringItem {
                index: 1,
                found: "null"
            })
        );
    }

    #[test]
    fn broken_json_not_repaired() {
        assert!(matches!(
            parse_posts(r#"["a", "b",]"#),
            Err(ParseError::Unparseable { .. })
        ));
    }

    #[test]
    fn schema_bounds_follow_count() {
        let schema = posts_schema(PostCount::new(5).unwrap());
        assert_eq!(schema["items"]["type"], "string");
        assert_eq!(schema["minItems"], 5);
        assert_eq!(schema["maxItems"], 5);
    }
}
