//! Prompt rendering for generation requests.
//!
//! Templates use `{name}` placeholders; `{{` and `}}` insert literal braces.
//! Rendering is a single left-to-right pass, so text substituted from a
//! request is never scanned for placeholders again.

use crate::request::GenerationRequest;

/// Rendered in place of an optional field the request leaves unset.
pub const UNSPECIFIED: &str = "Not specified";

/// Default template for a batch of posts.
pub const DEFAULT_TEMPLATE: &str = "\
You are a LinkedIn post expert. Generate {numberOfPosts} LinkedIn posts based on the following criteria:

Topic: {topic}
Tone: {tone}
Audience: {audience}
Post Length: {postLength}
Hashtags/Keywords: {hashtagsOrKeywords}

Ensure each post is engaging and tailored to the specified criteria. \
Respond with a JSON array of exactly {numberOfPosts} distinct strings, \
one complete post per element, and nothing else.
";

/// Build a prompt string with variable substitution.
///
/// Placeholders without a matching variable are left as written.
///
/// # Example
///
/// ```
/// use post_pipeline::prompt::render;
///
/// let result = render("Hello {name}, JSON: {{\"key\": \"{value}\"}}", &[("name", "Alice"), ("value", "{name}")]);
/// assert_eq!(result, r#"Hello Alice, JSON: {"key": "{name}"}"#);
/// ```
pub fn render<K, V>(template: &str, vars: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(idx) = rest.find(|c| c == '{' || c == '}') {
        rendered.push_str(&rest[..idx]);
        let tail = &rest[idx..];

        if tail.starts_with("{{") {
            rendered.push('{');
            rest = &tail[2..];
            continue;
        }
        if tail.starts_with("}}") {
            rendered.push('}');
            rest = &tail[2..];
            continue;
        }
        if tail.starts_with('{') {
            if let Some(end) = tail.find('}') {
                let key = &tail[1..end];
                if let Some((_, value)) = vars.iter().find(|(k, _)| k.as_ref() == key) {
                    rendered.push_str(value.as_ref());
                    rest = &tail[end + 1..];
                    continue;
                }
            }
        }

        // Lone brace or unknown placeholder: copy one char and move on.
        rendered.push_str(&tail[..1]);
        rest = &tail[1..];
    }

    rendered.push_str(rest);
    rendered
}

/// Template variables for a request, keyed by their wire names.
pub fn request_vars(request: &GenerationRequest) -> Vec<(&'static str, String)> {
    vec![
        ("topic", request.topic().to_string()),
        ("tone", request.tone().to_string()),
        (
            "audience",
            request
                .audience()
                .map_or_else(|| UNSPECIFIED.to_string(), |a| a.to_string()),
        ),
        ("postLength", request.post_length().to_string()),
        (
            "hashtagsOrKeywords",
            request
                .hashtags_or_keywords()
                .unwrap_or(UNSPECIFIED)
                .to_string(),
        ),
        ("numberOfPosts", request.number_of_posts().to_string()),
    ]
}

/// Render `template` against a request.
pub fn render_request(template: &str, request: &GenerationRequest) -> String {
    render(template, &request_vars(request))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{Audience, PostLength, Tone};

    #[test]
    fn test_render_basic() {
        let result = render("Hello {name}, process {input}", &[("name", "Alice"), ("input", "data")]);
        assert_eq!(result, "Hello Alice, process data");
    }

    #[test]
    fn test_render_no_placeholders() {
        let result = render::<&str, &str>("static prompt", &[]);
        assert_eq!(result, "static prompt");
    }

    #[test]
    fn test_render_unknown_placeholder_kept() {
        let result = render("Keep {unknown} and {name}", &[("name", "x")]);
        assert_eq!(result, "Keep {unknown} and x");
    }

    #[test]
    fn test_render_escaped_braces_no_substitution() {
        let result = render::<&str, &str>("Output format: {{\"result\": {{\"value\": 42}}}}", &[]);
        assert_eq!(result, r#"Output format: {"result": {"value": 42}}"#);
    }

    #[test]
    fn test_render_lone_braces() {
        let result = render("a } b { c {name", &[("name", "x")]);
        assert_eq!(result, "a } b { c {name");
    }

    #[test]
    fn test_substituted_values_not_rescanned() {
        let result = render("{a} {b}", &[("a", "{b}"), ("b", "B")]);
        assert_eq!(result, "{b} B");
    }

    #[test]
    fn test_render_request_labels_every_field() {
        let request = GenerationRequest::builder("AI in marketing")
            .tone(Tone::Casual)
            .audience(Audience::Founders)
            .post_length(PostLength::Short)
            .hashtags_or_keywords("#ai, growth")
            .number_of_posts(4)
            .build()
            .unwrap();
        let prompt = render_request(DEFAULT_TEMPLATE, &request);

        assert!(prompt.starts_with("You are a LinkedIn post expert. Generate 4 LinkedIn posts"));
        assert!(prompt.contains("Topic: AI in marketing\n"));
        assert!(prompt.contains("Tone: Casual\n"));
        assert!(prompt.contains("Audience: Founders\n"));
        assert!(prompt.contains("Post Length: Short\n"));
        assert!(prompt.contains("Hashtags/Keywords: #ai, growth\n"));
        assert!(prompt.contains("JSON array of exactly 4 distinct strings"));
        assert!(!prompt.contains('{'));
    }

    #[test]
    fn test_render_request_absent_fields() {
        let request = GenerationRequest::builder("x").build().unwrap();
        let prompt = render_request(DEFAULT_TEMPLATE, &request);
        assert!(prompt.contains("Audience: Not specified\n"));
        assert!(prompt.contains("Hashtags/Keywords: Not specified\n"));
        assert!(prompt.contains("Generate 3 LinkedIn posts"));
    }

    #[test]
    fn test_render_request_deterministic() {
        let request = GenerationRequest::builder("Topic with {tone} inside")
            .hashtags_or_keywords("{{not}} {a} {placeholder}")
            .build()
            .unwrap();
        let first = render_request(DEFAULT_TEMPLATE, &request);
        for _ in 0..10 {
            assert_eq!(render_request(DEFAULT_TEMPLATE, &request), first);
        }
        assert!(first.contains("Topic: Topic with {tone} inside\n"));
        assert!(first.contains("Hashtags/Keywords: {{not}} {a} {placeholder}\n"));
    }
}
