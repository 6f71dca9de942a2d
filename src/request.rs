//! Request validation: raw caller input to a canonical [`GenerationRequest`].
//!
//! Callers hand over a plain JSON object with a required `topic` and a handful
//! of optional fields. [`validate`] applies the rules field by field, in a
//! fixed order, filling defaults and rejecting the first violation with a
//! [`ValidationError`] that names the field.
//!
//! ```
//! use post_pipeline::request::{validate, PostLength, Tone};
//! use serde_json::json;
//!
//! let request = validate(&json!({"topic": "AI in marketing"})).unwrap();
//! assert_eq!(request.tone(), Tone::Professional);
//! assert_eq!(request.post_length(), PostLength::Medium);
//! assert_eq!(request.number_of_posts().get(), 3);
//! ```

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Voice the posts are written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tone {
    #[default]
    Professional,
    Casual,
    Storytelling,
}

impl Tone {
    pub const ALL: [Tone; 3] = [Tone::Professional, Tone::Casual, Tone::Storytelling];

    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Casual => "Casual",
            Tone::Storytelling => "Storytelling",
        }
    }
}

impl FromStr for Tone {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tone::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or(ValidationError::InvalidTone)
    }
}

/// Readership the posts are aimed at. Has no default: an absent audience
/// leaves the prompt unnarrowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Audience {
    Founders,
    Students,
    Recruiters,
}

impl Audience {
    pub const ALL: [Audience; 3] = [Audience::Founders, Audience::Students, Audience::Recruiters];

    pub fn as_str(self) -> &'static str {
        match self {
            Audience::Founders => "Founders",
            Audience::Students => "Students",
            Audience::Recruiters => "Recruiters",
        }
    }
}

impl FromStr for Audience {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Audience::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or(ValidationError::InvalidAudience)
    }
}

/// Target length of each post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl PostLength {
    pub const ALL: [PostLength; 3] = [PostLength::Short, PostLength::Medium, PostLength::Long];

    pub fn as_str(self) -> &'static str {
        match self {
            PostLength::Short => "Short",
            PostLength::Medium => "Medium",
            PostLength::Long => "Long",
        }
    }
}

impl FromStr for PostLength {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PostLength::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or(ValidationError::InvalidPostLength)
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(Tone, Audience, PostLength);

/// Number of posts to generate, always within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PostCount(u8);

impl PostCount {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;
    pub const DEFAULT: u8 = 3;

    /// Accept `n` if it lies in `1..=5`.
    pub fn new(n: i64) -> Result<Self, ValidationError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&n) {
            Ok(Self(n as u8))
        } else {
            Err(ValidationError::NumberOfPostsOutOfRange)
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn as_usize(self) -> usize {
        usize::from(self.0)
    }
}

impl Default for PostCount {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for PostCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fully validated and defaulted generation request.
///
/// The only input [`PostPipeline`](crate::pipeline::PostPipeline) accepts.
/// Fields are private: a value of this type can only come out of [`validate`]
/// or [`GenerationRequestBuilder::build`], so its invariants always hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    topic: String,
    tone: Tone,
    #[serde(skip_serializing_if = "Option::is_none")]
    audience: Option<Audience>,
    post_length: PostLength,
    #[serde(skip_serializing_if = "Option::is_none")]
    hashtags_or_keywords: Option<String>,
    number_of_posts: PostCount,
}

impl GenerationRequest {
    /// Start a typed builder for `topic`.
    pub fn builder(topic: impl Into<String>) -> GenerationRequestBuilder {
        GenerationRequestBuilder {
            topic: topic.into(),
            tone: Tone::default(),
            audience: None,
            post_length: PostLength::default(),
            hashtags_or_keywords: None,
            number_of_posts: i64::from(PostCount::DEFAULT),
        }
    }

    /// Validate an untyped input object. Same as [`validate`].
    pub fn from_value(input: &Value) -> Result<Self, ValidationError> {
        validate(input)
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn audience(&self) -> Option<Audience> {
        self.audience
    }

    pub fn post_length(&self) -> PostLength {
        self.post_length
    }

    pub fn hashtags_or_keywords(&self) -> Option<&str> {
        self.hashtags_or_keywords.as_deref()
    }

    pub fn number_of_posts(&self) -> PostCount {
        self.number_of_posts
    }
}

impl TryFrom<&Value> for GenerationRequest {
    type Error = ValidationError;

    fn try_from(input: &Value) -> Result<Self, Self::Error> {
        validate(input)
    }
}

/// Builder for [`GenerationRequest`].
///
/// Applies the same topic and range rules as [`validate`] in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct GenerationRequestBuilder {
    topic: String,
    tone: Tone,
    audience: Option<Audience>,
    post_length: PostLength,
    hashtags_or_keywords: Option<String>,
    number_of_posts: i64,
}

impl GenerationRequestBuilder {
    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn audience(mut self, audience: Audience) -> Self {
        self.audience = Some(audience);
        self
    }

    pub fn post_length(mut self, length: PostLength) -> Self {
        self.post_length = length;
        self
    }

    pub fn hashtags_or_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.hashtags_or_keywords = Some(keywords.into());
        self
    }

    pub fn number_of_posts(mut self, n: i64) -> Self {
        self.number_of_posts = n;
        self
    }

    pub fn build(self) -> Result<GenerationRequest, ValidationError> {
        if self.topic.trim().is_empty() {
            return Err(ValidationError::TopicRequired);
        }
        Ok(GenerationRequest {
            topic: self.topic,
            tone: self.tone,
            audience: self.audience,
            post_length: self.post_length,
            hashtags_or_keywords: self.hashtags_or_keywords,
            number_of_posts: PostCount::new(self.number_of_posts)?,
        })
    }
}

/// Turn an untyped input object into a [`GenerationRequest`].
///
/// Rules run in order (topic, tone, audience, postLength, hashtagsOrKeywords,
/// numberOfPosts) and the first violation is returned. `null` counts as
/// absent for every optional field; unknown fields are ignored.
pub fn validate(input: &Value) -> Result<GenerationRequest, ValidationError> {
    let topic = match present(input, "topic") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        _ => return Err(ValidationError::TopicRequired),
    };

    let tone = match present(input, "tone") {
        None => Tone::default(),
        Some(v) => v.as_str().ok_or(ValidationError::InvalidTone)?.parse::<Tone>()?,
    };

    let audience = match present(input, "audience") {
        None => None,
        Some(v) => Some(
            v.as_str()
                .ok_or(ValidationError::InvalidAudience)?
                .parse::<Audience>()?,
        ),
    };

    let post_length = match present(input, "postLength") {
        None => PostLength::default(),
        Some(v) => v
            .as_str()
            .ok_or(ValidationError::InvalidPostLength)?
            .parse::<PostLength>()?,
    };

    let hashtags_or_keywords = match present(input, "hashtagsOrKeywords") {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return Err(ValidationError::InvalidHashtagsOrKeywords),
    };

    let number_of_posts = match present(input, "numberOfPosts") {
        None => PostCount::default(),
        Some(v) => {
            let n = coerce_integer(v).ok_or(ValidationError::NumberOfPostsOutOfRange)?;
            PostCount::new(n)?
        }
    };

    Ok(GenerationRequest {
        topic,
        tone,
        audience,
        post_length,
        hashtags_or_keywords,
        number_of_posts,
    })
}

/// Field lookup that treats `null` like a missing key.
fn present<'a>(input: &'a Value, field: &str) -> Option<&'a Value> {
    input.get(field).filter(|v| !v.is_null())
}

/// Integer value of a numeric-looking JSON value.
///
/// Accepts integers and floats without a fractional part, either as JSON
/// numbers or as strings holding one (surrounding whitespace allowed).
fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole))
        }
        _ => None,
    }
}

fn whole(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0).then(|| f as i64)
}
