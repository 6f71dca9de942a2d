use thiserror::Error;

/// Message shown to end users for any failure that is not a validation error.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "An unexpected error occurred while generating posts. Please try again.";

/// A request field violated its constraint.
///
/// Each variant names exactly one field, so callers can point the user at the
/// input that needs correcting. The `Display` text is the user-facing reason.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `topic` was missing, not a string, or blank after trimming.
    #[error("topic required")]
    TopicRequired,

    /// `tone` was present but not one of the known tones.
    #[error("invalid tone")]
    InvalidTone,

    /// `audience` was present but not one of the known audiences.
    #[error("invalid audience")]
    InvalidAudience,

    /// `postLength` was present but not one of the known lengths.
    #[error("invalid postLength")]
    InvalidPostLength,

    /// `hashtagsOrKeywords` was present but not a string.
    #[error("invalid hashtagsOrKeywords")]
    InvalidHashtagsOrKeywords,

    /// `numberOfPosts` was non-numeric or outside `1..=5`.
    #[error("numberOfPosts out of range")]
    NumberOfPostsOutOfRange,
}

impl ValidationError {
    /// Wire name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::TopicRequired => "topic",
            ValidationError::InvalidTone => "tone",
            ValidationError::InvalidAudience => "audience",
            ValidationError::InvalidPostLength => "postLength",
            ValidationError::InvalidHashtagsOrKeywords => "hashtagsOrKeywords",
            ValidationError::NumberOfPostsOutOfRange => "numberOfPosts",
        }
    }
}

/// The generation capability failed or broke its output contract.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Low-level HTTP transport failure (connection refused, timeout, etc.).
    #[error("generation request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-success status code.
    #[error("generation service returned HTTP {status}: {body}")]
    Http {
        /// HTTP status code (e.g. 429, 500, 503).
        status: u16,
        /// Response body text.
        body: String,
    },

    /// A backend failed for a reason that is not an HTTP exchange.
    #[error("generation backend failed: {0}")]
    Backend(String),

    /// The response was not an array of strings.
    #[error("malformed output: {reason}")]
    MalformedOutput { reason: String },

    /// The response was an array of strings, but of the wrong length.
    #[error("malformed output: expected {expected} posts, got {actual}")]
    CountMismatch { expected: usize, actual: usize },
}

impl GenerationError {
    /// Whether the capability answered, but with output that broke the contract.
    pub fn is_malformed_output(&self) -> bool {
        matches!(
            self,
            GenerationError::MalformedOutput { .. } | GenerationError::CountMismatch { .. }
        )
    }
}

/// Errors produced by the post pipeline and its components.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Caller input was rejected before any generation happened.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The generation call failed or returned a non-conforming payload.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Invalid configuration detected at build time.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PipelineError {
    /// Text that is safe to show an end user.
    ///
    /// Validation failures are reported verbatim since the user can fix them.
    /// Everything else collapses to [`GENERIC_FAILURE_MESSAGE`].
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::Validation(e) => e.to_string(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for PipelineError {
    fn from(err: reqwest::Error) -> Self {
        PipelineError::Generation(GenerationError::Request(err))
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
