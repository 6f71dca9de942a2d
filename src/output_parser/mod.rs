//! # LLM Output Parser
//!
//! Checks model responses against the declared output contract.
//!
//! | Function | Purpose |
//! |----------|---------|
//! | [`posts_schema`] | JSON Schema declared to the backend |
//! | [`parse_posts`] | Validate a response as an array of strings |
//! | [`separate_reasoning`] | Split leading `<think>` blocks from the answer |

pub mod error;
pub mod extract;
pub mod posts;

pub use error::ParseError;
pub use extract::separate_reasoning;
pub use posts::{parse_posts, posts_schema, ParsedPosts};
