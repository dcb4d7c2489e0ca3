pub mod error;
pub mod fetch;
pub mod heuristic;
pub mod resolver;
pub mod structured;
pub mod utils;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub use error::{FallbackError, FetchError, NormalizeError, ResolveError, StructuredError};
pub use resolver::Resolver;

/// Which extraction path produced an [`ExtractedPost`].
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Structured,
    Generic,
}

/// Unified result of resolving one post URL.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ExtractedPost {
    pub url: String,
    pub canonical_url: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub publication: Option<String>,
    pub published_at: Option<String>,
    pub hero_image: Option<String>,
    pub html: Option<String>,
    pub text: Option<String>,
    #[serde(rename = "sha256")]
    pub content_hash: Option<String>,
    pub source: Source,
}

/// Fields shared by both extraction paths, before the hash is computed.
#[derive(Debug, Default, Clone)]
pub struct PostFields {
    pub canonical_url: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub publication: Option<String>,
    pub published_at: Option<String>,
    pub hero_image: Option<String>,
    pub html: Option<String>,
    pub text: Option<String>,
}

impl ExtractedPost {
    pub fn new(url: String, fields: PostFields, source: Source) -> Self {
        let content_hash = fields.text.as_deref().and_then(content_hash);
        Self {
            url,
            canonical_url: fields.canonical_url,
            title: fields.title,
            author: fields.author,
            publication: fields.publication,
            published_at: fields.published_at,
            hero_image: fields.hero_image,
            html: fields.html,
            text: fields.text,
            content_hash,
            source,
        }
    }

    pub fn text_len(&self) -> usize {
        self.text.as_ref().map(|t| t.len()).unwrap_or(0)
    }
}

/// SHA-256 of the body text as lowercase hex; `None` for empty text.
pub fn content_hash(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }
    Some(format!("{:x}", Sha256::digest(text.as_bytes())))
}
