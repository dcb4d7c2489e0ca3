//! Structured post metadata from the platform's JSON API.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use url::Url;

use crate::error::StructuredError;
use crate::fetch::PageFetcher;
use crate::heuristic::html_to_text;

/// What a structured provider knows about a post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredPost {
    pub canonical_url: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub publication: Option<String>,
    pub published_at: Option<String>,
    pub hero_image: Option<String>,
    pub html: Option<String>,
    pub text: Option<String>,
}

#[async_trait]
pub trait StructuredExtractor: Send + Sync {
    async fn resolve(&self, url: &str) -> Result<StructuredPost, StructuredError>;
}

/// Reads `/api/v1/posts/<slug>` on the post's own host.
pub struct SubstackApi {
    fetcher: Arc<dyn PageFetcher>,
}

#[derive(Debug, Deserialize)]
struct PostPayload {
    canonical_url: Option<String>,
    title: Option<String>,
    author: Option<Value>,
    #[serde(default, rename = "publishedBylines")]
    bylines: Vec<Byline>,
    publication: Option<Value>,
    post_date: Option<String>,
    cover_image: Option<String>,
    body_html: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Byline {
    name: Option<String>,
    #[serde(default, rename = "publicationUsers")]
    publication_users: Vec<PublicationUser>,
}

#[derive(Debug, Deserialize)]
struct PublicationUser {
    publication: Option<Value>,
}

impl SubstackApi {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    /// API endpoint for a post URL shaped like `.../p/<slug>`.
    pub fn endpoint_for(url: &str) -> Result<Url, StructuredError> {
        let unsupported = || StructuredError::UnsupportedUrl(url.to_string());
        let parsed = Url::parse(url).map_err(|_| unsupported())?;
        if parsed.host_str().is_none() {
            return Err(unsupported());
        }

        let segments: Vec<&str> = parsed
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();
        let slug = match segments.as_slice() {
            [.., "p", slug] => *slug,
            _ => return Err(unsupported()),
        };

        let mut endpoint = parsed.clone();
        endpoint.set_path(&format!("/api/v1/posts/{slug}"));
        endpoint.set_query(None);
        endpoint.set_fragment(None);
        Ok(endpoint)
    }
}

#[async_trait]
impl StructuredExtractor for SubstackApi {
    async fn resolve(&self, url: &str) -> Result<StructuredPost, StructuredError> {
        let endpoint = Self::endpoint_for(url)?;
        debug!(%url, %endpoint, "querying post API");

        let page = self.fetcher.fetch(endpoint.as_str()).await?;
        let payload: PostPayload = serde_json::from_str(&page.body)
            .map_err(|e| StructuredError::Decode(e.to_string()))?;

        let title = payload.title.ok_or(StructuredError::MissingField("title"))?;
        let html = payload
            .body_html
            .ok_or(StructuredError::MissingField("body_html"))?;
        let author = payload
            .bylines
            .iter()
            .filter_map(|b| b.name.as_deref())
            .find(|name| !name.trim().is_empty())
            .map(String::from)
            .or_else(|| payload.author.as_ref().and_then(name_of))
            .ok_or(StructuredError::MissingField("author"))?;

        let publication = payload
            .publication
            .as_ref()
            .and_then(name_of)
            .or_else(|| {
                payload
                    .bylines
                    .iter()
                    .flat_map(|b| &b.publication_users)
                    .find_map(|pu| pu.publication.as_ref().and_then(name_of))
            })
            .or_else(|| endpoint.host_str().map(String::from));

        let text = {
            let html = html.clone();
            tokio::task::spawn_blocking(move || html_to_text(&html))
                .await
                .map_err(|e| StructuredError::Decode(format!("body conversion aborted: {e}")))?
        };

        Ok(StructuredPost {
            canonical_url: payload.canonical_url,
            title: Some(title),
            author: Some(author),
            publication,
            published_at: payload.post_date.as_deref().map(normalize_timestamp),
            hero_image: payload.cover_image,
            html: Some(html),
            text: Some(text),
        })
    }
}

/// A display name from either a bare string or an object with `name`.
fn name_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Object(map) => map
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.trim().is_empty())
            .map(String::from),
        _ => None,
    }
}

fn normalize_timestamp(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::AutoSi, true))
        .unwrap_or_else(|_| raw.to_string())
}
