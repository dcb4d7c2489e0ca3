use std::sync::Arc;
use tracing::{info, instrument, warn};
use url::Url;

use crate::error::{FallbackError, FetchError, NormalizeError, ResolveError};
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::heuristic;
use crate::structured::{StructuredExtractor, StructuredPost, SubstackApi};
use crate::{ExtractedPost, PostFields, Source};

/// Canonicalize, try the structured provider, fall back to heuristic extraction.
///
/// Every stage runs once and in order; there are no retries.
pub struct Resolver {
    fetcher: Arc<dyn PageFetcher>,
    structured: Arc<dyn StructuredExtractor>,
}

impl Resolver {
    pub fn new(fetcher: Arc<dyn PageFetcher>, structured: Arc<dyn StructuredExtractor>) -> Self {
        Self {
            fetcher,
            structured,
        }
    }

    /// Production wiring: reqwest fetcher shared by the post API adapter.
    pub fn with_defaults() -> Result<Self, FetchError> {
        let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpFetcher::new()?);
        let structured = Arc::new(SubstackApi::new(fetcher.clone()));
        Ok(Self::new(fetcher, structured))
    }

    #[instrument(skip(self), fields(source = tracing::field::Empty))]
    pub async fn resolve(&self, url: &str) -> Result<ExtractedPost, ResolveError> {
        let canonical = self.canonicalize(url).await?;
        info!(%canonical, "canonical URL resolved");

        let structured_failure = match self.structured.resolve(&canonical).await {
            Ok(post) => {
                tracing::Span::current().record("source", "structured");
                return Ok(from_structured(canonical, post));
            }
            Err(e) => e,
        };
        warn!(%canonical, error = %structured_failure, "structured extraction failed, falling back");

        match self.generic(&canonical).await {
            Ok(post) => {
                tracing::Span::current().record("source", "generic");
                Ok(post)
            }
            Err(fallback) => {
                warn!(%canonical, error = %fallback, "fallback extraction failed");
                Err(ResolveError::Exhausted {
                    structured: structured_failure,
                    fallback,
                })
            }
        }
    }

    pub async fn canonicalize(&self, url: &str) -> Result<String, NormalizeError> {
        self.fetcher.final_url(url).await.map_err(NormalizeError)
    }

    async fn generic(&self, canonical: &str) -> Result<ExtractedPost, FallbackError> {
        let page = self.fetcher.fetch(canonical).await?;
        let publication = Url::parse(&page.final_url)
            .ok()
            .and_then(|u| u.host_str().map(String::from));

        let body = page.body;
        let (extract, html) = tokio::task::spawn_blocking(move || (heuristic::extract(&body), body))
            .await
            .map_err(|e| FallbackError::Extraction(e.to_string()))?;

        let fields = PostFields {
            canonical_url: Some(page.final_url),
            title: extract.title,
            author: None,
            publication,
            published_at: None,
            hero_image: extract.hero_image,
            html: Some(html),
            text: Some(extract.text),
        };
        Ok(ExtractedPost::new(canonical.to_string(), fields, Source::Generic))
    }
}

fn from_structured(canonical: String, post: StructuredPost) -> ExtractedPost {
    let fields = PostFields {
        canonical_url: post.canonical_url.or_else(|| Some(canonical.clone())),
        title: post.title,
        author: post.author,
        publication: post.publication,
        published_at: post.published_at,
        hero_image: post.hero_image,
        html: post.html,
        text: post.text,
    };
    ExtractedPost::new(canonical, fields, Source::Structured)
}
