use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },
    #[error("failed to read response body: {0}")]
    Body(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout(e.to_string())
        } else if e.is_builder() {
            FetchError::InvalidUrl(e.to_string())
        } else if e.is_body() || e.is_decode() {
            FetchError::Body(e.to_string())
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

/// The canonicalization stage failed; fatal for the request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("URL normalize failed: {0}")]
pub struct NormalizeError(#[source] pub FetchError);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StructuredError {
    #[error("URL not recognized by post API: {0}")]
    UnsupportedUrl(String),
    #[error("post API request failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("post API returned malformed payload: {0}")]
    Decode(String),
    #[error("post API payload missing required field `{0}`")]
    MissingField(&'static str),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FallbackError {
    #[error("{0}")]
    Fetch(#[from] FetchError),
    #[error("extraction failed: {0}")]
    Extraction(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
    #[error("structured extraction failed: {structured}; fallback fetch failed: {fallback}")]
    Exhausted {
        structured: StructuredError,
        fallback: FallbackError,
    },
}
