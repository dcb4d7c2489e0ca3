use async_trait::async_trait;
use reqwest::{redirect, Client};
use std::time::Duration;
use tracing::debug;

use crate::error::FetchError;

pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; SubstackProxy/1.0)";
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL of the response after every redirect was followed.
    pub final_url: String,
    pub body: String,
}

/// Outbound HTTP used by every resolution stage.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// GET `url` following redirects and report where it landed. The status is not checked.
    async fn final_url(&self, url: &str) -> Result<String, FetchError>;

    /// GET `url` following redirects; non-2xx responses are errors.
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(FETCH_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| FetchError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn final_url(&self, url: &str) -> Result<String, FetchError> {
        let res = self.client.get(url).send().await?;
        let landed = res.url().to_string();
        debug!(%url, %landed, status = res.status().as_u16(), "resolved final URL");
        Ok(landed)
    }

    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let res = self.client.get(url).send().await?;
        let status = res.status();
        let final_url = res.url().to_string();

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: final_url,
            });
        }

        let body = res.text().await.map_err(|e| FetchError::Body(e.to_string()))?;
        debug!(%url, %final_url, bytes = body.len(), "fetched page");

        Ok(FetchedPage { final_url, body })
    }
}
