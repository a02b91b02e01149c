use crate::canon::CanonicalUrl;
use crate::error::{CrawlError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Shared fetch context for one crawl.
///
/// Wraps a single pooled HTTP client so hundreds of article fetches reuse
/// the same connections. Cloning is cheap and shares the pool; the context
/// is passed explicitly wherever content is retrieved, with its lifetime
/// tied to the crawl that created it.
#[derive(Clone)]
pub struct FetchContext {
    client: Client,
}

impl FetchContext {
    pub fn new() -> Self {
        Self::with_timeout(10)
    }

    pub fn with_timeout(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .user_agent(concat!("wikigraph/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs((timeout_secs / 2).max(1)))
            .pool_max_idle_per_host(50)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Fetches the raw markup behind `url`. A non-success status is an
    /// error, not a page.
    pub async fn get(&self, url: &CanonicalUrl) -> Result<String> {
        debug!("Fetching {url}");
        let response = self.client.get(url.as_str()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::BadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

impl Default for FetchContext {
    fn default() -> Self {
        Self::new()
    }
}
