//! Source fetcher for ASKBOT.
//!
//! Pulls the FAQ page through a rendering proxy (the page builds its
//! accordion with JavaScript, so a plain GET returns an empty shell),
//! extracts the question/answer pairs, and refreshes the SQLite cache as
//! one batch. Transport failures are returned to the caller, who logs them
//! and moves on — nothing here retries.

pub mod extract;

pub use extract::extract_pairs;

use askbot_core::error::ScrapeError;
use askbot_store::SqliteFaqStore;
use std::time::Duration;
use tracing::{info, warn};

/// Fixed upper bound on the proxy fetch. Rendering JavaScript-heavy pages
/// can take the proxy over a minute.
const FETCH_TIMEOUT: Duration = Duration::from_secs(90);

/// Default rendering-proxy endpoint.
const DEFAULT_PROXY_URL: &str = "http://api.scraperapi.com";

/// Fetches the FAQ page and writes the extracted pairs into the cache.
pub struct SourceFetcher {
    client: reqwest::Client,
    proxy_url: String,
    faq_url: String,
    api_key: String,
}

impl SourceFetcher {
    /// Create a fetcher for the given proxy credential and FAQ page.
    pub fn new(api_key: impl Into<String>, faq_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            proxy_url: DEFAULT_PROXY_URL.into(),
            faq_url: faq_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Override the proxy endpoint (used by tests against a mock server).
    pub fn with_proxy_url(mut self, url: impl Into<String>) -> Self {
        self.proxy_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Fetch the page, extract its pairs, and replace the cache contents.
    ///
    /// Returns how many pairs were stored. Zero is a warning, not an error,
    /// and still discards the previous cache — the page genuinely had no
    /// extractable entries. A transport failure or non-2xx proxy status
    /// returns [`ScrapeError::Network`] before the cache is touched.
    pub async fn fetch_and_store(&self, store: &SqliteFaqStore) -> Result<usize, ScrapeError> {
        info!(url = %self.faq_url, "fetching FAQ page through rendering proxy");

        let response = self
            .client
            .get(&self.proxy_url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("url", self.faq_url.as_str()),
                ("render", "true"),
            ])
            .send()
            .await
            .map_err(|e| ScrapeError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Network(format!(
                "proxy returned HTTP {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ScrapeError::Network(format!("body read failed: {e}")))?;

        let pairs = extract::extract_pairs(&body);
        store.replace_all(&pairs).await?;

        if pairs.is_empty() {
            warn!("no FAQ entries found on the page");
        } else {
            info!(count = pairs.len(), "FAQ entries stored");
        }

        Ok(pairs.len())
    }
}
