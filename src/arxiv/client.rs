// HTTP client for the arXiv export API.
//
// One GET per search: `search_query=all:<term>&start=0&max_results=N`.
// The response is an Atom feed, handed to `feed::parse_feed`.

use std::time::Duration;

use anyhow::{Context, Result};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use tracing::{debug, info};

use super::feed::{self, FeedPage};
use crate::error::{RetrievalError, SearchError};

/// Default arXiv query endpoint.
pub const DEFAULT_API_URL: &str = "http://export.arxiv.org/api/query";

/// Default number of results requested per search.
pub const DEFAULT_MAX_RESULTS: usize = 20;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Thin reqwest wrapper around the arXiv query endpoint.
pub struct ArxivClient {
    client: reqwest::Client,
    base_url: String,
}

impl ArxivClient {
    /// Create a client for the given endpoint with a request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("paperscope/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::with_client(client, base_url))
    }

    /// Wrap an already configured reqwest client.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches(['/', '?']).to_string(),
        }
    }

    /// Full request URL for a search.
    ///
    /// The term is percent-encoded, so spaces, `&` and `#` in user input
    /// can't break the query string.
    pub fn query_url(&self, term: &str, max_results: usize) -> String {
        let encoded = utf8_percent_encode(term, NON_ALPHANUMERIC);
        format!(
            "{}?search_query=all:{}&start=0&max_results={}",
            self.base_url, encoded, max_results
        )
    }

    /// Fetch and parse up to `max_results` papers matching `term`.
    pub async fn fetch(&self, term: &str, max_results: usize) -> Result<FeedPage, SearchError> {
        let url = self.query_url(term, max_results);
        debug!(url = %url, "arXiv query");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(RetrievalError::from)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RetrievalError::Status { status, body }.into());
        }

        let body = response.text().await.map_err(RetrievalError::from)?;
        let page = feed::parse_feed(&body)?;

        info!(
            items = page.items.len(),
            total = page.total_results,
            "arXiv feed parsed"
        );

        Ok(page)
    }
}
