//! HTTP fetcher implementation
//!
//! This module handles page fetches for the crawler:
//! - Building the HTTP client shared by page and robots.txt requests
//! - Consulting the politeness gate before every fetch
//! - Per-request identity rotation from a fixed browser pool
//! - Treating non-2xx status as a fetch failure
//!
//! There is no retry at this layer; a failed fetch is reported to the
//! caller, which logs it and drops the work item.

use crate::config::CrawlerConfig;
use crate::robots::{check_policy, PolicyDecision};
use crate::HarvestError;
use rand::Rng;
use reqwest::header::{ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Fixed pool of browser identities rotated across page fetches
///
/// Varying the declared identity per request avoids a single identity being
/// blocked outright. Robots.txt evaluation uses the configured crawler
/// identity instead, not these.
pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/92.0.4515.159 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
];

/// Static referer sent with every page fetch
const REFERER_VALUE: &str = "https://www.google.com/";

/// Language preference sent with every page fetch
const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9";

/// Builds the HTTP client shared by all workers
///
/// One timeout applies to every request the client makes, page and
/// robots.txt fetches alike.
///
/// # Arguments
///
/// * `timeout_secs` - Request timeout in seconds
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(timeout_secs: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages on behalf of crawl workers
///
/// Holds the shared HTTP client and the crawling identity used for
/// robots.txt evaluation. Cloneable state is kept inside the client's own
/// connection pool; the fetcher itself is shared read-only across workers.
pub struct PageFetcher {
    client: Client,
    identity: String,
}

impl PageFetcher {
    /// Creates a fetcher from the crawler configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Crawler configuration (timeout, identity)
    ///
    /// # Returns
    ///
    /// * `Ok(PageFetcher)` - Ready to fetch
    /// * `Err(reqwest::Error)` - Failed to build the HTTP client
    pub fn new(config: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        let client = build_http_client(config.fetch_timeout_secs)?;
        Ok(Self {
            client,
            identity: config.identity.clone(),
        })
    }

    /// Fetches a page body as text
    ///
    /// The politeness gate runs first; when it denies the URL, no fetch
    /// attempt is made. On permitted URLs a GET is issued with a rotated
    /// User-Agent, the static referer, and the language preference header.
    /// The body is fully buffered into memory before being returned.
    ///
    /// # Arguments
    ///
    /// * `url` - The normalized absolute URL to fetch
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The page body
    /// * `Err(HarvestError)` - Denied by robots.txt, non-2xx status, or a
    ///   transport error
    pub async fn fetch_page(&self, url: &str) -> Result<String, HarvestError> {
        let parsed = Url::parse(url)?;

        match check_policy(&self.client, &parsed, &self.identity).await {
            PolicyDecision::Allowed => {}
            PolicyDecision::Denied { reason } => {
                tracing::debug!("politeness gate denied {}: {}", url, reason);
                return Err(HarvestError::RobotsDenied {
                    url: url.to_string(),
                });
            }
        }

        let user_agent = USER_AGENTS[rand::thread_rng().gen_range(0..USER_AGENTS.len())];

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, user_agent)
            .header(REFERER, REFERER_VALUE)
            .header(ACCEPT_LANGUAGE, ACCEPT_LANGUAGE_VALUE)
            .send()
            .await
            .map_err(|source| HarvestError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HarvestError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| HarvestError::Http {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(60).is_ok());
    }

    #[test]
    fn test_user_agent_pool_is_nonempty() {
        assert!(!USER_AGENTS.is_empty());
        assert!(USER_AGENTS.iter().all(|ua| ua.starts_with("Mozilla/5.0")));
    }

    #[test]
    fn test_fetcher_from_config() {
        let config = CrawlerConfig {
            workers: 5,
            fetch_timeout_secs: 30,
            identity: "linkharvest".to_string(),
        };
        assert!(PageFetcher::new(&config).is_ok());
    }

    // Fetch behavior (gating, status handling, headers) is covered with
    // wiremock in the integration tests.
}
