//! Robots.txt handling module
//!
//! This module implements the politeness gate consulted before every page
//! fetch. The policy file is fetched fresh for each fetch attempt with the
//! same HTTP client used for page fetches; there is no cross-request cache.
//!
//! Outcome policy:
//! - transport error fetching the policy file: crawling is allowed
//!   (fail-open; absence of a reachable policy implies no stated restriction)
//! - non-success HTTP status: crawling is allowed (fail-open)
//! - policy file fetched but malformed: crawling is denied (fail-closed;
//!   an untrustworthy policy must not grant permission)
//! - policy file parses: the rule verdict for the configured identity

mod parser;

pub use parser::{ParsedRobots, RobotsParseError};

use reqwest::Client;
use url::Url;

/// Verdict of the politeness gate for one URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyDecision {
    /// Crawling the URL is permitted
    Allowed,
    /// Crawling the URL is not permitted
    Denied {
        /// Human-readable reason, for logging
        reason: String,
    },
}

impl PolicyDecision {
    /// Returns true if the decision permits crawling
    pub fn is_allowed(&self) -> bool {
        matches!(self, PolicyDecision::Allowed)
    }
}

/// Builds the well-known policy-file URL for a page URL
///
/// The host portion keeps an explicit port when the page URL carries one,
/// so the policy file is requested from the same authority as the page.
fn robots_url(page_url: &Url) -> Option<String> {
    let host = page_url.host_str()?;
    match page_url.port() {
        Some(port) => Some(format!("{}://{}:{}/robots.txt", page_url.scheme(), host, port)),
        None => Some(format!("{}://{}/robots.txt", page_url.scheme(), host)),
    }
}

/// Determines whether the configured crawling identity may fetch a URL
///
/// Fetches `{scheme}://{host}/robots.txt` with the shared client and
/// evaluates the page URL's path against the parsed rules.
///
/// # Arguments
///
/// * `client` - The HTTP client shared with page fetches
/// * `page_url` - The absolute URL about to be fetched
/// * `identity` - The crawling identity to evaluate rules for
///
/// # Returns
///
/// A [`PolicyDecision`]; this function never fails, it resolves every
/// outcome to a verdict per the fail-open/fail-closed policy above.
pub async fn check_policy(client: &Client, page_url: &Url, identity: &str) -> PolicyDecision {
    let robots_target = match robots_url(page_url) {
        Some(u) => u,
        None => {
            // No host to ask for a policy; nothing stated a restriction.
            return PolicyDecision::Allowed;
        }
    };

    let response = match client.get(&robots_target).send().await {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!(
                "robots.txt fetch failed for {} ({}), allowing crawl",
                robots_target,
                e
            );
            return PolicyDecision::Allowed;
        }
    };

    if !response.status().is_success() {
        tracing::debug!(
            "robots.txt returned status {} for {}, allowing crawl",
            response.status(),
            robots_target
        );
        return PolicyDecision::Allowed;
    }

    let body = match response.text().await {
        Ok(b) => b,
        Err(e) => {
            tracing::debug!(
                "failed to read robots.txt body from {} ({}), allowing crawl",
                robots_target,
                e
            );
            return PolicyDecision::Allowed;
        }
    };

    let robots = match ParsedRobots::parse(&body) {
        Ok(r) => r,
        Err(e) => {
            return PolicyDecision::Denied {
                reason: format!("malformed robots.txt: {}", e),
            };
        }
    };

    if robots.is_allowed(page_url.path(), identity) {
        PolicyDecision::Allowed
    } else {
        PolicyDecision::Denied {
            reason: format!("path {} disallowed for {}", page_url.path(), identity),
        }
    }
}
