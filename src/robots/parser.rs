//! Robots.txt parser implementation
//!
//! This module wraps the robotstxt crate behind a validity check. The
//! matcher itself accepts any input, so malformed files are detected up
//! front: a policy file whose shape cannot be trusted must not be treated
//! as permission to crawl.

use robotstxt::DefaultMatcher;
use thiserror::Error;

/// Error returned when robots.txt content is not a well-formed policy file
#[derive(Debug, Error)]
#[error("Malformed robots.txt line {line}: {content}")]
pub struct RobotsParseError {
    /// 1-based line number of the offending line
    pub line: usize,
    /// The offending line content
    pub content: String,
}

/// Parsed robots.txt rules for one host
///
/// Wraps the raw file content; rule evaluation is delegated to the
/// robotstxt crate's matcher on each check.
#[derive(Debug, Clone)]
pub struct ParsedRobots {
    content: String,
}

impl ParsedRobots {
    /// Parses robots.txt content, rejecting files that are not shaped like
    /// a policy file
    ///
    /// Every non-empty, non-comment line must be a `field: value` directive.
    /// Unknown directive names are tolerated (robots.txt consumers ignore
    /// fields they do not understand), but free text is not: a file
    /// containing it is untrustworthy and parsing fails.
    ///
    /// # Arguments
    ///
    /// * `content` - The raw robots.txt file content
    ///
    /// # Returns
    ///
    /// * `Ok(ParsedRobots)` - The file is a well-formed policy file
    /// * `Err(RobotsParseError)` - The file contains a malformed line
    pub fn parse(content: &str) -> Result<Self, RobotsParseError> {
        for (index, line) in content.lines().enumerate() {
            let trimmed = line.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            // Directive form: "field: value" (value may be empty, as in
            // "Disallow:"). A line without a separator is not a directive.
            if !trimmed.contains(':') {
                return Err(RobotsParseError {
                    line: index + 1,
                    content: trimmed.to_string(),
                });
            }
        }

        Ok(Self {
            content: content.to_string(),
        })
    }

    /// Checks if a path is allowed for the given user agent
    ///
    /// # Arguments
    ///
    /// * `path` - The URL path to check (e.g. `/products/1`)
    /// * `user_agent` - The crawling identity to evaluate rules for
    pub fn is_allowed(&self, path: &str, user_agent: &str) -> bool {
        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, path)
    }
}
