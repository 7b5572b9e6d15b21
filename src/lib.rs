//! Linkharvest: a domain-stream link harvester
//!
//! This crate implements a crawl pipeline that consumes domain names from a
//! queue, fetches each domain's page while respecting robots.txt, extracts
//! outbound link URLs, and persists the discovered links grouped by the
//! originating domain.

pub mod config;
pub mod crawler;
pub mod queue;
pub mod robots;
pub mod server;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for linkharvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Non-success HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("URL disallowed by robots.txt: {url}")]
    RobotsDenied { url: String },

    #[error("HTML parse error for {url}: {message}")]
    HtmlParse { url: String, message: String },

    #[error("Queue error: {0}")]
    Queue(#[from] queue::QueueError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for linkharvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use self::config::Config;
pub use self::queue::{Delivery, DomainQueue, InMemoryQueue};
pub use self::storage::{JsonStore, LinkStore};
pub use self::url::{is_valid_domain, normalize_url};
