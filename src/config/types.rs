use serde::Deserialize;

/// Main configuration structure for linkharvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub queue: QueueConfig,
    pub output: OutputConfig,
}

/// Submission endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Port the submission endpoint listens on
    pub port: u16,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Size of the fixed crawl worker pool
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Shared timeout for every HTTP request, in seconds
    #[serde(rename = "fetch-timeout-secs", default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// Crawling identity evaluated against robots.txt rules
    pub identity: String,
}

/// Inbound queue configuration
#[derive(Debug, Clone, Deserialize)]
pub struct QueueConfig {
    /// Buffered capacity of the in-process queue
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the JSON file harvested links are persisted to
    #[serde(rename = "store-path")]
    pub store_path: String,
}

fn default_workers() -> usize {
    5
}

fn default_fetch_timeout() -> u64 {
    60
}

fn default_capacity() -> usize {
    1024
}
