//! Configuration loading and validation
//!
//! The configuration is read from a TOML file once at startup, validated,
//! and passed by reference into each component constructor. There is no
//! reload-in-place: a changed file takes effect on the next process start.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{Config, CrawlerConfig, OutputConfig, QueueConfig, ServerConfig};
pub use validation::validate;
