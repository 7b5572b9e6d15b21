//! Storage trait and error types

use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for link-store backends
///
/// Implementations must guarantee that after a successful `record_link`
/// return, the persisted representation contains the complete current
/// mapping, and that concurrent callers never observe corrupted shared
/// state. The whole read-modify-persist sequence is one critical section
/// per store instance.
pub trait LinkStore: Send + Sync {
    /// Appends a link to the ordered sequence for a domain, creating the
    /// domain's entry if absent, then synchronously persists the entire
    /// current mapping before returning
    ///
    /// # Arguments
    ///
    /// * `domain` - The source domain the link was extracted from
    /// * `url` - The extracted link (raw href, possibly relative)
    fn record_link(&self, domain: &str, url: &str) -> StorageResult<()>;

    /// Returns a copy of the current in-memory mapping
    fn snapshot(&self) -> BTreeMap<String, Vec<String>>;
}
