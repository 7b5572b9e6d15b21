//! JSON snapshot store implementation
//!
//! Every recorded link rewrites the full mapping to disk. The write goes to
//! a sibling temp file first and is renamed over the target, so a reader
//! opening the file at any moment sees a complete, well-formed snapshot.
//! Rewriting everything per link is O(total accumulated size) per call; the
//! [`LinkStore`] seam exists so an append-log variant can replace this
//! without changing callers.

use crate::storage::traits::{LinkStore, StorageResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// JSON file store for harvested links
///
/// The in-memory mapping starts empty at construction and grows until the
/// process terminates; the file at `path` mirrors it after every write.
pub struct JsonStore {
    path: PathBuf,
    data: Mutex<BTreeMap<String, Vec<String>>>,
}

impl JsonStore {
    /// Creates a new store writing snapshots to the given path
    ///
    /// The file itself is only created on the first recorded link.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            data: Mutex::new(BTreeMap::new()),
        }
    }

    /// Returns the path the store persists to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the full mapping to disk atomically
    ///
    /// Serializes to `<path>.tmp` and renames over the target so a
    /// concurrent reader never observes a truncated file.
    fn persist(&self, data: &BTreeMap<String, Vec<String>>) -> StorageResult<()> {
        let serialized = serde_json::to_string_pretty(data)?;

        let mut tmp_path = self.path.clone().into_os_string();
        tmp_path.push(".tmp");
        let tmp_path = PathBuf::from(tmp_path);

        fs::write(&tmp_path, serialized)?;
        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }
}

impl LinkStore for JsonStore {
    fn record_link(&self, domain: &str, url: &str) -> StorageResult<()> {
        // Append and persist under one lock so the persisted file is always
        // a consistent snapshot of the full mapping.
        let mut data = self.data.lock().unwrap();
        data.entry(domain.to_string())
            .or_default()
            .push(url.to_string());
        self.persist(&data)
    }

    fn snapshot(&self) -> BTreeMap<String, Vec<String>> {
        self.data.lock().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> JsonStore {
        JsonStore::new(dir.path().join("links.json"))
    }

    fn read_file(store: &JsonStore) -> BTreeMap<String, Vec<String>> {
        let content = fs::read_to_string(store.path()).unwrap();
        serde_json::from_str(&content).unwrap()
    }

    #[test]
    fn test_record_creates_domain_entry() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.record_link("example.com", "/p1").unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot["example.com"], vec!["/p1"]);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.record_link("example.com", "/b").unwrap();
        store.record_link("example.com", "/a").unwrap();
        store.record_link("example.com", "/b").unwrap();
        store.record_link("example.com", "/c").unwrap();

        let persisted = read_file(&store);
        assert_eq!(persisted["example.com"], vec!["/b", "/a", "/b", "/c"]);
    }

    #[test]
    fn test_file_is_complete_snapshot_after_every_write() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        for i in 0..5 {
            store
                .record_link("example.com", &format!("/p{}", i))
                .unwrap();

            // After each successful return the file must parse and contain
            // everything recorded so far.
            let persisted = read_file(&store);
            assert_eq!(persisted["example.com"].len(), i + 1);
        }
    }

    #[test]
    fn test_multiple_domains() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.record_link("a.com", "/1").unwrap();
        store.record_link("b.com", "/2").unwrap();
        store.record_link("a.com", "/3").unwrap();

        let persisted = read_file(&store);
        assert_eq!(persisted.len(), 2);
        assert_eq!(persisted["a.com"], vec!["/1", "/3"]);
        assert_eq!(persisted["b.com"], vec!["/2"]);
    }

    #[test]
    fn test_no_leftover_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.record_link("example.com", "/p1").unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec!["links.json"]);
    }

    #[test]
    fn test_persist_error_surfaces() {
        // Pointing the store into a missing directory makes the temp write
        // fail; the error must come back to the caller, not panic.
        let store = JsonStore::new("/nonexistent-dir/links.json");
        assert!(store.record_link("example.com", "/p1").is_err());
    }

    #[test]
    fn test_concurrent_writers_do_not_corrupt() {
        use std::sync::Arc;

        let dir = TempDir::new().unwrap();
        let store = Arc::new(store_in(&dir));

        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..10 {
                        store
                            .record_link(&format!("d{}.com", worker), &format!("/p{}", i))
                            .unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let persisted = read_file(&store);
        assert_eq!(persisted.len(), 4);
        for worker in 0..4 {
            assert_eq!(persisted[&format!("d{}.com", worker)].len(), 10);
        }
    }
}
