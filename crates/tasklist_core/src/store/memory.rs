//! In-memory key/value store.
//!
//! Backs tests and ephemeral sessions. An optional byte quota reproduces the
//! quota-exceeded failure of browser-style local storage.

use super::{KeyValueStore, StoreError, StoreResult};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: BTreeMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects writes once keys plus values exceed
    /// `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Seeds a raw entry without quota checks.
    pub fn insert_raw(&mut self, key: impl Into<String>, blob: impl Into<String>) {
        self.entries.insert(key.into(), blob.into());
    }

    /// Total bytes of all keys and values currently stored.
    pub fn used_bytes(&self) -> usize {
        self.entries
            .iter()
            .map(|(key, value)| key.len() + value.len())
            .sum()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, blob: &str) -> StoreResult<()> {
        if let Some(quota_bytes) = self.quota_bytes {
            let replaced = self
                .entries
                .get(key)
                .map_or(0, |old| key.len() + old.len());
            let required_bytes = self.used_bytes() - replaced + key.len() + blob.len();
            if required_bytes > quota_bytes {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    required_bytes,
                    quota_bytes,
                });
            }
        }
        self.entries.insert(key.to_string(), blob.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryKeyValueStore;
    use crate::store::{KeyValueStore, StoreError};

    #[test]
    fn quota_rejects_oversized_write_and_keeps_old_value() {
        let mut store = MemoryKeyValueStore::with_quota(16);
        store.save("k", "short").unwrap();

        let err = store.save("k", "this value is far too long").unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { .. }));
        assert_eq!(store.load("k").unwrap().as_deref(), Some("short"));
    }

    #[test]
    fn overwrite_does_not_double_count_existing_entry() {
        let mut store = MemoryKeyValueStore::with_quota(10);
        store.save("k", "12345678").unwrap();
        store.save("k", "87654321").unwrap();
        assert_eq!(store.used_bytes(), 9);
    }
}
