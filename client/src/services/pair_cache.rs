//! Persistent cache for the ranked top-pairs list
//!
//! One key, no expiry. A value that no longer deserializes is deleted and
//! reported as a miss.

use std::sync::Arc;

use shared::CacheEntry;

use crate::error::ClientResult;
use crate::storage::KeyValueStore;

/// Well-known storage key for the ranked list
pub const CACHE_KEY: &str = "top_pairs_data";

/// Ranked-list cache over a key-value store
#[derive(Clone)]
pub struct PairCache {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl PairCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, CACHE_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the cached list. Missing, unreadable and corrupted values are all
    /// a miss; corrupted values are removed.
    pub fn load(&self) -> Option<CacheEntry> {
        let data = match self.store.get(&self.key) {
            Ok(Some(data)) => data,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to read top pairs cache: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<CacheEntry>(&data) {
            Ok(entry) => {
                tracing::debug!("Loaded {} top pairs from cache", entry.len());
                Some(entry)
            }
            Err(e) => {
                tracing::warn!("Top pairs cache corrupted, discarding: {}", e);
                if let Err(e) = self.store.delete(&self.key) {
                    tracing::warn!("Failed to remove corrupted cache entry: {}", e);
                }
                None
            }
        }
    }

    /// Persist the list, replacing any previous value
    pub fn store(&self, entry: &CacheEntry) -> ClientResult<()> {
        let data = serde_json::to_string(entry)?;
        self.store.set(&self.key, &data)?;
        tracing::debug!("Saved {} top pairs to cache", entry.len());
        Ok(())
    }

    /// Drop the cached list
    pub fn invalidate(&self) -> ClientResult<()> {
        self.store.delete(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde_json::json;
    use shared::TopPairEntry;

    fn cache() -> (Arc<MemoryStore>, PairCache) {
        let store = Arc::new(MemoryStore::new());
        let cache = PairCache::new(store.clone());
        (store, cache)
    }

    fn sample() -> CacheEntry {
        serde_json::from_value(json!([
            { "Plant_A": "Triticum", "Plant_B": "Trifolium", "Score": 93.1, "Future_Score": 95.0 },
            { "Plant_A": "Zea", "Plant_B": "Phaseolus", "Score": 88.4, "Zone": "Tell", "States": ["Blida"] }
        ]))
        .unwrap()
    }

    #[test]
    fn test_miss_on_empty_store() {
        let (_, cache) = cache();
        assert_eq!(cache.load(), None);
    }

    #[test]
    fn test_store_then_load() {
        let (_, cache) = cache();
        let entry = sample();
        cache.store(&entry).unwrap();
        assert_eq!(cache.load(), Some(entry));
    }

    #[test]
    fn test_empty_list_is_a_hit() {
        let (_, cache) = cache();
        cache.store(&Vec::<TopPairEntry>::new()).unwrap();
        assert_eq!(cache.load(), Some(vec![]));
    }

    #[test]
    fn test_store_overwrites() {
        let (_, cache) = cache();
        cache.store(&sample()).unwrap();
        let shorter: CacheEntry = sample().into_iter().take(1).collect();
        cache.store(&shorter).unwrap();
        assert_eq!(cache.load().unwrap().len(), 1);
    }

    #[test]
    fn test_corruption_is_self_healing() {
        let (store, cache) = cache();
        store.set(CACHE_KEY, "{\"Plant_A\": trunc").unwrap();

        assert_eq!(cache.load(), None);
        assert_eq!(store.get(CACHE_KEY).unwrap(), None);
    }

    #[test]
    fn test_wrong_shape_counts_as_corruption() {
        let (store, cache) = cache();
        store.set(CACHE_KEY, "{\"pairs\": []}").unwrap();

        assert_eq!(cache.load(), None);
        assert_eq!(store.get(CACHE_KEY).unwrap(), None);
    }

    #[test]
    fn test_invalidate() {
        let (store, cache) = cache();
        cache.store(&sample()).unwrap();
        cache.invalidate().unwrap();
        assert_eq!(store.get(CACHE_KEY).unwrap(), None);
        assert_eq!(cache.load(), None);
    }

    #[test]
    fn test_custom_key() {
        let store = Arc::new(MemoryStore::new());
        let cache = PairCache::with_key(store.clone(), "ranks_v2");
        cache.store(&sample()).unwrap();
        assert!(store.get("ranks_v2").unwrap().is_some());
        assert!(store.get(CACHE_KEY).unwrap().is_none());
    }
}
