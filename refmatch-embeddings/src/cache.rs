//! L1 in-memory embedding cache using moka.
//!
//! TinyLFU admission policy, per-entry TTL. Keys are blake3 text hashes.

use std::time::Duration;

use moka::sync::Cache;

/// In-memory embedding cache.
pub struct L1MemoryCache {
    cache: Cache<String, Vec<f32>>,
}

impl L1MemoryCache {
    /// Create a new cache with the given max entry count.
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(3600))
            .time_to_live(Duration::from_secs(86400))
            .build();

        Self { cache }
    }

    /// Get an embedding by content hash.
    pub fn get(&self, content_hash: &str) -> Option<Vec<f32>> {
        self.cache.get(content_hash)
    }

    /// Insert an embedding keyed by content hash.
    pub fn insert(&self, content_hash: String, embedding: Vec<f32>) {
        self.cache.insert(content_hash, embedding);
    }

    /// Number of entries currently in the cache.
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invalidate all entries.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

/// blake3 hash of a text, usable as a cache key.
pub(crate) fn content_hash(text: &str) -> String {
    blake3::hash(text.as_bytes()).to_hex().to_string()
}
