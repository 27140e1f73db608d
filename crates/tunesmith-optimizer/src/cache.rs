// SPDX-FileCopyrightText: 2026 Tunesmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bounded TTL cache for optimization results.
//!
//! Keys are sha256 digests of the canonical request serialization, so
//! identical requests hit the same slot regardless of field ordering in
//! the caller. Eviction drops expired entries first, then the oldest half
//! when the cache is still over capacity.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;

/// Digest a cacheable request into its hex cache key.
pub(crate) fn cache_key<T: Serialize>(request: &T) -> String {
    let mut hasher = Sha256::new();
    // Struct serialization to JSON is infallible for our request types.
    let bytes = serde_json::to_vec(request).unwrap_or_default();
    hasher.update(&bytes);
    hex::encode(hasher.finalize())
}

struct CacheEntry<T> {
    value: T,
    inserted_at: Instant,
}

/// Mutex-guarded map with per-entry TTL and a hard size cap.
pub(crate) struct TtlCache<T> {
    entries: Mutex<HashMap<String, CacheEntry<T>>>,
    ttl: Duration,
    max_entries: usize,
}

impl<T: Clone> TtlCache<T> {
    pub(crate) fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            max_entries: max_entries.max(1),
        }
    }

    /// Fetch a live entry; expired entries read as misses and are removed.
    pub(crate) fn get(&self, key: &str) -> Option<T> {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        match entries.get(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Insert a value, evicting as needed to stay within the size cap.
    pub(crate) fn insert(&self, key: String, value: T) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");

        if entries.len() >= self.max_entries && !entries.contains_key(&key) {
            entries.retain(|_, e| e.inserted_at.elapsed() < self.ttl);

            if entries.len() >= self.max_entries {
                // Still full of live entries: drop the oldest half.
                let mut by_age: Vec<(String, Instant)> = entries
                    .iter()
                    .map(|(k, e)| (k.clone(), e.inserted_at))
                    .collect();
                by_age.sort_by_key(|(_, inserted_at)| *inserted_at);
                let evict = by_age.len().div_ceil(2);
                for (old_key, _) in by_age.into_iter().take(evict) {
                    entries.remove(&old_key);
                }
                debug!(evicted = evict, "cache over capacity, dropped oldest half");
            }
        }

        entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Drop every entry.
    pub(crate) fn clear(&self) {
        self.entries.lock().expect("cache lock poisoned").clear();
    }

    /// Number of entries currently held, live or expired.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.lock().expect("cache lock poisoned").len()
    }
}
