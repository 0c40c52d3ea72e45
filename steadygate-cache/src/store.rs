//! Storage for a single namespace.
//!
//! Entries live in an [`LruCache`] sized to the namespace's `max_entries`.
//! Each slot carries its write instant; expiry is checked on read.

use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

use lru::LruCache;
use tracing::{trace, warn};

use crate::config::NamespaceConfig;
use crate::stats::{CacheStats, StatCounters};

#[derive(Debug)]
struct Slot<V> {
    value: V,
    written_at: Instant,
}

/// Result of probing a store.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Lookup<V> {
    Hit(V),
    Miss,
    /// The store cannot be used; compute without caching.
    Unavailable,
}

/// One namespace: its limits, entries and counters.
#[derive(Debug)]
pub(crate) struct NamespaceStore<V> {
    config: NamespaceConfig,
    entries: Mutex<LruCache<String, Slot<V>>>,
    counters: StatCounters,
}

impl<V: Clone> NamespaceStore<V> {
    pub(crate) fn new(config: NamespaceConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            config,
            entries: Mutex::new(LruCache::new(capacity)),
            counters: StatCounters::default(),
        }
    }

    pub(crate) fn config(&self) -> &NamespaceConfig {
        &self.config
    }

    fn lock(&self) -> Option<MutexGuard<'_, LruCache<String, Slot<V>>>> {
        match self.entries.lock() {
            Ok(guard) => Some(guard),
            Err(_) => {
                warn!("Cache namespace lock poisoned, bypassing cache");
                None
            }
        }
    }

    /// Probe for `key` at `now`. A hit refreshes recency but not TTL.
    pub(crate) fn lookup(&self, key: &str, now: Instant) -> Lookup<V> {
        let Some(mut entries) = self.lock() else {
            return Lookup::Unavailable;
        };

        let expired = match entries.peek(key) {
            None => {
                self.counters.record_miss();
                return Lookup::Miss;
            }
            Some(slot) => now.saturating_duration_since(slot.written_at) >= self.config.ttl,
        };

        if expired {
            entries.pop(key);
            self.counters.record_expiration();
            self.counters.record_miss();
            return Lookup::Miss;
        }

        match entries.get(key) {
            Some(slot) => {
                self.counters.record_hit();
                Lookup::Hit(slot.value.clone())
            }
            None => Lookup::Miss,
        }
    }

    /// Write `value` under `key`, stamped `now`, evicting if full.
    pub(crate) fn insert(&self, key: &str, value: V, now: Instant) {
        let Some(mut entries) = self.lock() else {
            return;
        };

        let slot = Slot {
            value,
            written_at: now,
        };
        // `push` hands back either the overwritten entry or the evicted one.
        if let Some((victim, _)) = entries.push(key.to_owned(), slot) {
            if victim != key {
                trace!(key = %victim, "Evicted least recently used entry");
                self.counters.record_eviction();
            }
        }
    }

    pub(crate) fn invalidate(&self, key: &str) -> bool {
        self.lock()
            .map(|mut entries| entries.pop(key).is_some())
            .unwrap_or(false)
    }

    pub(crate) fn clear(&self) {
        if let Some(mut entries) = self.lock() {
            entries.clear();
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub(crate) fn stats(&self) -> CacheStats {
        self.counters.snapshot(self.len())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn store(max_entries: usize) -> NamespaceStore<u32> {
        NamespaceStore::new(
            NamespaceConfig::new()
                .with_ttl(Duration::from_secs(10))
                .with_max_entries(max_entries),
        )
    }

    #[test]
    fn test_lookup_after_insert_hits() {
        let store = store(4);
        let now = Instant::now();
        assert_eq!(store.lookup("a", now), Lookup::Miss);

        store.insert("a", 1, now);
        assert_eq!(store.lookup("a", now), Lookup::Hit(1));
    }

    #[test]
    fn test_expired_entry_is_removed() {
        let store = store(4);
        let written = Instant::now();
        store.insert("a", 1, written);

        assert_eq!(
            store.lookup("a", written + Duration::from_secs(10)),
            Lookup::Miss
        );
        assert_eq!(store.len(), 0);
        assert_eq!(store.stats().expirations, 1);
    }

    #[test]
    fn test_least_recently_used_is_evicted() {
        let store = store(2);
        let now = Instant::now();
        store.insert("a", 1, now);
        store.insert("b", 2, now);
        store.insert("c", 3, now);

        assert_eq!(store.len(), 2);
        assert_eq!(store.lookup("a", now), Lookup::Miss);
        assert_eq!(store.lookup("b", now), Lookup::Hit(2));
        assert_eq!(store.lookup("c", now), Lookup::Hit(3));
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_hit_protects_entry_from_eviction() {
        let store = store(2);
        let now = Instant::now();
        store.insert("a", 1, now);
        store.insert("b", 2, now);
        assert_eq!(store.lookup("a", now), Lookup::Hit(1));

        store.insert("c", 3, now);
        assert_eq!(store.lookup("b", now), Lookup::Miss);
        assert_eq!(store.lookup("a", now), Lookup::Hit(1));
    }

    #[test]
    fn test_overwrite_does_not_evict() {
        let store = store(2);
        let now = Instant::now();
        store.insert("a", 1, now);
        store.insert("b", 2, now);
        store.insert("a", 10, now);

        assert_eq!(store.len(), 2);
        assert_eq!(store.lookup("a", now), Lookup::Hit(10));
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_overwrite_restarts_ttl() {
        let store = store(2);
        let written = Instant::now();
        store.insert("a", 1, written);
        store.insert("a", 2, written + Duration::from_secs(5));

        assert_eq!(
            store.lookup("a", written + Duration::from_secs(12)),
            Lookup::Hit(2)
        );
    }

    #[test]
    fn test_invalidate_and_clear() {
        let store = store(4);
        let now = Instant::now();
        store.insert("a", 1, now);
        store.insert("b", 2, now);

        assert!(store.invalidate("a"));
        assert!(!store.invalidate("a"));
        assert_eq!(store.len(), 1);

        store.clear();
        assert_eq!(store.len(), 0);
    }
}
