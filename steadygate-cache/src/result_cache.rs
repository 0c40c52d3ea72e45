//! The namespaced result cache.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use steadygate_core::ConfigError;
use tracing::debug;

use crate::clock::{Clock, MonotonicClock};
use crate::config::NamespaceConfig;
use crate::namespace::CacheNamespace;
use crate::stats::CacheStats;
use crate::store::{Lookup, NamespaceStore};

/// Bounded, TTL-based memoization keyed by `(namespace, input)`.
///
/// Namespaces are either registered up front with their own
/// [`NamespaceConfig`] or created on first use with the default config.
/// Callers need no external locking: the namespace registry is a
/// `DashMap` and each namespace guards its own entries.
pub struct ResultCache<V> {
    namespaces: DashMap<CacheNamespace, Arc<NamespaceStore<V>>>,
    default_config: NamespaceConfig,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> ResultCache<V> {
    /// Cache whose lazily created namespaces use `default_config`.
    ///
    /// # Errors
    /// Fails when the config has a zero TTL or zero capacity.
    pub fn new(default_config: NamespaceConfig) -> Result<Self, ConfigError> {
        Self::with_clock(default_config, Arc::new(MonotonicClock))
    }

    /// Same as [`ResultCache::new`] with an injected clock.
    pub fn with_clock(
        default_config: NamespaceConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        default_config.validate()?;
        Ok(Self {
            namespaces: DashMap::new(),
            default_config,
            clock,
        })
    }

    /// Register `namespace` with its own limits.
    ///
    /// Registering an existing namespace replaces it, dropping its entries
    /// and counters.
    pub fn register(
        &self,
        namespace: CacheNamespace,
        config: NamespaceConfig,
    ) -> Result<(), ConfigError> {
        config.validate()?;
        debug!(
            namespace = %namespace,
            ttl = ?config.ttl,
            max_entries = config.max_entries,
            "Registered cache namespace"
        );
        self.namespaces
            .insert(namespace, Arc::new(NamespaceStore::new(config)));
        Ok(())
    }

    /// Return the cached value for `key`, or compute, store and return it.
    ///
    /// `compute` runs outside any lock and at most once per call. Two
    /// concurrent misses on one key may both compute; the later write wins.
    pub fn get_or_compute<F>(&self, namespace: &CacheNamespace, key: &str, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        let store = self.store(namespace);

        match store.lookup(key, self.clock.now()) {
            Lookup::Hit(value) => value,
            Lookup::Unavailable => compute(),
            Lookup::Miss => {
                let value = compute();
                store.insert(key, value.clone(), self.clock.now());
                value
            }
        }
    }

    /// Drop one entry. Returns whether it was present.
    pub fn invalidate(&self, namespace: &CacheNamespace, key: &str) -> bool {
        self.existing(namespace)
            .map(|store| store.invalidate(key))
            .unwrap_or(false)
    }

    /// Drop every entry in `namespace`. Counters are kept.
    pub fn clear(&self, namespace: &CacheNamespace) {
        if let Some(store) = self.existing(namespace) {
            store.clear();
        }
    }

    /// Entries currently held, expired ones not yet swept included.
    pub fn len(&self, namespace: &CacheNamespace) -> usize {
        self.existing(namespace).map(|store| store.len()).unwrap_or(0)
    }

    pub fn is_empty(&self, namespace: &CacheNamespace) -> bool {
        self.len(namespace) == 0
    }

    /// Counters for `namespace`; all zero if it was never used.
    pub fn stats(&self, namespace: &CacheNamespace) -> CacheStats {
        self.existing(namespace)
            .map(|store| store.stats())
            .unwrap_or_default()
    }

    /// Effective config for `namespace`.
    pub fn namespace_config(&self, namespace: &CacheNamespace) -> NamespaceConfig {
        self.existing(namespace)
            .map(|store| store.config().clone())
            .unwrap_or_else(|| self.default_config.clone())
    }

    /// Names of every namespace created so far, sorted.
    pub fn namespaces(&self) -> Vec<CacheNamespace> {
        let mut names: Vec<_> = self.namespaces.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    fn existing(&self, namespace: &CacheNamespace) -> Option<Arc<NamespaceStore<V>>> {
        self.namespaces.get(namespace).map(|store| Arc::clone(&store))
    }

    fn store(&self, namespace: &CacheNamespace) -> Arc<NamespaceStore<V>> {
        if let Some(store) = self.existing(namespace) {
            return store;
        }

        // DashMap's entry API handles the get-or-insert atomically
        let store = self
            .namespaces
            .entry(namespace.clone())
            .or_insert_with(|| Arc::new(NamespaceStore::new(self.default_config.clone())));
        Arc::clone(&store)
    }
}

impl<V> fmt::Debug for ResultCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultCache")
            .field("namespaces", &self.namespaces.len())
            .field("default_config", &self.default_config)
            .field("clock", &self.clock)
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
