//! steadygate Cache - Namespaced Result Cache
//!
//! A bounded, time-to-live memoization store keyed by input string and
//! partitioned into namespaces (one per validator kind). Namespaces never
//! share keys, capacity or TTL.
//!
//! # Policy
//!
//! - TTL runs from the last write and is never refreshed by reads.
//! - A full namespace evicts its least-recently-used entry, where a hit and
//!   a write both count as a use.
//! - Concurrent misses on one key may compute twice; the last write wins.
//! - Nothing here returns an error at request time. A store whose lock is
//!   poisoned stops caching and every call recomputes.

mod clock;
mod config;
mod namespace;
mod result_cache;
mod stats;
mod store;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::NamespaceConfig;
pub use namespace::CacheNamespace;
pub use result_cache::ResultCache;
pub use stats::CacheStats;
