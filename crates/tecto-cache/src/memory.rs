// SPDX-License-Identifier: Apache-2.0
//! The in-memory partition/materialization cache (§4.5).

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::key::CacheKey;

struct Entry<V> {
    value: V,
    expires_at: Option<Instant>,
}

impl<V> Entry<V> {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|expires_at| now < expires_at)
    }
}

/// Snapshot of the cache's hit/miss/entry counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheMetrics {
    /// Successful `try_get` lookups.
    pub hit_count: u64,
    /// Unsuccessful `try_get` lookups (including expired entries).
    pub miss_count: u64,
    /// Number of entries currently stored (not yet evicted).
    pub count: usize,
}

impl CacheMetrics {
    /// Fraction of lookups that hit, derived from `hit_count`/`miss_count`
    /// sampled together. Returns `0.0` if no lookups have occurred.
    #[must_use]
    pub fn hit_ratio(self) -> f64 {
        let total = self.hit_count + self.miss_count;
        if total == 0 {
            0.0
        } else {
            self.hit_count as f64 / total as f64
        }
    }
}

/// Thread-safe cache mapping [`CacheKey`] to a cloneable value, with
/// optional per-entry TTL.
///
/// Reused for both materialization results and partition results: the
/// value type is a caller-chosen `V` so this crate stays ignorant of what
/// it is caching. Internal locking is a single [`Mutex`] around a
/// [`BTreeMap`] — entries for one topology are contiguous (see [`CacheKey`]),
/// so [`invalidate_by_topology`](Self::invalidate_by_topology) is a single
/// range removal rather than a full scan.
pub struct PartitionCache<V> {
    entries: Mutex<BTreeMap<CacheKey, Entry<V>>>,
    hit_count: AtomicU64,
    miss_count: AtomicU64,
}

impl<V: Clone> PartitionCache<V> {
    /// Builds an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
            hit_count: AtomicU64::new(0),
            miss_count: AtomicU64::new(0),
        }
    }

    /// Looks up `key`. An expired entry counts as a miss but is not removed
    /// here; call [`evict_expired`](Self::evict_expired) to reclaim it.
    pub fn try_get(&self, key: &CacheKey) -> Option<V> {
        let now = Instant::now();
        let guard = lock(&self.entries);
        let found = guard
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone());
        drop(guard);
        if found.is_some() {
            self.hit_count.fetch_add(1, Ordering::Relaxed);
        } else {
            self.miss_count.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    /// Inserts or replaces the entry for `key`, with an optional TTL.
    pub fn set(&self, key: CacheKey, value: V, ttl: Option<Duration>) {
        let expires_at = ttl.map(|ttl| Instant::now() + ttl);
        let mut guard = lock(&self.entries);
        guard.insert(key, Entry { value, expires_at });
    }

    /// Removes every entry whose TTL has elapsed.
    pub fn evict_expired(&self) {
        let now = Instant::now();
        let mut guard = lock(&self.entries);
        guard.retain(|_, entry| entry.is_live(now));
    }

    /// Removes every entry.
    pub fn clear(&self) {
        let mut guard = lock(&self.entries);
        guard.clear();
    }

    /// Removes every entry whose [`CacheKey::topology`] equals `topology`,
    /// regardless of variant (cutoff/policy).
    pub fn invalidate_by_topology(&self, topology: tecto_ids::Hash) {
        let mut guard = lock(&self.entries);
        guard.retain(|key, _| key.topology != topology);
    }

    /// Current hit/miss/count metrics, sampled together under one lock so
    /// `count` reflects the same instant the counters were read at.
    pub fn metrics(&self) -> CacheMetrics {
        let guard = lock(&self.entries);
        CacheMetrics {
            hit_count: self.hit_count.load(Ordering::Relaxed),
            miss_count: self.miss_count.load(Ordering::Relaxed),
            count: guard.len(),
        }
    }
}

impl<V: Clone> Default for PartitionCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn key(n: u8) -> CacheKey {
        CacheKey::new([n; 32], &[0u8])
    }

    #[test]
    fn miss_then_hit() {
        let cache: PartitionCache<u32> = PartitionCache::new();
        assert_eq!(cache.try_get(&key(1)), None);
        cache.set(key(1), 42, None);
        assert_eq!(cache.try_get(&key(1)), Some(42));
        let metrics = cache.metrics();
        assert_eq!(metrics.hit_count, 1);
        assert_eq!(metrics.miss_count, 1);
        assert_eq!(metrics.count, 1);
    }

    #[test]
    fn expired_entry_counts_as_miss() {
        let cache: PartitionCache<u32> = PartitionCache::new();
        cache.set(key(1), 42, Some(Duration::from_nanos(1)));
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(cache.try_get(&key(1)), None);
    }

    #[test]
    fn evict_expired_removes_stale_entries() {
        let cache: PartitionCache<u32> = PartitionCache::new();
        cache.set(key(1), 1, Some(Duration::from_nanos(1)));
        cache.set(key(2), 2, None);
        std::thread::sleep(Duration::from_millis(5));
        cache.evict_expired();
        assert_eq!(cache.metrics().count, 1);
    }

    #[test]
    fn invalidate_by_topology_drops_every_variant() {
        let cache: PartitionCache<u32> = PartitionCache::new();
        let topology = [7u8; 32];
        cache.set(CacheKey::new(topology, &[1]), 1, None);
        cache.set(CacheKey::new(topology, &[2]), 2, None);
        cache.set(CacheKey::new([8u8; 32], &[1]), 3, None);
        cache.invalidate_by_topology(topology);
        assert_eq!(cache.metrics().count, 1);
    }

    #[test]
    fn hit_ratio_is_zero_with_no_lookups() {
        let metrics = CacheMetrics {
            hit_count: 0,
            miss_count: 0,
            count: 0,
        };
        assert_eq!(metrics.hit_ratio(), 0.0);
    }
}
