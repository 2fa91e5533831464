//! Single-flight result cache
//!
//! Results are keyed by a string fingerprint. Each key maps to a shared
//! `OnceCell`, so concurrent requests for the same fingerprint run the
//! computation exactly once: the first caller computes, the others block on
//! the cell and receive the same value.
//!
//! The store is in-memory and cannot fail. When an entry cannot be kept
//! (capacity 0, or evicted while still being computed) the computed value is
//! still returned to every waiting caller.

use crate::config::CachePolicy;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Cache counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Lookups answered from the cache (including joined in-flight computations)
    pub hits: u64,
    /// Lookups that ran the computation
    pub misses: u64,
    /// Entries currently held
    pub len: usize,
}

struct CacheInner<V> {
    entries: HashMap<String, Arc<OnceCell<V>>>,
    /// Insertion order, oldest first
    order: VecDeque<String>,
}

/// Fingerprint-keyed cache with at-most-one computation per key
pub struct ResultCache<V> {
    policy: CachePolicy,
    inner: Mutex<CacheInner<V>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<V: Clone> ResultCache<V> {
    /// Create an empty cache
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Return the cached value for `key`, computing it with `compute` on a miss
    pub fn get_or_compute<F>(&self, key: &str, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if self.policy == CachePolicy::Capacity(0) {
            self.misses.fetch_add(1, Ordering::Relaxed);
            return compute();
        }

        // Hold the map lock only long enough to find or reserve the slot
        let cell = {
            let mut inner = self.inner.lock();
            match inner.entries.get(key) {
                Some(cell) => Arc::clone(cell),
                None => {
                    let cell = Arc::new(OnceCell::new());
                    inner.entries.insert(key.to_string(), Arc::clone(&cell));
                    inner.order.push_back(key.to_string());
                    self.evict_overflow(&mut inner);
                    cell
                }
            }
        };

        let mut computed = false;
        let value = cell
            .get_or_init(|| {
                computed = true;
                compute()
            })
            .clone();

        if computed {
            self.misses.fetch_add(1, Ordering::Relaxed);
            log::debug!("Cache miss for '{}'", key);
        } else {
            self.hits.fetch_add(1, Ordering::Relaxed);
            log::debug!("Cache hit for '{}'", key);
        }

        value
    }

    /// Cached value for `key`, if computed
    pub fn get(&self, key: &str) -> Option<V> {
        let inner = self.inner.lock();
        inner.entries.get(key).and_then(|cell| cell.get().cloned())
    }

    /// Drop every entry; in-flight computations still complete for their callers
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        let dropped = inner.entries.len();
        inner.entries.clear();
        inner.order.clear();
        log::debug!("Cleared {} cached results", dropped);
    }

    /// Number of entries held
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// True when no entries are held
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            len: self.len(),
        }
    }

    fn evict_overflow(&self, inner: &mut CacheInner<V>) {
        let capacity = match self.policy {
            CachePolicy::Unbounded => return,
            CachePolicy::Capacity(n) => n,
        };
        while inner.entries.len() > capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            inner.entries.remove(&oldest);
            log::debug!("Evicted cached result '{}'", oldest);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Barrier;

    #[test]
    fn test_hit_after_miss() {
        let cache = ResultCache::new(CachePolicy::Unbounded);
        assert_eq!(cache.get_or_compute("a", || 1), 1);
        assert_eq!(cache.get_or_compute("a", || 2), 1);
        assert_eq!(cache.get("a"), Some(1));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.len, 1);
    }

    #[test]
    fn test_clear_forces_recompute() {
        let cache = ResultCache::new(CachePolicy::Unbounded);
        cache.get_or_compute("a", || 1);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get_or_compute("a", || 2), 2);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let cache = ResultCache::new(CachePolicy::Capacity(2));
        cache.get_or_compute("a", || 1);
        cache.get_or_compute("b", || 2);
        cache.get_or_compute("c", || 3);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some(2));
        assert_eq!(cache.get("c"), Some(3));
    }

    #[test]
    fn test_zero_capacity_disables_caching() {
        let cache = ResultCache::new(CachePolicy::Capacity(0));
        assert_eq!(cache.get_or_compute("a", || 1), 1);
        assert_eq!(cache.get_or_compute("a", || 2), 2);
        assert!(cache.is_empty());
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_single_flight_under_contention() {
        let cache = Arc::new(ResultCache::new(CachePolicy::Unbounded));
        let computations = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let computations = Arc::clone(&computations);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    cache.get_or_compute("shared", || {
                        computations.fetch_add(1, Ordering::SeqCst);
                        std::thread::sleep(std::time::Duration::from_millis(20));
                        42
                    })
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 42);
        }
        assert_eq!(computations.load(Ordering::SeqCst), 1);
        assert_eq!(cache.stats().misses, 1);
        assert_eq!(cache.stats().hits, 7);
    }
}
