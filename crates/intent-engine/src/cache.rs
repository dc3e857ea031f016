//! Capacity-bounded, TTL-aware memoization cache.
//!
//! Least-recently-used entries are evicted once `capacity` is reached, and an
//! entry older than `ttl` is treated as absent (and dropped) on lookup. The
//! cache uses interior locking, so one instance can be shared by reference
//! between concurrent request handlers.

use std::hash::Hash;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;
use parking_lot::Mutex;

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

pub struct TtlCache<K: Hash + Eq, V> {
    entries: Mutex<LruCache<K, Entry<V>>>,
    ttl: Duration,
}

impl<K: Hash + Eq, V: Clone> TtlCache<K, V> {
    pub fn new(capacity: NonZeroUsize, ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up `key` as of `now`. Expired entries are removed and reported as
    /// missing.
    pub fn get_at(&self, key: &K, now: Instant) -> Option<V> {
        let mut entries = self.entries.lock();
        let fresh = entries
            .get(key)
            .map(|e| now.saturating_duration_since(e.inserted_at) < self.ttl)?;
        if !fresh {
            entries.pop(key);
            return None;
        }
        entries.get(key).map(|e| e.value.clone())
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    /// Insert `value` stamped with `now`, evicting the least-recently-used entry
    /// when full.
    pub fn insert_at(&self, key: K, value: V, now: Instant) {
        self.entries.lock().put(
            key,
            Entry {
                value,
                inserted_at: now,
            },
        );
    }

    pub fn insert(&self, key: K, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    /// Number of stored entries, including any that have expired but not yet
    /// been looked up.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl<K: Hash + Eq + Clone, V: Clone> TtlCache<K, V> {
    /// Drop every entry that has expired as of `now`. Returns how many were removed.
    pub fn purge_expired_at(&self, now: Instant) -> usize {
        let mut entries = self.entries.lock();
        let expired: Vec<K> = entries
            .iter()
            .filter(|(_, e)| now.saturating_duration_since(e.inserted_at) >= self.ttl)
            .map(|(k, _)| k.clone())
            .collect();
        for key in &expired {
            entries.pop(key);
        }
        expired.len()
    }
}
