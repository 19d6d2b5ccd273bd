//! TTL cache with lazy expiry on read.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::clock::{Clock, SystemClock};

/// Entry stored in the cache.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// Cached value.
    pub value: V,

    /// Absolute instant after which the entry is stale. `None` when the
    /// TTL reaches past what `Instant` can represent; such entries never
    /// expire.
    pub expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    /// Create an entry that expires `ttl` after `now`.
    pub fn new(value: V, now: Instant, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: now.checked_add(ttl),
        }
    }

    /// An entry is expired once `now` reaches its expiry instant.
    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Entries currently resident, including expired ones not yet read.
    pub size: usize,
    /// Reads that returned a live value.
    pub hits: u64,
    /// Reads that found nothing or found an expired entry.
    pub misses: u64,
    /// Expired entries purged on read.
    pub expirations: u64,
}

/// Inner state protected by the mutex.
struct CacheInner<V> {
    entries: HashMap<String, CacheEntry<V>>,
    hits: u64,
    misses: u64,
    expirations: u64,
}

/// Key/value store where every entry carries an absolute expiry.
///
/// Expired entries are never returned. They are removed the next time their
/// key is read; nothing sweeps them proactively. Value and expiry are written
/// together under one lock, so readers never see a torn entry.
///
/// Values are cloned out on `get`; wrap large values in an `Arc`.
pub struct TtlCache<V, C: Clock = SystemClock> {
    inner: Mutex<CacheInner<V>>,
    ttl: Duration,
    clock: C,
}

impl<V: Clone> TtlCache<V, SystemClock> {
    /// Create a cache using the system clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<V: Clone, C: Clock> TtlCache<V, C> {
    /// Create a cache with a custom time source.
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                hits: 0,
                misses: 0,
                expirations: 0,
            }),
            ttl,
            clock,
        }
    }

    /// Get the configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up a live value.
    ///
    /// Returns `None` when the key is absent or expired. An expired entry is
    /// removed as a side effect, so repeated reads keep returning `None`.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        match inner.entries.get(key) {
            None => {
                inner.misses += 1;
                None
            }
            Some(entry) if !entry.is_expired(now) => {
                let value = entry.value.clone();
                inner.hits += 1;
                trace!(key = %key, "Cache hit");
                Some(value)
            }
            Some(_) => {
                inner.entries.remove(key);
                inner.misses += 1;
                inner.expirations += 1;
                debug!(key = %key, "Cache entry expired, removed");
                None
            }
        }
    }

    /// Store a value, replacing any existing entry for the key.
    pub fn set(&self, key: impl Into<String>, value: V) {
        let key = key.into();
        let entry = CacheEntry::new(value, self.clock.now(), self.ttl);

        let mut inner = self.inner.lock();
        inner.entries.insert(key, entry);
        trace!(cache_size = inner.entries.len(), "Cache entry stored");
    }

    /// Remove a single entry, returning its value if it was still live.
    pub fn remove(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        self.inner
            .lock()
            .entries
            .remove(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value)
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        let count = inner.entries.len();
        inner.entries.clear();
        debug!(count = count, "Cache cleared");
    }

    /// Number of resident entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Check if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        CacheStats {
            size: inner.entries.len(),
            hits: inner.hits,
            misses: inner.misses,
            expirations: inner.expirations,
        }
    }
}

impl<V, C: Clock> std::fmt::Debug for TtlCache<V, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("ttl", &self.ttl)
            .field("size", &self.inner.lock().entries.len())
            .finish()
    }
}
