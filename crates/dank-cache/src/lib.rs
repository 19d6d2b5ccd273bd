//! In-memory TTL cache with lazy expiry.
//!
//! This crate provides the freshness layer used by the catalog client:
//! - Per-entry absolute expiry computed at insertion time
//! - Lazy purge of expired entries on read (no background sweeper)
//! - Thread-safe access via a non-poisoning mutex
//! - Injectable clock for deterministic tests
//!
//! There is no size bound. Every distinct key stays resident until it is read
//! after expiring, overwritten, removed, or the cache is cleared.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use dank_cache::TtlCache;
//!
//! let cache = TtlCache::new(Duration::from_secs(5));
//! cache.set("https://api.example.com/items", vec![1, 2, 3]);
//!
//! assert_eq!(cache.get("https://api.example.com/items"), Some(vec![1, 2, 3]));
//! ```

mod cache;
mod clock;

pub use cache::{CacheEntry, CacheStats, TtlCache};
pub use clock::{Clock, ManualClock, SystemClock};
