//! Typed, caching HTTP client for the Dank Memer data catalog.
//!
//! The catalog is a read-only set of JSON collections (items, creatures,
//! tools, ...). This crate fetches them over HTTP, keeps each response fresh
//! in an in-memory TTL cache, retries when rate limited, and lets callers
//! filter collections in memory without hitting the network again.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use dank_client::{DankClient, Filter, Result};
//!
//! # async fn example() -> Result<()> {
//! let client = DankClient::builder()
//!     .cache_ttl(Duration::from_secs(30))
//!     .user_agent("my-bot/1.0")
//!     .build()?;
//!
//! // Tools priced between 10 and 20k whose name looks like "rod"
//! let filter = Filter::range("price", 10.0, 20_000.0).and(Filter::fuzzy("name", "rod"));
//! for tool in client.tools().query(&filter).await? {
//!     println!("{:?}", tool.name());
//! }
//!
//! // Served from cache, no second request
//! let everything = client.tools().list().await?;
//! println!("{} tools", everything.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Collections
//!
//! `all`, `baits`, `buckets`, `creatures`, `decorations`, `events`, `items`,
//! `locations`, `npcs`, `seasons`, `skills`, `skillsdata`, `tanks`, `tools`.
//! Any other path can be reached through [`DankClient::collection`].

pub mod client;
pub mod collection;
pub mod config;
pub mod error;
pub mod fetch;
pub mod resource;

pub use client::{ClientBuilder, DankClient};
pub use collection::Collection;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use fetch::{Fetcher, Records};
pub use resource::Resource;

// Re-export the query types so callers need a single dependency
pub use dank_cache::CacheStats;
pub use dank_filter::{DEFAULT_FUZZY_CUTOFF, Filter, Predicate, Record, RecordId};
