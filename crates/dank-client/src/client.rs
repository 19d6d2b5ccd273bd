//! Main client implementation.

use std::sync::Arc;
use std::time::Duration;

use dank_cache::CacheStats;

use crate::collection::Collection;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::fetch::{Fetcher, Records};
use crate::resource::Resource;

/// Dank Memer catalog client.
///
/// Cheap to clone; clones share one HTTP connection pool and one cache.
/// Separate clients built from separate configs never share a cache.
///
/// # Example
///
/// ```no_run
/// use dank_client::{DankClient, Filter};
///
/// # async fn example() -> dank_client::Result<()> {
/// let client = DankClient::builder()
///     .user_agent("my-bot/1.0")
///     .build()?;
///
/// let swords = client
///     .items()
///     .query(&Filter::contains_any("name", ["sword"]))
///     .await?;
/// println!("{} swords", swords.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct DankClient {
    inner: Arc<Fetcher>,
}

impl DankClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client with default settings.
    pub fn new() -> Result<Self> {
        Self::from_config(ClientConfig::default())
    }

    /// Create a client from an explicit configuration.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            inner: Arc::new(Fetcher::new(config)?),
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &ClientConfig {
        self.inner.config()
    }

    /// Fetch a raw collection by resource path, through the cache.
    pub async fn fetch(&self, path: &str) -> Result<Records> {
        self.inner.fetch(path).await
    }

    /// Drop every cached collection.
    pub fn clear_cache(&self) {
        self.inner.clear_cache();
    }

    /// Get cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        self.inner.cache_stats()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Collection accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Accessor for an arbitrary resource path.
    pub fn collection(&self, path: impl Into<String>) -> Collection {
        Collection::new(self.clone(), path)
    }

    /// Accessor for a known catalog collection.
    pub fn resource(&self, resource: Resource) -> Collection {
        self.collection(resource.path())
    }

    /// Access the combined `/all` collection.
    pub fn all(&self) -> Collection {
        self.resource(Resource::All)
    }

    /// Access baits.
    pub fn baits(&self) -> Collection {
        self.resource(Resource::Baits)
    }

    /// Access buckets.
    pub fn buckets(&self) -> Collection {
        self.resource(Resource::Buckets)
    }

    /// Access creatures.
    pub fn creatures(&self) -> Collection {
        self.resource(Resource::Creatures)
    }

    /// Access decorations.
    pub fn decorations(&self) -> Collection {
        self.resource(Resource::Decorations)
    }

    /// Access events.
    pub fn events(&self) -> Collection {
        self.resource(Resource::Events)
    }

    /// Access items.
    pub fn items(&self) -> Collection {
        self.resource(Resource::Items)
    }

    /// Access locations.
    pub fn locations(&self) -> Collection {
        self.resource(Resource::Locations)
    }

    /// Access NPCs.
    pub fn npcs(&self) -> Collection {
        self.resource(Resource::Npcs)
    }

    /// Access seasons.
    pub fn seasons(&self) -> Collection {
        self.resource(Resource::Seasons)
    }

    /// Access skills.
    pub fn skills(&self) -> Collection {
        self.resource(Resource::Skills)
    }

    /// Access skill data.
    pub fn skills_data(&self) -> Collection {
        self.resource(Resource::SkillsData)
    }

    /// Access tanks.
    pub fn tanks(&self) -> Collection {
        self.resource(Resource::Tanks)
    }

    /// Access tools.
    pub fn tools(&self) -> Collection {
        self.resource(Resource::Tools)
    }
}

/// Builder for creating a DankClient.
#[derive(Debug, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the catalog root URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set how long fetched collections stay fresh.
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.config.cache_ttl = ttl;
        self
    }

    /// Set the number of retries on HTTP 429.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(agent.into());
        self
    }

    /// Set the rate-limit backoff unit.
    pub fn retry_backoff(mut self, backoff: Duration) -> Self {
        self.config.retry_backoff = backoff;
        self
    }

    /// Set the per-attempt timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<DankClient> {
        DankClient::from_config(self.config)
    }
}
