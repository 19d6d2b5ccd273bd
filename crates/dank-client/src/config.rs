//! Client configuration.
//!
//! Durations are expressed in milliseconds when (de)serialized, so a host
//! application can embed the section in its own config file:
//!
//! ```toml
//! [catalog]
//! base_url = "https://api.dankalert.xyz/dank"
//! cache_ttl = 5000
//! max_retries = 3
//! user_agent = "my-bot/1.0"
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default catalog endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.dankalert.xyz/dank";

/// Default freshness window for cached collections.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_millis(5_000);

/// Default number of retries on HTTP 429.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default unit of the linear rate-limit backoff.
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(1_000);

/// Default timeout for a single HTTP attempt.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for a [`DankClient`](crate::DankClient).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Catalog root; resource paths are appended to it verbatim.
    #[serde(alias = "baseUrl")]
    pub base_url: String,

    /// How long a fetched collection stays fresh.
    #[serde(alias = "cacheTTL", with = "duration_ms")]
    pub cache_ttl: Duration,

    /// Retries allowed on HTTP 429 before the response is surfaced as an
    /// error.
    #[serde(alias = "maxRetries")]
    pub max_retries: u32,

    /// `User-Agent` header sent with every request. None sends no header.
    #[serde(alias = "userAgent", skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Rate-limit delay unit when the server sends no usable `Retry-After`.
    /// Attempt `n` (zero-based) waits `(n + 1) * retry_backoff`.
    #[serde(alias = "retryBackoff", with = "duration_ms")]
    pub retry_backoff: Duration,

    /// Timeout for a single HTTP attempt.
    #[serde(with = "duration_ms")]
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
            max_retries: DEFAULT_MAX_RETRIES,
            user_agent: None,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the catalog root URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the cache freshness window.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Set the number of retries on HTTP 429.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the `User-Agent` header.
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Set the rate-limit backoff unit.
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Set the per-attempt timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Serialize a `Duration` as whole milliseconds.
mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://api.dankalert.xyz/dank");
        assert_eq!(config.cache_ttl, Duration::from_millis(5_000));
        assert_eq!(config.max_retries, 3);
        assert!(config.user_agent.is_none());
        assert_eq!(config.retry_backoff, Duration::from_secs(1));
    }

    #[test]
    fn test_with_methods() {
        let config = ClientConfig::new()
            .with_base_url("http://localhost:9000")
            .with_cache_ttl(Duration::from_millis(250))
            .with_max_retries(0)
            .with_user_agent("bot/1.0");

        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.cache_ttl, Duration::from_millis(250));
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.user_agent.as_deref(), Some("bot/1.0"));
    }

    #[test]
    fn test_deserialize_partial_uses_defaults() {
        let config: ClientConfig = serde_json::from_value(json!({
            "cache_ttl": 1500,
            "user_agent": "bot/2.0"
        }))
        .unwrap();

        assert_eq!(config.cache_ttl, Duration::from_millis(1500));
        assert_eq!(config.user_agent.as_deref(), Some("bot/2.0"));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_deserialize_camel_case_aliases() {
        let config: ClientConfig = serde_json::from_value(json!({
            "baseUrl": "http://127.0.0.1:8080",
            "cacheTTL": 10000,
            "maxRetries": 5,
            "userAgent": "bot/3.0"
        }))
        .unwrap();

        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.cache_ttl, Duration::from_secs(10));
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.user_agent.as_deref(), Some("bot/3.0"));
    }

    #[test]
    fn test_serialize_durations_as_millis() {
        let value = serde_json::to_value(ClientConfig::default()).unwrap();
        assert_eq!(value["cache_ttl"], json!(5000));
        assert_eq!(value["timeout"], json!(30000));
        assert!(value.get("user_agent").is_none());
    }
}
