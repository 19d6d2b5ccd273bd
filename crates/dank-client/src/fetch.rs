//! Caching, rate-limit-aware fetch engine.
//!
//! Every collection request goes through [`Fetcher::fetch`]:
//!
//! 1. The cache key is `base_url + path`. A live cache entry is returned
//!    without touching the network.
//! 2. Otherwise the request is sent. On HTTP 429, while fewer than
//!    `max_retries` retries have been made, the engine sleeps and tries again.
//!    The delay comes from the `Retry-After` header (milliseconds) or falls
//!    back to `(attempt + 1) * retry_backoff`.
//! 3. Any other non-success status, or a 429 once retries are used up, is
//!    returned as [`Error::Http`].
//! 4. A successful body is decoded, cached and returned.
//!
//! Concurrent misses for the same path are not coalesced: each issues its
//! own request and the last response written wins the cache slot.

use std::sync::Arc;
use std::time::Duration;

use dank_cache::{CacheStats, TtlCache};
use dank_filter::Record;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use tracing::{debug, trace, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// A decoded collection, shared between the cache and callers.
pub type Records = Arc<Vec<Record>>;

/// Fetch engine: one HTTP client, one cache, one retry policy.
pub struct Fetcher {
    http: reqwest::Client,
    base_url: String,
    cache: TtlCache<Records>,
    config: ClientConfig,
}

impl Fetcher {
    /// Build a fetch engine from a configuration.
    ///
    /// Fails if the base URL does not parse or is not http(s).
    pub fn new(config: ClientConfig) -> Result<Self> {
        let parsed = Url::parse(&config.base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "unsupported URL scheme '{}'",
                parsed.scheme()
            )));
        }

        let mut builder = reqwest::Client::builder().timeout(config.timeout);
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.as_str());
        }
        let http = builder
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cache: TtlCache::new(config.cache_ttl),
            config,
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Full URL (and cache key) for a resource path.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Fetch a collection, serving it from cache while fresh.
    pub async fn fetch(&self, path: &str) -> Result<Records> {
        let url = self.url(path);

        if let Some(records) = self.cache.get(&url) {
            trace!(url = %url, count = records.len(), "Serving collection from cache");
            return Ok(records);
        }

        debug!(url = %url, "Cache miss, fetching collection");
        let target = Url::parse(&url)?;
        let mut attempt: u32 = 0;

        loop {
            let response = self.http.get(target.clone()).send().await?;
            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS && attempt < self.config.max_retries {
                let delay = retry_after(response.headers())
                    .unwrap_or_else(|| backoff_delay(self.config.retry_backoff, attempt));
                warn!(
                    url = %url,
                    attempt = attempt + 1,
                    max_retries = self.config.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    "Rate limited, retrying"
                );
                drop(response);
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                debug!(url = %url, status = status.as_u16(), "Request failed");
                return Err(Error::Http {
                    status: status.as_u16(),
                    url,
                    body,
                });
            }

            let bytes = response.bytes().await?;
            let records: Vec<Record> =
                serde_json::from_slice(&bytes).map_err(|source| Error::Decode {
                    url: url.clone(),
                    source,
                })?;
            let records = Arc::new(records);

            self.cache.set(url.as_str(), Arc::clone(&records));
            debug!(
                url = %url,
                count = records.len(),
                retries = attempt,
                "Collection fetched and cached"
            );

            return Ok(records);
        }
    }

    /// Drop every cached collection.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Get cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

impl std::fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher")
            .field("base_url", &self.base_url)
            .field("cache", &self.cache)
            .field("max_retries", &self.config.max_retries)
            .finish()
    }
}

/// Delay for a rate-limited attempt when the server gave no usable hint.
pub(crate) fn backoff_delay(unit: Duration, attempt: u32) -> Duration {
    unit.saturating_mul(attempt.saturating_add(1))
}

/// Read the `Retry-After` header as a delay in milliseconds.
///
/// Zero, negative, non-numeric and missing values yield `None` so the caller
/// falls back to linear backoff.
pub(crate) fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    let raw = headers.get(RETRY_AFTER)?.to_str().ok()?;
    parse_retry_after_ms(raw)
}

fn parse_retry_after_ms(value: &str) -> Option<Duration> {
    let millis = value.trim().parse::<f64>().ok()?;
    if !millis.is_finite() || millis <= 0.0 {
        return None;
    }
    Some(Duration::from_nanos((millis * 1_000_000.0).round() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn fetcher(base_url: &str) -> Fetcher {
        Fetcher::new(ClientConfig::new().with_base_url(base_url)).unwrap()
    }

    #[test]
    fn test_backoff_is_linear() {
        let unit = Duration::from_millis(1_000);
        assert_eq!(backoff_delay(unit, 0), Duration::from_millis(1_000));
        assert_eq!(backoff_delay(unit, 1), Duration::from_millis(2_000));
        assert_eq!(backoff_delay(unit, 2), Duration::from_millis(3_000));
    }

    #[test]
    fn test_parse_retry_after_millis() {
        assert_eq!(parse_retry_after_ms("250"), Some(Duration::from_millis(250)));
        assert_eq!(parse_retry_after_ms(" 1500 "), Some(Duration::from_millis(1500)));
        assert_eq!(parse_retry_after_ms("2.5"), Some(Duration::from_micros(2500)));
    }

    #[test]
    fn test_parse_retry_after_rejects_unusable() {
        assert_eq!(parse_retry_after_ms("0"), None);
        assert_eq!(parse_retry_after_ms("-5"), None);
        assert_eq!(parse_retry_after_ms(""), None);
        assert_eq!(parse_retry_after_ms("soon"), None);
        assert_eq!(parse_retry_after_ms("NaN"), None);
        assert_eq!(parse_retry_after_ms("inf"), None);
        assert_eq!(parse_retry_after_ms("Wed, 21 Oct 2015 07:28:00 GMT"), None);
    }

    #[test]
    fn test_retry_after_header_lookup() {
        let mut headers = HeaderMap::new();
        assert_eq!(retry_after(&headers), None);

        headers.insert(RETRY_AFTER, HeaderValue::from_static("40"));
        assert_eq!(retry_after(&headers), Some(Duration::from_millis(40)));
    }

    #[test]
    fn test_url_joins_base_and_path() {
        let f = fetcher("https://api.dankalert.xyz/dank");
        assert_eq!(f.url("/items"), "https://api.dankalert.xyz/dank/items");
        assert_eq!(f.url("items"), "https://api.dankalert.xyz/dank/items");
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let f = fetcher("https://api.dankalert.xyz/dank/");
        assert_eq!(f.url("/tools"), "https://api.dankalert.xyz/dank/tools");
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let err = Fetcher::new(ClientConfig::new().with_base_url("not a url")).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));

        let err = Fetcher::new(ClientConfig::new().with_base_url("ftp://example.com")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
