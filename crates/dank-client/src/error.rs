//! Client error types.

use thiserror::Error;

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure: connection refused, DNS, timeout. Not retried.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-success status. Exhausted rate-limit
    /// retries end up here with status 429.
    #[error("HTTP {status} for {url}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
        /// Response body, empty if it could not be read.
        body: String,
    },

    /// Response body was not a JSON array of objects.
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            Error::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::Http { status: 429, .. })
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Http { status: 404, .. })
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Http { status, .. } if *status >= 500)
    }

    /// Check if this is a transport-level failure.
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network(_))
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
