//! HTTP log source client.
//!
//! The client is generic over an [`HttpBackend`] so the port mapping can be
//! tested against canned responses. Production code uses
//! [`DefaultHttpLogSource`].

use tailsync_core::{LogSourceError, LogSourceResult};
use url::Url;

use crate::config::HttpSourceConfig;
use crate::error::HttpSourceError;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::port::map_error;
use crate::url::path_segments;

// ============================================================================
// Type Aliases
// ============================================================================

/// Default HTTP log source using the reqwest backend.
pub type DefaultHttpLogSource = HttpLogSource<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Log source that fetches pages from the service log endpoint.
pub struct HttpLogSource<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) base_url: Url,
    pub(crate) logs_path: Vec<String>,
}

impl DefaultHttpLogSource {
    /// Create a new client with the given configuration.
    ///
    /// Fails with [`LogSourceError::Configuration`] if the base URL does
    /// not parse or the HTTP client cannot be built.
    pub fn new(config: &HttpSourceConfig) -> LogSourceResult<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        let backend = ReqwestBackend::new(config).map_err(|e| LogSourceError::Configuration {
            message: e.to_string(),
        })?;

        Ok(Self {
            backend,
            base_url,
            logs_path: path_segments(&config.logs_path),
        })
    }
}

impl<B: HttpBackend> HttpLogSource<B> {
    /// Create a new client with a custom backend.
    ///
    /// Use this for testing with a fake backend.
    #[cfg(test)]
    pub(crate) fn with_backend(config: &HttpSourceConfig, backend: B) -> LogSourceResult<Self> {
        Ok(Self {
            backend,
            base_url: parse_base_url(&config.base_url)?,
            logs_path: path_segments(&config.logs_path),
        })
    }

    /// Base URL requests are built from.
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }
}

fn parse_base_url(raw: &str) -> LogSourceResult<Url> {
    Url::parse(raw)
        .map_err(|source| HttpSourceError::InvalidUrl {
            url: raw.to_string(),
            source,
        })
        .map_err(map_error)
}
