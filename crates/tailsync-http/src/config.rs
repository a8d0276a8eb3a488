//! Public configuration for the HTTP log source.
//!
//! This module provides a stable public API for configuring the client.

use std::time::Duration;

/// Default path, relative to the base URL, of the service log endpoint.
pub const DEFAULT_LOGS_PATH: &str = "x-api/service/logs";

/// Configuration for the HTTP log source.
///
/// Use the builder pattern methods to customize the client configuration.
///
/// # Example
///
/// ```
/// use tailsync_http::HttpSourceConfig;
/// use std::time::Duration;
///
/// let config = HttpSourceConfig::new()
///     .with_base_url("https://launcher.example.com")
///     .with_timeout(Duration::from_secs(10))
///     .with_token("session-token");
/// ```
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    /// Base URL of the log server
    pub(crate) base_url: String,
    /// Path of the log endpoint relative to the base URL
    pub(crate) logs_path: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout
    pub(crate) timeout: Duration,
    /// Session token sent in the `Authorization` header
    pub(crate) token: Option<String>,
    /// Maximum number of retry attempts for transient errors
    pub(crate) max_retries: u8,
    /// Base delay for exponential backoff
    pub(crate) retry_base_delay: Duration,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8090".to_string(),
            logs_path: DEFAULT_LOGS_PATH.to_string(),
            user_agent: concat!("tailsync-http/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            token: None,
            max_retries: 2,
            retry_base_delay: Duration::from_millis(250),
        }
    }
}

impl HttpSourceConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the log server.
    ///
    /// Defaults to `http://127.0.0.1:8090`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the endpoint path relative to the base URL.
    ///
    /// Defaults to `x-api/service/logs`.
    #[must_use]
    pub fn with_logs_path(mut self, path: impl Into<String>) -> Self {
        self.logs_path = path.into();
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the session token sent with every request.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set an optional session token.
    #[must_use]
    pub fn with_optional_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Set the maximum number of retry attempts for transient errors.
    ///
    /// Defaults to 2 retries. The poll loop retries on its own cadence, so
    /// this only smooths over blips within a single cycle.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the base delay for exponential backoff retries.
    ///
    /// Defaults to 250ms.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }
}
