//! HTTP backend abstraction for the log endpoint.
//!
//! This module provides a trait-based HTTP backend that allows for
//! dependency injection and easy testing. The production implementation
//! uses reqwest with retry logic for transient errors.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::config::HttpSourceConfig;
use crate::error::{HttpResult, HttpSourceError};

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl RawResponse {
    /// Whether the status is in the 2xx range.
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Trait for HTTP backends that can GET a URL.
///
/// Non-success statuses are returned as a [`RawResponse`], not an error, so
/// the caller can read the server's error message from the body. Only
/// transport failures are errors.
///
/// This is an implementation detail - external code should use the
/// `LogSourcePort` trait.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Fetch `url` and return its status and body.
    async fn get(&self, url: &Url) -> HttpResult<RawResponse>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Longest single pause between retries.
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Exponent cap for the doubling, well past the point `MAX_BACKOFF` applies.
const MAX_BACKOFF_DOUBLINGS: u32 = 16;

/// Production HTTP backend using reqwest with retry logic.
///
/// Implements exponential backoff for server errors (5xx) and network
/// errors. Dropping the returned future aborts the request, including any
/// backoff sleep in progress.
pub struct ReqwestBackend {
    client: reqwest::Client,
    max_retries: u8,
    retry_base_delay: Duration,
    auth_token: Option<String>,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &HttpSourceConfig) -> HttpResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
            retry_base_delay: config.retry_base_delay,
            auth_token: config.token.clone(),
        })
    }

    /// Build a request with the session token, if any.
    fn build_request(&self, url: &Url) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .get(url.as_str())
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(ref token) = self.auth_token {
            request = request.header(reqwest::header::AUTHORIZATION, token.as_str());
        }
        request
    }

    /// Delay before retry `attempt` (1-based): base, 2x base, 4x base, ...
    /// capped at [`MAX_BACKOFF`].
    fn backoff(&self, attempt: u8) -> Duration {
        let exponent = u32::from(attempt.saturating_sub(1)).min(MAX_BACKOFF_DOUBLINGS);
        self.retry_base_delay
            .saturating_mul(1_u32 << exponent)
            .min(MAX_BACKOFF)
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get(&self, url: &Url) -> HttpResult<RawResponse> {
        let mut attempt: u8 = 0;

        loop {
            if attempt > 0 {
                let delay = self.backoff(attempt);
                debug!(%url, attempt, ?delay, "Retrying log request");
                tokio::time::sleep(delay).await;
            }

            match self.build_request(url).send().await {
                Ok(response) => {
                    let status = response.status();

                    // 5xx errors are retryable (server-side issues)
                    if status.is_server_error() && attempt < self.max_retries {
                        attempt += 1;
                        continue;
                    }

                    let body = response.text().await?;
                    return Ok(RawResponse {
                        status: status.as_u16(),
                        body,
                    });
                }
                Err(e) => {
                    // Network errors are retryable
                    if attempt < self.max_retries {
                        debug!(%url, error = %e, "Log request failed");
                        attempt += 1;
                        continue;
                    }
                    return Err(HttpSourceError::Network(e));
                }
            }
        }
    }
}

// ============================================================================
// Fake Backends for Testing
// ============================================================================
