//! Internal error types for HTTP log source operations.
//!
//! These errors are internal to `tailsync-http` and are mapped to
//! [`tailsync_core::LogSourceError`] at the port boundary.

use thiserror::Error;

/// Result type alias for HTTP log source operations.
pub type HttpResult<T> = Result<T, HttpSourceError>;

/// Errors related to talking to the log server.
#[derive(Debug, Error)]
pub enum HttpSourceError {
    /// The server answered with a non-success status.
    #[error("Log request failed with status {status}: {message}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// Message from the response body, if any
        message: String,
    },

    /// The server returned an invalid or unexpected response.
    #[error("Invalid response from log server: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// The base URL cannot carry path segments (e.g. `mailto:`).
    #[error("Base URL cannot be used for log requests: {url}")]
    UnusableBaseUrl {
        /// The offending URL
        url: String,
    },

    /// An empty service identifier was requested.
    #[error("Service identifier must not be empty")]
    EmptyServiceId,

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The configured base URL does not parse.
    #[error("Invalid base URL '{url}': {source}")]
    InvalidUrl {
        /// The URL as configured
        url: String,
        /// Why it failed to parse
        #[source]
        source: url::ParseError,
    },

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
