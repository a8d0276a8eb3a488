//! Error types for the tail runtime.
//!
//! Only setup problems surface as errors. Failures inside a running poll
//! cycle are logged and absorbed by the loop.

use thiserror::Error;

/// Errors returned when starting or joining a poll loop.
#[derive(Debug, Error)]
pub enum PollerError {
    /// The poll configuration cannot drive a loop
    #[error("Invalid poll configuration: {0}")]
    InvalidConfig(String),

    /// No service to poll
    #[error("Service id must not be empty")]
    EmptyServiceId,

    /// The background poll task panicked or was aborted
    #[error("Poll task failed: {0}")]
    TaskFailed(String),
}

impl From<tokio::task::JoinError> for PollerError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::TaskFailed(err.to_string())
    }
}
