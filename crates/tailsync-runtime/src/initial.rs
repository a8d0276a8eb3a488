//! Initial bulk load of a log buffer.
//!
//! The first fetch asks for every retained entry. Unlike poll cycles, a
//! failure here is returned to the caller, who can retry with
//! [`load_initial_with_retry`].

use std::time::Duration;

use tailsync_core::{LogBuffer, LogSourceError, LogSourcePort, LogSourceResult, PageSize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Retry settings for the initial load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first.
    pub attempts: u32,
    /// Pause between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// A policy that tries once.
    pub const fn none() -> Self {
        Self {
            attempts: 1,
            delay: Duration::ZERO,
        }
    }
}

/// Fetch every retained entry for `service_id` into a fresh buffer.
pub async fn load_initial(
    source: &dyn LogSourcePort,
    cancel: &CancellationToken,
    service_id: &str,
) -> LogSourceResult<LogBuffer> {
    let entries = source.fetch(cancel, service_id, PageSize::All).await?;
    debug!(service_id, entries = entries.len(), "Initial log load complete");
    Ok(LogBuffer::from_entries(entries))
}

/// [`load_initial`] with bounded retries for transient failures.
///
/// Cancellation and non-transient errors are returned immediately. The pause
/// between attempts is interrupted by cancellation.
pub async fn load_initial_with_retry(
    source: &dyn LogSourcePort,
    cancel: &CancellationToken,
    service_id: &str,
    policy: RetryPolicy,
) -> LogSourceResult<LogBuffer> {
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;

    loop {
        match load_initial(source, cancel, service_id).await {
            Ok(buffer) => return Ok(buffer),
            Err(e) if e.is_transient() && attempt < attempts => {
                warn!(
                    service_id,
                    attempt,
                    attempts,
                    error = %e,
                    "Initial log load failed, retrying"
                );
            }
            Err(e) => return Err(e),
        }

        tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(LogSourceError::Cancelled),
            () = tokio::time::sleep(policy.delay) => {}
        }
        attempt += 1;
    }
}
