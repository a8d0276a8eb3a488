//! Log source port.
//!
//! The tail synchronizer consumes a log source only through this trait.
//! Transport, authentication and payload framing belong to the adapter
//! (see `tailsync-http`), the engine just asks for a page of entries.

use std::fmt;
use std::num::NonZeroU32;

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::domain::LogEntry;

/// How many entries to request from a log source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageSize {
    /// Every entry the source currently retains. Used for the initial load.
    All,
    /// The most recent `n` entries. Used for incremental polls.
    Recent(NonZeroU32),
}

impl PageSize {
    /// Wire value of the `All` page size.
    pub const ALL_SENTINEL: i64 = -1;

    /// Interpret a raw page size: any negative value means [`PageSize::All`],
    /// a positive value means the most recent `n` entries.
    ///
    /// Returns `None` for zero, which requests nothing.
    #[must_use]
    pub fn from_raw(raw: i64) -> Option<Self> {
        if raw < 0 {
            return Some(Self::All);
        }
        u32::try_from(raw)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self::Recent)
    }

    /// The most recent `n` entries, or `None` if `n` is zero.
    #[must_use]
    pub fn recent(n: u32) -> Option<Self> {
        NonZeroU32::new(n).map(Self::Recent)
    }

    /// Raw value as sent on the wire (`-1` for all).
    #[must_use]
    pub fn as_raw(self) -> i64 {
        match self {
            Self::All => Self::ALL_SENTINEL,
            Self::Recent(n) => i64::from(n.get()),
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_raw())
    }
}

/// Errors from log source operations.
///
/// Cancellation is distinguishable from every other failure: the poll loop
/// exits silently on it and treats the rest as transient.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LogSourceError {
    /// The fetch was aborted because the cancellation token fired.
    #[error("Fetch cancelled")]
    Cancelled,

    /// The source answered with a non-success status.
    #[error("Log source returned status {status}: {message}")]
    Status {
        /// HTTP-style status code
        status: u16,
        /// Message reported by the source
        message: String,
    },

    /// The source could not be reached.
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
    },

    /// The source returned a payload that could not be decoded.
    #[error("Invalid response from log source: {message}")]
    InvalidResponse {
        /// What was invalid
        message: String,
    },

    /// The adapter is misconfigured (bad base URL, bad identifier, ...).
    #[error("Configuration error: {message}")]
    Configuration {
        /// What's wrong with the configuration
        message: String,
    },
}

impl LogSourceError {
    /// Whether this error is a cancellation rather than a failure.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Whether retrying the same fetch later may succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            Self::Network { .. } | Self::InvalidResponse { .. } => true,
            Self::Cancelled | Self::Configuration { .. } => false,
        }
    }
}

/// Result type alias for log source operations.
pub type LogSourceResult<T> = Result<T, LogSourceError>;

/// Port for fetching pages of an append-only log stream.
///
/// # Contract
///
/// - Entries are returned in ascending id order (oldest first).
/// - [`PageSize::All`] returns everything the source retains,
///   [`PageSize::Recent`] the trailing `n` entries.
/// - When `cancel` fires the fetch must abort promptly and return
///   [`LogSourceError::Cancelled`].
#[async_trait]
pub trait LogSourcePort: Send + Sync {
    /// Fetch a page of entries for `service_id`.
    async fn fetch(
        &self,
        cancel: &CancellationToken,
        service_id: &str,
        page_size: PageSize,
    ) -> LogSourceResult<Vec<LogEntry>>;
}
