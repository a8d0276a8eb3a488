//! Poll loop configuration.

use std::num::NonZeroU32;
use std::time::Duration;

use tailsync_core::{DEFAULT_ANCHOR_TOLERANCE, PageSize, ScrollAnchor};

use crate::error::PollerError;

/// Default delay before the first poll, letting the initial load settle.
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(2000);

/// Default delay between the end of one cycle and the start of the next.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Default number of most-recent entries fetched per poll.
pub const DEFAULT_POLL_PAGE_SIZE: NonZeroU32 = NonZeroU32::new(10).unwrap();

/// Configuration for a [`TailPoller`](crate::TailPoller).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use tailsync_runtime::PollConfig;
///
/// let config = PollConfig::new()
///     .with_interval(Duration::from_millis(500))
///     .with_page_size(25);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PollConfig {
    /// Delay before the first cycle.
    pub initial_delay: Duration,
    /// Delay measured from the completion of one cycle to the next.
    pub interval: Duration,
    /// Page requested on every incremental poll.
    pub page_size: PageSize,
    /// Anchor tolerance used by views following this poller.
    pub anchor_tolerance: f64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            initial_delay: DEFAULT_INITIAL_DELAY,
            interval: DEFAULT_POLL_INTERVAL,
            page_size: PageSize::Recent(DEFAULT_POLL_PAGE_SIZE),
            anchor_tolerance: DEFAULT_ANCHOR_TOLERANCE,
        }
    }
}

impl PollConfig {
    /// Create a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delay before the first cycle.
    #[must_use]
    pub const fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set the delay between cycles.
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the number of most-recent entries fetched per poll.
    ///
    /// Zero yields a configuration that [`validate`](Self::validate) rejects.
    #[must_use]
    pub fn with_page_size(mut self, n: u32) -> Self {
        self.page_size = PageSize::recent(n).unwrap_or(PageSize::All);
        self
    }

    /// Set the anchor tolerance in pixels.
    #[must_use]
    pub const fn with_anchor_tolerance(mut self, tolerance: f64) -> Self {
        self.anchor_tolerance = tolerance;
        self
    }

    /// Anchor controller for views following a loop with this configuration.
    pub fn scroll_anchor(&self) -> ScrollAnchor {
        ScrollAnchor::new(self.anchor_tolerance)
    }

    /// Check the configuration before a poll loop starts.
    pub fn validate(&self) -> Result<(), PollerError> {
        if self.interval.is_zero() {
            return Err(PollerError::InvalidConfig(
                "poll interval must be greater than zero".to_string(),
            ));
        }
        if self.page_size == PageSize::All {
            return Err(PollerError::InvalidConfig(
                "poll page size must be a positive number of entries".to_string(),
            ));
        }
        if !self.anchor_tolerance.is_finite() || self.anchor_tolerance < 0.0 {
            return Err(PollerError::InvalidConfig(format!(
                "anchor tolerance must be a non-negative number, got {}",
                self.anchor_tolerance
            )));
        }
        Ok(())
    }
}
