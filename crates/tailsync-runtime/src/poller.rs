//! Incremental poll scheduler.
//!
//! A [`TailPoller`] keeps a [`LogBuffer`] current by fetching a small page of
//! the most recent entries on a fixed cadence and merging it with
//! deduplication. Pages overlap, so a failed cycle loses nothing: the next
//! successful page carries the missed entries.
//!
//! Cycles are strictly serialized. The next timer only starts once the
//! previous fetch and merge have completed, so the interval is measured from
//! completion and at most one fetch is ever outstanding.
//!
//! The loop stays `Idle` through the initial delay. After every cycle, merged
//! or failed, it reports `Scheduled` while it waits for the next one.
//!
//! ```text
//! Idle ──► Fetching ──► Merging ──► Scheduled ──► Fetching ──► ...
//!  │          │            │            │
//!  └──────────┴────────────┴────────────┴──► Cancelled
//! ```

use std::fmt;
use std::sync::Arc;

use tailsync_core::{LogBuffer, LogSourcePort};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, info, warn};

use crate::config::PollConfig;
use crate::error::PollerError;
use crate::observer::TailObserver;

/// Lifecycle state of a poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PollState {
    /// Waiting out the initial delay; no fetch has started yet.
    Idle,
    /// Waiting for the next cycle after at least one completed.
    Scheduled,
    /// A fetch is outstanding.
    Fetching,
    /// Merging a fetched page into the buffer.
    Merging,
    /// Stopped. Terminal.
    Cancelled,
}

impl PollState {
    /// Whether the loop has stopped for good.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled)
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Scheduled => "scheduled",
            Self::Fetching => "fetching",
            Self::Merging => "merging",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for PollState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Starts poll loops against a log source.
#[derive(Clone)]
pub struct TailPoller {
    source: Arc<dyn LogSourcePort>,
    config: PollConfig,
}

impl TailPoller {
    /// Create a poller for `source` with the given configuration.
    pub fn new(source: Arc<dyn LogSourcePort>, config: PollConfig) -> Self {
        Self { source, config }
    }

    /// The configuration new loops are started with.
    pub const fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Start polling `service_id`, taking ownership of `initial`.
    ///
    /// The configuration and service id are validated before anything is
    /// spawned. The loop stops when `cancel` fires or when the returned
    /// handle is cancelled or dropped. The handle only cancels a child of
    /// `cancel`, so stopping one loop never affects the caller's token.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<O: TailObserver>(
        &self,
        service_id: impl Into<String>,
        initial: LogBuffer,
        observer: O,
        cancel: &CancellationToken,
    ) -> Result<PollHandle, PollerError> {
        let service_id = service_id.into();
        if service_id.is_empty() {
            return Err(PollerError::EmptyServiceId);
        }
        self.config.validate()?;

        let cancel = cancel.child_token();
        let (state_tx, state_rx) = watch::channel(PollState::Idle);

        let poll_loop = PollLoop {
            source: Arc::clone(&self.source),
            config: self.config.clone(),
            service_id,
            cancel: cancel.clone(),
            state: state_tx,
        };
        let task = tokio::spawn(poll_loop.run(initial, observer));

        Ok(PollHandle {
            _drop_guard: cancel.clone().drop_guard(),
            cancel,
            state: state_rx,
            task,
        })
    }
}

impl fmt::Debug for TailPoller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TailPoller")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Handle to a running poll loop.
///
/// Dropping the handle cancels the loop, as does dropping a pending
/// [`join`](Self::join). To keep polling, hold the handle or await `join`.
pub struct PollHandle {
    _drop_guard: DropGuard,
    cancel: CancellationToken,
    state: watch::Receiver<PollState>,
    task: JoinHandle<LogBuffer>,
}

impl PollHandle {
    /// Stop the loop. Idempotent, and safe after the loop has already ended.
    ///
    /// An in-flight fetch is abandoned and its result never reaches the
    /// observer.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Current loop state.
    pub fn state(&self) -> PollState {
        *self.state.borrow()
    }

    /// Receiver that observes every state transition.
    pub fn state_changes(&self) -> watch::Receiver<PollState> {
        self.state.clone()
    }

    /// Whether the background task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the loop to stop and take back its buffer.
    ///
    /// Does not cancel by itself; the loop runs until the parent token fires
    /// or the source reports cancellation.
    pub async fn join(self) -> Result<LogBuffer, PollerError> {
        Ok(self.task.await?)
    }

    /// Cancel the loop and wait for it to stop.
    pub async fn shutdown(self) -> Result<LogBuffer, PollerError> {
        self.cancel();
        self.join().await
    }
}

impl fmt::Debug for PollHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PollHandle")
            .field("state", &self.state())
            .field("cancelled", &self.is_cancelled())
            .finish_non_exhaustive()
    }
}

struct PollLoop {
    source: Arc<dyn LogSourcePort>,
    config: PollConfig,
    service_id: String,
    cancel: CancellationToken,
    state: watch::Sender<PollState>,
}

impl PollLoop {
    fn set_state(&self, state: PollState) {
        self.state.send_replace(state);
    }

    async fn run<O: TailObserver>(self, mut buffer: LogBuffer, mut observer: O) -> LogBuffer {
        let service_id = self.service_id.as_str();
        info!(
            service_id,
            entries = buffer.len(),
            page_size = %self.config.page_size,
            "Tail poller started"
        );

        let mut delay = self.config.initial_delay;
        let mut cycle: u64 = 0;

        loop {
            if cycle > 0 {
                self.set_state(PollState::Scheduled);
            }
            tokio::select! {
                biased;
                () = self.cancel.cancelled() => break,
                () = tokio::time::sleep(delay) => {}
            }
            delay = self.config.interval;
            cycle += 1;

            self.set_state(PollState::Fetching);
            debug!(service_id, cycle, "Fetching log page");

            // Dropping the fetch future on cancellation aborts the request
            let result = tokio::select! {
                biased;
                () = self.cancel.cancelled() => break,
                result = self.source.fetch(&self.cancel, service_id, self.config.page_size) => result,
            };

            let batch = match result {
                Ok(batch) => batch,
                Err(e) if e.is_cancelled() => {
                    debug!(service_id, cycle, "Fetch cancelled");
                    break;
                }
                Err(e) => {
                    warn!(service_id, cycle, error = %e, "Log fetch failed, retrying next cycle");
                    continue;
                }
            };

            if self.cancel.is_cancelled() {
                debug!(service_id, cycle, "Discarding page fetched after cancellation");
                break;
            }

            self.set_state(PollState::Merging);
            if batch.is_empty() {
                continue;
            }

            observer.before_merge(&buffer);
            let fetched = batch.len();
            let appended = buffer.extend_unique(batch);
            debug!(service_id, cycle, fetched, appended, total = buffer.len(), "Merged log page");

            if appended > 0 {
                observer.on_update(&buffer, appended);
            }
        }

        self.set_state(PollState::Cancelled);
        info!(service_id, cycles = cycle, entries = buffer.len(), "Tail poller stopped");
        buffer
    }
}
