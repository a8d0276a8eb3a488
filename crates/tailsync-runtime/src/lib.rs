//! Runtime for following a service's logs.
//!
//! - [`load_initial`] / [`load_initial_with_retry`] seed a buffer with every
//!   retained entry.
//! - [`TailPoller`] keeps that buffer current with small overlapping pages
//!   on a fixed cadence, until cancelled.
//! - [`TailView`] renders the buffer and keeps the viewport pinned to the
//!   tail while the reader is there.
//! - [`MemoryLogSource`] is an in-process [`LogSourcePort`](tailsync_core::LogSourcePort).
//!
//! ```
//! use std::sync::Arc;
//! use tailsync_core::LogStream;
//! use tailsync_runtime::{MemoryLogSource, PollConfig, TailPoller, on_update};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = Arc::new(MemoryLogSource::new());
//! source.append("api", LogStream::Stdout, "listening on :8080");
//!
//! let cancel = CancellationToken::new();
//! let buffer = tailsync_runtime::load_initial(source.as_ref(), &cancel, "api").await?;
//!
//! let poller = TailPoller::new(source, PollConfig::new());
//! let handle = poller.start(
//!     "api",
//!     buffer,
//!     on_update(|buffer, appended| println!("+{appended} ({} total)", buffer.len())),
//!     &cancel,
//! )?;
//! handle.shutdown().await?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]

mod config;
mod error;
mod initial;
mod memory;
mod observer;
mod poller;
mod view;

pub use config::{DEFAULT_INITIAL_DELAY, DEFAULT_POLL_INTERVAL, DEFAULT_POLL_PAGE_SIZE, PollConfig};
pub use error::PollerError;
pub use initial::{RetryPolicy, load_initial, load_initial_with_retry};
pub use memory::{DEFAULT_RETENTION, MemoryLogSource};
pub use observer::{OnUpdate, TailObserver, on_update};
pub use poller::{PollHandle, PollState, TailPoller};
pub use view::{ContentMeasure, FixedLineHeight, TailView, ViewRow};
