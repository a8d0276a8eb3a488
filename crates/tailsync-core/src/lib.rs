//! Core domain types and port definitions for tailsync.
//!
//! This crate holds everything the tail synchronizer needs that does not
//! touch the network or a runtime:
//!
//! - [`domain`]: log entries, the deduplicating [`LogBuffer`] and its merge
//! - [`anchor`]: the scroll anchor controller and its explicit [`Viewport`]
//! - [`ports`]: the [`LogSourcePort`] boundary implemented by adapters
//!
//! Adapters (`tailsync-http`, `tailsync-runtime`) depend on this crate, never
//! the other way around.

#![deny(unused_crate_dependencies)]

pub mod anchor;
pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use anchor::{AnchorDecision, DEFAULT_ANCHOR_TOLERANCE, ScrollAnchor, Viewport};
pub use domain::{DisplayClass, EntryId, LogBuffer, LogEntry, LogStream, merge};
pub use ports::{LogSourceError, LogSourcePort, LogSourceResult, PageSize};

// Silence unused dev-dependency warnings for crates only used by integration tests
#[cfg(test)]
use tokio_test as _;
