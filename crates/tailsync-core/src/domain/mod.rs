//! Domain types for the tail synchronizer.

pub mod buffer;
pub mod entry;

pub use buffer::{LogBuffer, merge};
pub use entry::{DisplayClass, EntryId, LogEntry, LogStream};
