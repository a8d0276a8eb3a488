//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the core expects from infrastructure. They
//! contain no transport details and use only domain types.

pub mod log_source;

pub use log_source::{LogSourceError, LogSourcePort, LogSourceResult, PageSize};
