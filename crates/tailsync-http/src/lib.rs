//! HTTP log source client for tailsync.
//!
//! Implements [`tailsync_core::LogSourcePort`] over the service log endpoint:
//!
//! ```text
//! GET {base_url}/x-api/service/logs/{service_id}/{limit}
//! Authorization: <session token>
//! ```
//!
//! The response is a JSON array of log entries in ascending id order. A
//! `null` or non-array body is treated as an empty page. Requests abort as
//! soon as the caller's cancellation token fires.
//!
//! ```no_run
//! use tailsync_http::{DefaultHttpLogSource, HttpSourceConfig};
//!
//! let config = HttpSourceConfig::new()
//!     .with_base_url("http://127.0.0.1:8090")
//!     .with_token("session-token");
//! let source = DefaultHttpLogSource::new(&config).expect("valid config");
//! # let _ = source;
//! ```

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// DefaultHttpLogSource is meant to be used through the LogSourcePort trait,
// not its internal generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod port;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::DefaultHttpLogSource;

// Configuration
pub use config::HttpSourceConfig;
