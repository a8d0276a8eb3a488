//! Command handlers.
//!
//! Handlers take the composed [`CliContext`](crate::CliContext), validate
//! CLI-specific input, drive the runtime and format output.

pub mod fetch;
pub mod tail;
