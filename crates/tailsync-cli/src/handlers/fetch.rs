//! Fetch command handler.
//!
//! Prints a single page of a service's logs.

use std::io::{self, Write};

use tailsync_core::PageSize;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::styled_entry;

/// Arguments of the fetch command.
#[derive(Debug, Clone)]
pub struct FetchArgs {
    pub service_id: String,
    /// Raw page size: `-1` (or any negative value) for everything retained.
    pub limit: i64,
    pub json: bool,
}

/// Resolve a raw `--limit` value.
pub fn parse_limit(limit: i64) -> Result<PageSize, CliError> {
    PageSize::from_raw(limit).ok_or_else(|| {
        CliError::Arguments(format!(
            "limit must be -1 for all entries or between 1 and {}, got {limit}",
            u32::MAX
        ))
    })
}

/// Execute the fetch command.
pub async fn execute(ctx: &CliContext, args: FetchArgs) -> Result<(), CliError> {
    let page_size = parse_limit(args.limit)?;
    let entries = ctx
        .source
        .fetch(&ctx.cancel, &args.service_id, page_size)
        .await?;

    let mut out = io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &entries)?;
        writeln!(out)?;
    } else if entries.is_empty() {
        eprintln!("No log entries for '{}'.", args.service_id);
    } else {
        for entry in &entries {
            writeln!(out, "{}", styled_entry(entry))?;
        }
    }
    out.flush()?;
    Ok(())
}
