//! Tail command handler.
//!
//! Bulk-loads everything the service retains, prints it, then follows the
//! service with a poll loop until the context's cancellation token fires.

use std::time::Duration;

use tailsync_runtime::{PollConfig, RetryPolicy, TailPoller, load_initial_with_retry};
use tracing::info;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::TailPrinter;

/// Arguments of the tail command.
#[derive(Debug, Clone)]
pub struct TailArgs {
    pub service_id: String,
    pub interval: Duration,
    pub initial_delay: Duration,
    pub page_size: u32,
    /// Extra attempts for the initial load.
    pub retries: u32,
}

impl TailArgs {
    /// Poll settings derived from the arguments.
    pub fn poll_config(&self) -> PollConfig {
        PollConfig::new()
            .with_interval(self.interval)
            .with_initial_delay(self.initial_delay)
            .with_page_size(self.page_size)
    }

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.retries.saturating_add(1),
            ..RetryPolicy::default()
        }
    }
}

/// Execute the tail command.
///
/// Returns once interrupted. Interrupting during the initial load is not an
/// error.
pub async fn execute(ctx: &CliContext, args: TailArgs) -> Result<(), CliError> {
    let config = args.poll_config();
    config.validate()?;

    let buffer = match load_initial_with_retry(
        ctx.source.as_ref(),
        &ctx.cancel,
        &args.service_id,
        args.retry_policy(),
    )
    .await
    {
        Ok(buffer) => buffer,
        Err(e) if e.is_cancelled() => return Ok(()),
        Err(e) => return Err(e.into()),
    };
    info!(
        service_id = %args.service_id,
        entries = buffer.len(),
        "Loaded retained logs, following"
    );

    let mut printer = TailPrinter::stdout();
    printer.print_new(&buffer)?;

    let poller = TailPoller::new(ctx.source.clone(), config);
    let handle = poller.start(args.service_id.as_str(), buffer, printer, &ctx.cancel)?;
    let buffer = handle.join().await?;

    info!(
        service_id = %args.service_id,
        entries = buffer.len(),
        "Stopped following"
    );
    Ok(())
}
