//! CLI entry point.

use std::time::Duration;

use clap::Parser;
use console::style;
use tailsync_cli::handlers::fetch::FetchArgs;
use tailsync_cli::handlers::tail::TailArgs;
use tailsync_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    // RUST_LOG wins over --verbose
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    // stdout carries the log lines themselves
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = bootstrap(&CliConfig::from_cli(&cli))?;

    let cancel = ctx.cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!("Interrupt received, stopping");
            cancel.cancel();
        }
    });

    match cli.command {
        Commands::Tail {
            service_id,
            interval_ms,
            initial_delay_ms,
            page_size,
            retries,
        } => {
            let args = TailArgs {
                service_id,
                interval: Duration::from_millis(interval_ms),
                initial_delay: Duration::from_millis(initial_delay_ms),
                page_size,
                retries,
            };
            handlers::tail::execute(&ctx, args).await
        }
        Commands::Fetch {
            service_id,
            limit,
            json,
        } => {
            let args = FetchArgs {
                service_id,
                limit,
                json,
            };
            handlers::fetch::execute(&ctx, args).await
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before parsing so it can supply TAILSYNC_URL / TAILSYNC_TOKEN
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    if let Err(err) = run(cli).await {
        eprintln!("{} {err}", style("error:").red().bold());
        std::process::exit(err.exit_code());
    }
    Ok(())
}
