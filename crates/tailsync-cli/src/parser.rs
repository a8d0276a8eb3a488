//! Main CLI parser and global options.

use clap::Parser;

use crate::commands::Commands;

/// Follow service logs from the command line.
#[derive(Parser, Debug)]
#[command(name = "tailsync")]
#[command(about = "Follow a service's logs as they are written")]
#[command(version)]
pub struct Cli {
    /// Base URL of the log service
    #[arg(
        long,
        env = "TAILSYNC_URL",
        default_value = "http://127.0.0.1:8090",
        global = true
    )]
    pub url: String,

    /// Session token sent in the Authorization header
    #[arg(long, env = "TAILSYNC_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long = "timeout-secs", default_value_t = 30, global = true)]
    pub timeout_secs: u64,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}
