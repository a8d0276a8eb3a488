//! Available subcommands.

use clap::Subcommand;

/// Subcommands of the `tailsync` binary.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Load a service's retained logs, then follow new entries until Ctrl-C
    Tail {
        /// Service whose logs to follow
        service_id: String,
        /// Milliseconds between the end of one poll and the start of the next
        #[arg(long = "interval-ms", default_value_t = 1000)]
        interval_ms: u64,
        /// Milliseconds to wait after the initial load before the first poll
        #[arg(long = "initial-delay-ms", default_value_t = 2000)]
        initial_delay_ms: u64,
        /// Number of most recent entries requested per poll
        #[arg(long = "page-size", default_value_t = 10)]
        page_size: u32,
        /// Extra attempts for the initial load on transient failures
        #[arg(long, default_value_t = 2)]
        retries: u32,
    },

    /// Print one page of a service's logs and exit
    Fetch {
        /// Service whose logs to print
        service_id: String,
        /// Number of most recent entries, or -1 for everything retained
        #[arg(short, long, default_value_t = -1, allow_negative_numbers = true)]
        limit: i64,
        /// Print the raw entries as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use crate::parser::Cli;
    use clap::Parser;

    use super::*;

    #[test]
    fn test_tail_defaults() {
        let cli = Cli::parse_from(["tailsync", "tail", "svc_1"]);
        assert_eq!(
            cli.command,
            Commands::Tail {
                service_id: "svc_1".to_string(),
                interval_ms: 1000,
                initial_delay_ms: 2000,
                page_size: 10,
                retries: 2,
            }
        );
    }

    #[test]
    fn test_fetch_negative_limit() {
        let cli = Cli::parse_from(["tailsync", "fetch", "svc_1", "--limit", "-1", "--json"]);
        assert_eq!(
            cli.command,
            Commands::Fetch {
                service_id: "svc_1".to_string(),
                limit: -1,
                json: true,
            }
        );
    }

    #[test]
    fn test_fetch_short_limit() {
        let cli = Cli::parse_from(["tailsync", "fetch", "svc_1", "-l", "25"]);
        assert!(matches!(cli.command, Commands::Fetch { limit: 25, .. }));
    }
}
