//! CLI bootstrap: the composition root.
//!
//! The only place where the concrete log source is chosen and wired up.
//! Handlers receive a [`CliContext`] and work against the
//! [`LogSourcePort`] it carries.

use std::sync::Arc;
use std::time::Duration;

use tailsync_core::LogSourcePort;
use tailsync_http::{DefaultHttpLogSource, HttpSourceConfig};
use tokio_util::sync::CancellationToken;

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Base URL of the log service.
    pub url: String,
    /// Session token, if any.
    pub token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl CliConfig {
    /// Collect the connection settings from parsed arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            url: cli.url.clone(),
            token: cli.token.clone().filter(|t| !t.is_empty()),
            timeout: Duration::from_secs(cli.timeout_secs),
        }
    }

    fn http_config(&self) -> HttpSourceConfig {
        HttpSourceConfig::new()
            .with_base_url(self.url.as_str())
            .with_optional_token(self.token.clone())
            .with_timeout(self.timeout)
    }
}

/// Fully composed context for CLI commands.
pub struct CliContext {
    /// Where log pages come from.
    pub source: Arc<dyn LogSourcePort>,
    /// Fired on Ctrl-C; every fetch and poll loop observes it.
    pub cancel: CancellationToken,
}

/// Build the CLI context from configuration.
pub fn bootstrap(config: &CliConfig) -> Result<CliContext, CliError> {
    let source = DefaultHttpLogSource::new(&config.http_config())?;
    tracing::debug!(url = %source.base_url(), "Log source ready");

    Ok(CliContext {
        source: Arc::new(source),
        cancel: CancellationToken::new(),
    })
}
