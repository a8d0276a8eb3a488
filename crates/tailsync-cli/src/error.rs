//! CLI-specific error types and exit codes.

use tailsync_core::LogSourceError;
use tailsync_runtime::PollerError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument validation error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Configuration error (bad URL, unusable client settings).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The log service could not be reached or refused the request.
    #[error("Log service unavailable: {0}")]
    Unavailable(String),

    /// The log service answered with data that could not be decoded.
    #[error("Invalid response from log service: {0}")]
    InvalidResponse(String),

    /// IO error writing output.
    #[error("IO error: {0}")]
    Io(String),

    /// Interrupted before any work completed.
    #[error("Interrupted")]
    Interrupted,

    /// Internal failure of the poll loop.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CliError {
    /// Map error to an exit code.
    ///
    /// Exit codes follow sysexits.h where a category fits:
    /// - 2: Invalid arguments
    /// - 65: Undecodable data (`EX_DATAERR`)
    /// - 69: Service unavailable (`EX_UNAVAILABLE`)
    /// - 70: Internal software error (`EX_SOFTWARE`)
    /// - 74: IO error (`EX_IOERR`)
    /// - 78: Configuration error (`EX_CONFIG`)
    /// - 130: Interrupted by Ctrl-C
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Arguments(_) => 2,
            Self::InvalidResponse(_) => 65,
            Self::Unavailable(_) => 69,
            Self::Internal(_) => 70,
            Self::Io(_) => 74,
            Self::Config(_) => 78,
            Self::Interrupted => 130,
        }
    }
}

impl From<LogSourceError> for CliError {
    fn from(err: LogSourceError) -> Self {
        match err {
            LogSourceError::Cancelled => Self::Interrupted,
            LogSourceError::Configuration { message } => Self::Config(message),
            LogSourceError::InvalidResponse { message } => Self::InvalidResponse(message),
            e @ (LogSourceError::Status { .. } | LogSourceError::Network { .. }) => {
                Self::Unavailable(e.to_string())
            }
        }
    }
}

impl From<PollerError> for CliError {
    fn from(err: PollerError) -> Self {
        match err {
            PollerError::InvalidConfig(msg) => Self::Arguments(msg),
            e @ PollerError::EmptyServiceId => Self::Arguments(e.to_string()),
            PollerError::TaskFailed(msg) => Self::Internal(msg),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_errors_map_to_exit_codes() {
        let cases = [
            (LogSourceError::Cancelled, 130),
            (
                LogSourceError::Network {
                    message: "refused".to_string(),
                },
                69,
            ),
            (
                LogSourceError::Status {
                    status: 401,
                    message: "unauthorized".to_string(),
                },
                69,
            ),
            (
                LogSourceError::InvalidResponse {
                    message: "bad json".to_string(),
                },
                65,
            ),
            (
                LogSourceError::Configuration {
                    message: "bad url".to_string(),
                },
                78,
            ),
        ];
        for (source_err, code) in cases {
            assert_eq!(CliError::from(source_err).exit_code(), code);
        }
    }

    #[test]
    fn test_status_message_is_kept() {
        let err = CliError::from(LogSourceError::Status {
            status: 503,
            message: "maintenance".to_string(),
        });
        let text = err.to_string();
        assert!(text.contains("503"));
        assert!(text.contains("maintenance"));
    }

    #[test]
    fn test_poller_errors() {
        assert_eq!(
            CliError::from(PollerError::InvalidConfig("zero".to_string())).exit_code(),
            2
        );
        assert_eq!(
            CliError::from(PollerError::TaskFailed("panic".to_string())).exit_code(),
            70
        );
    }
}
