//! Log entry types as reported by a log source.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned to a log entry by its source.
///
/// Opaque to the engine apart from equality and ordering. Sources hand out
/// ids in non-decreasing order per service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub i64);

impl EntryId {
    /// Raw integer value of the id.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for EntryId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Output channel an entry was captured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStream {
    /// Primary output.
    Stdout,
    /// Error output.
    Stderr,
}

impl LogStream {
    /// Wire name of the stream (`stdout` / `stderr`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }

    /// Display class used by presentation layers to style an entry.
    #[must_use]
    pub const fn display_class(self) -> DisplayClass {
        match self {
            Self::Stdout => DisplayClass::Normal,
            Self::Stderr => DisplayClass::Error,
        }
    }
}

impl fmt::Display for LogStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an entry should be styled. The engine does not dictate rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayClass {
    /// Output written to stdout.
    Normal,
    /// Output written to stderr.
    Error,
}

/// A single entry of an append-only log stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Source-assigned identifier, unique per stream.
    pub id: EntryId,
    /// The stream (service) this entry belongs to.
    pub service_id: String,
    /// Channel the entry was captured from.
    pub stream: LogStream,
    /// Opaque text payload.
    pub message: String,
    /// When the source recorded the entry.
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    /// Create an entry stamped with the current time.
    pub fn new(
        id: impl Into<EntryId>,
        service_id: impl Into<String>,
        stream: LogStream,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            service_id: service_id.into(),
            stream,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    /// Replace the timestamp.
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Shorthand for `self.stream.display_class()`.
    #[must_use]
    pub const fn display_class(&self) -> DisplayClass {
        self.stream.display_class()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_deserializes_from_wire_format() {
        let value = json!({
            "id": 42,
            "service_id": "svc_1",
            "stream": "stderr",
            "message": "boom\n",
            "timestamp": "2025-03-01T10:15:30.123456789Z"
        });

        let entry: LogEntry = serde_json::from_value(value).unwrap();
        assert_eq!(entry.id, EntryId(42));
        assert_eq!(entry.service_id, "svc_1");
        assert_eq!(entry.stream, LogStream::Stderr);
        assert_eq!(entry.message, "boom\n");
        assert_eq!(entry.timestamp.timestamp(), 1_740_824_130);
    }

    #[test]
    fn test_unknown_stream_is_rejected() {
        let value = json!({
            "id": 1,
            "service_id": "svc_1",
            "stream": "stdin",
            "message": "",
            "timestamp": "2025-03-01T10:15:30Z"
        });
        assert!(serde_json::from_value::<LogEntry>(value).is_err());
    }

    #[test]
    fn test_display_class_follows_stream() {
        assert_eq!(LogStream::Stdout.display_class(), DisplayClass::Normal);
        assert_eq!(LogStream::Stderr.display_class(), DisplayClass::Error);

        let entry = LogEntry::new(1, "svc", LogStream::Stderr, "x");
        assert_eq!(entry.display_class(), DisplayClass::Error);
    }

    #[test]
    fn test_stream_wire_names() {
        assert_eq!(LogStream::Stdout.to_string(), "stdout");
        assert_eq!(
            serde_json::to_value(LogStream::Stderr).unwrap(),
            json!("stderr")
        );
    }

    #[test]
    fn test_entry_id_ordering() {
        assert!(EntryId(3) < EntryId(10));
        assert_eq!(EntryId::from(7).get(), 7);
        assert_eq!(EntryId(9).to_string(), "9");
    }
}
