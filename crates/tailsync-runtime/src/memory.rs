//! In-process log store implementing [`LogSourcePort`].
//!
//! Mirrors how the service side retains logs: append-only, ids assigned from
//! a single auto-increment counter, and a per-service cap that evicts the
//! oldest entries first. Pages are always returned in ascending id order.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tailsync_core::{
    EntryId, LogEntry, LogSourceError, LogSourcePort, LogSourceResult, LogStream, PageSize,
};
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Maximum number of entries retained per service.
pub const DEFAULT_RETENTION: usize = 500;

#[derive(Debug, Default)]
struct Store {
    last_id: i64,
    services: HashMap<String, VecDeque<LogEntry>>,
}

/// Retained, in-memory log source.
#[derive(Debug)]
pub struct MemoryLogSource {
    retention: usize,
    store: Mutex<Store>,
}

impl Default for MemoryLogSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryLogSource {
    /// Create an empty store with the default retention.
    pub fn new() -> Self {
        Self::with_retention(DEFAULT_RETENTION)
    }

    /// Create an empty store keeping at most `retention` entries per service.
    pub fn with_retention(retention: usize) -> Self {
        Self {
            retention: retention.max(1),
            store: Mutex::new(Store::default()),
        }
    }

    /// Per-service retention cap.
    pub const fn retention(&self) -> usize {
        self.retention
    }

    fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a line for `service_id`, assigning the next id.
    pub fn append(
        &self,
        service_id: &str,
        stream: LogStream,
        message: impl Into<String>,
    ) -> LogEntry {
        let mut store = self.store();
        store.last_id += 1;
        let entry = LogEntry::new(EntryId(store.last_id), service_id, stream, message);

        let lines = store.services.entry(service_id.to_string()).or_default();
        if lines.len() >= self.retention {
            lines.pop_front();
        }
        lines.push_back(entry.clone());

        trace!(service_id, id = %entry.id, "Appended log entry");
        entry
    }

    /// Every retained entry for `service_id`, oldest first.
    pub fn entries(&self, service_id: &str) -> Vec<LogEntry> {
        self.store()
            .services
            .get(service_id)
            .map(|lines| lines.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Drop every retained entry for `service_id`. Ids are never reused.
    pub fn clear(&self, service_id: &str) {
        self.store().services.remove(service_id);
    }

    fn page(&self, service_id: &str, page_size: PageSize) -> Vec<LogEntry> {
        let store = self.store();
        let Some(lines) = store.services.get(service_id) else {
            return Vec::new();
        };

        let skip = match page_size {
            PageSize::All => 0,
            PageSize::Recent(n) => {
                let n = usize::try_from(n.get()).unwrap_or(usize::MAX);
                lines.len().saturating_sub(n)
            }
        };
        lines.iter().skip(skip).cloned().collect()
    }
}

#[async_trait]
impl LogSourcePort for MemoryLogSource {
    async fn fetch(
        &self,
        cancel: &CancellationToken,
        service_id: &str,
        page_size: PageSize,
    ) -> LogSourceResult<Vec<LogEntry>> {
        if cancel.is_cancelled() {
            return Err(LogSourceError::Cancelled);
        }
        if service_id.is_empty() {
            return Err(LogSourceError::Configuration {
                message: "service id must not be empty".to_string(),
            });
        }
        Ok(self.page(service_id, page_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(entries: &[LogEntry]) -> Vec<i64> {
        entries.iter().map(|e| e.id.get()).collect()
    }

    fn fill(source: &MemoryLogSource, service_id: &str, n: usize) {
        for i in 0..n {
            source.append(service_id, LogStream::Stdout, format!("line {i}"));
        }
    }

    #[test]
    fn test_ids_increase_across_services() {
        let source = MemoryLogSource::new();
        let a = source.append("a", LogStream::Stdout, "one");
        let b = source.append("b", LogStream::Stderr, "two");
        let c = source.append("a", LogStream::Stdout, "three");

        assert_eq!((a.id, b.id, c.id), (EntryId(1), EntryId(2), EntryId(3)));
        assert_eq!(ids(&source.entries("a")), vec![1, 3]);
        assert_eq!(source.entries("b")[0].stream, LogStream::Stderr);
    }

    #[test]
    fn test_retention_evicts_oldest() {
        let source = MemoryLogSource::with_retention(3);
        fill(&source, "svc", 5);
        assert_eq!(ids(&source.entries("svc")), vec![3, 4, 5]);
    }

    #[test]
    fn test_default_retention() {
        let source = MemoryLogSource::default();
        fill(&source, "svc", DEFAULT_RETENTION + 20);

        let entries = source.entries("svc");
        assert_eq!(entries.len(), DEFAULT_RETENTION);
        assert_eq!(entries[0].id, EntryId(21));
    }

    #[tokio::test]
    async fn test_recent_page_is_newest_ascending() {
        let source = MemoryLogSource::new();
        fill(&source, "svc", 20);

        let page = source
            .fetch(&CancellationToken::new(), "svc", PageSize::recent(5).unwrap())
            .await
            .unwrap();
        assert_eq!(ids(&page), vec![16, 17, 18, 19, 20]);
    }

    #[tokio::test]
    async fn test_all_page_returns_everything_retained() {
        let source = MemoryLogSource::with_retention(10);
        fill(&source, "svc", 15);

        let page = source
            .fetch(&CancellationToken::new(), "svc", PageSize::All)
            .await
            .unwrap();
        assert_eq!(ids(&page), (6..=15).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_page_larger_than_store() {
        let source = MemoryLogSource::new();
        fill(&source, "svc", 3);

        let page = source
            .fetch(&CancellationToken::new(), "svc", PageSize::recent(10).unwrap())
            .await
            .unwrap();
        assert_eq!(ids(&page), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_unknown_service_is_empty() {
        let source = MemoryLogSource::new();
        let page = source
            .fetch(&CancellationToken::new(), "missing", PageSize::All)
            .await;
        assert!(tokio_test::assert_ok!(page).is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_token_is_reported() {
        let source = MemoryLogSource::new();
        fill(&source, "svc", 3);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = source.fetch(&cancel, "svc", PageSize::All).await;
        assert_eq!(result.unwrap_err(), LogSourceError::Cancelled);
    }

    #[test]
    fn test_clear_keeps_id_sequence() {
        let source = MemoryLogSource::new();
        fill(&source, "svc", 3);
        source.clear("svc");
        assert!(source.entries("svc").is_empty());

        let next = source.append("svc", LogStream::Stdout, "after clear");
        assert_eq!(next.id, EntryId(4));
    }
}
