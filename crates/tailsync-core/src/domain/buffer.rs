//! Ordered, duplicate-free log buffer and the deduplicating merge.
//!
//! A [`LogBuffer`] only ever grows: merges append entries whose id has not
//! been seen yet and never reorder or drop what is already there. This is
//! what lets a poller re-fetch an overlapping trailing window every cycle
//! without losing or duplicating entries.

use std::collections::HashSet;

use tracing::warn;

use super::entry::{EntryId, LogEntry};

/// Ordered sequence of log entries, unique by [`EntryId`].
///
/// Entries are kept in arrival order. The source guarantees arrival order
/// is non-decreasing in id, but the buffer does not re-sort: an entry whose
/// id is lower than the highest one already held is appended as-is and
/// reported with a warning.
#[derive(Debug, Clone, Default)]
pub struct LogBuffer {
    entries: Vec<LogEntry>,
    ids: HashSet<EntryId>,
    max_id: Option<EntryId>,
}

impl LogBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a buffer from a batch, keeping the first occurrence of each id.
    pub fn from_entries(entries: impl IntoIterator<Item = LogEntry>) -> Self {
        let mut buffer = Self::new();
        buffer.extend_unique(entries);
        buffer
    }

    /// Number of entries held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the buffer holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in arrival order.
    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Iterate over entries in arrival order.
    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.entries.iter()
    }

    /// Whether an entry with `id` is already present.
    #[must_use]
    pub fn contains(&self, id: EntryId) -> bool {
        self.ids.contains(&id)
    }

    /// Highest id seen so far.
    #[must_use]
    pub const fn max_id(&self) -> Option<EntryId> {
        self.max_id
    }

    /// Ids in arrival order.
    pub fn ids(&self) -> impl Iterator<Item = EntryId> + '_ {
        self.entries.iter().map(|entry| entry.id)
    }

    /// Append every entry of `incoming` whose id is not present yet,
    /// preserving the relative order of `incoming`.
    ///
    /// Returns how many entries were appended. Zero means the buffer is
    /// unchanged and no downstream update is needed.
    pub fn extend_unique(&mut self, incoming: impl IntoIterator<Item = LogEntry>) -> usize {
        let before = self.entries.len();

        for entry in incoming {
            if !self.ids.insert(entry.id) {
                continue;
            }

            match self.max_id {
                Some(max) if entry.id < max => {
                    warn!(
                        id = %entry.id,
                        max_id = %max,
                        service_id = %entry.service_id,
                        "Log source returned an id below the highest one seen; appending without reordering"
                    );
                }
                _ => self.max_id = Some(entry.id),
            }

            self.entries.push(entry);
        }

        self.entries.len() - before
    }

    /// Consume the buffer, returning its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }
}

impl PartialEq for LogBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for LogBuffer {}

impl<'a> IntoIterator for &'a LogBuffer {
    type Item = &'a LogEntry;
    type IntoIter = std::slice::Iter<'a, LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<LogEntry> for LogBuffer {
    fn from_iter<I: IntoIterator<Item = LogEntry>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

/// Merge a freshly fetched batch into `current`.
///
/// The result holds every entry of `current` followed by every entry of
/// `incoming` whose id is not already present, in `incoming` order. Merging
/// the same batch again yields an equal buffer. Pure: `current` is left
/// untouched.
#[must_use]
pub fn merge(current: &LogBuffer, incoming: &[LogEntry]) -> LogBuffer {
    let mut merged = current.clone();
    merged.extend_unique(incoming.iter().cloned());
    merged
}
