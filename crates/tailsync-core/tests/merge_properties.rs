//! Property checks for the deduplicating merge over many batch shapes.

use tailsync_core::{EntryId, LogBuffer, LogEntry, LogStream, merge};

fn entry(id: i64) -> LogEntry {
    let stream = if id % 7 == 0 {
        LogStream::Stderr
    } else {
        LogStream::Stdout
    };
    LogEntry::new(id, "svc", stream, format!("message {id}"))
}

/// Trailing windows like a poller would see them: overlapping, repeating,
/// sometimes empty.
fn windows() -> Vec<Vec<LogEntry>> {
    vec![
        (1..=10).map(entry).collect(),
        (6..=15).map(entry).collect(),
        (6..=15).map(entry).collect(),
        Vec::new(),
        (15..=15).map(entry).collect(),
        (12..=21).map(entry).collect(),
    ]
}

fn ids(buffer: &LogBuffer) -> Vec<i64> {
    buffer.ids().map(EntryId::get).collect()
}

#[test]
fn merge_is_idempotent_for_every_window() {
    let mut buffer = LogBuffer::new();
    for window in windows() {
        let once = merge(&buffer, &window);
        let twice = merge(&once, &window);
        assert_eq!(once, twice);
        buffer = once;
    }
}

#[test]
fn existing_entries_keep_their_positions() {
    let mut buffer = LogBuffer::new();
    for window in windows() {
        let before = ids(&buffer);
        let merged = merge(&buffer, &window);
        let after = ids(&merged);

        assert_eq!(&after[..before.len()], before.as_slice());
        // Whatever was appended came from the window, in window order
        let window_ids: Vec<i64> = window.iter().map(|e| e.id.get()).collect();
        let appended = &after[before.len()..];
        let mut cursor = window_ids.iter();
        for id in appended {
            assert!(cursor.any(|w| w == id), "appended id {id} out of window order");
        }
        buffer = merged;
    }
}

#[test]
fn overlapping_windows_converge_to_the_union() {
    let mut buffer = LogBuffer::new();
    for window in windows() {
        buffer.extend_unique(window);
    }
    assert_eq!(ids(&buffer), (1..=21).collect::<Vec<_>>());
}

#[test]
fn retry_after_partial_overlap_contains_each_entry_once() {
    let mut buffer = LogBuffer::new();
    buffer.extend_unique([5, 6, 7].map(entry));
    buffer.extend_unique([6, 7, 8].map(entry));
    assert_eq!(ids(&buffer), vec![5, 6, 7, 8]);
}
