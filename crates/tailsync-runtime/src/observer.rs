//! Presentation observers notified by the poll loop.

use std::sync::{Arc, Mutex, PoisonError};

use tailsync_core::LogBuffer;

/// Receives buffer updates from a running [`TailPoller`](crate::TailPoller).
///
/// The poll loop owns the buffer; observers only ever see a shared borrow.
/// Both hooks run on the poll task between the fetch and the next timer, so
/// they should return quickly.
pub trait TailObserver: Send + 'static {
    /// Called with the buffer as it stands right before a non-empty batch is
    /// merged. Views capture their scroll anchor decision here.
    fn before_merge(&mut self, _current: &LogBuffer) {}

    /// Called after a merge that appended at least one entry.
    fn on_update(&mut self, buffer: &LogBuffer, appended: usize);
}

/// Adapts a closure into a [`TailObserver`] that only handles updates.
pub struct OnUpdate<F>(F);

impl<F> TailObserver for OnUpdate<F>
where
    F: FnMut(&LogBuffer, usize) + Send + 'static,
{
    fn on_update(&mut self, buffer: &LogBuffer, appended: usize) {
        (self.0)(buffer, appended);
    }
}

/// Build an observer from an update callback.
///
/// ```
/// use tailsync_runtime::on_update;
///
/// let observer = on_update(|buffer, appended| {
///     println!("{appended} new, {} total", buffer.len());
/// });
/// # let _ = observer;
/// ```
pub const fn on_update<F>(f: F) -> OnUpdate<F>
where
    F: FnMut(&LogBuffer, usize) + Send + 'static,
{
    OnUpdate(f)
}

// Shared observers let the caller inspect view state while the loop runs
impl<T: TailObserver> TailObserver for Arc<Mutex<T>> {
    fn before_merge(&mut self, current: &LogBuffer) {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .before_merge(current);
    }

    fn on_update(&mut self, buffer: &LogBuffer, appended: usize) {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on_update(buffer, appended);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tailsync_core::{LogEntry, LogStream};

    fn buffer_of(n: i64) -> LogBuffer {
        (1..=n)
            .map(|id| LogEntry::new(id, "svc", LogStream::Stdout, format!("line {id}")))
            .collect()
    }

    #[test]
    fn test_closure_observer_receives_updates() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut observer = on_update(move |buffer: &LogBuffer, appended| {
            sink.lock().unwrap().push((buffer.len(), appended));
        });

        observer.before_merge(&buffer_of(1));
        observer.on_update(&buffer_of(3), 2);

        assert_eq!(*seen.lock().unwrap(), vec![(3, 2)]);
    }

    #[derive(Default)]
    struct Recorder {
        before: Vec<usize>,
        updates: Vec<usize>,
    }

    impl TailObserver for Recorder {
        fn before_merge(&mut self, current: &LogBuffer) {
            self.before.push(current.len());
        }

        fn on_update(&mut self, buffer: &LogBuffer, _appended: usize) {
            self.updates.push(buffer.len());
        }
    }

    #[test]
    fn test_shared_observer_forwards_both_hooks() {
        let shared = Arc::new(Mutex::new(Recorder::default()));
        let mut observer = Arc::clone(&shared);

        observer.before_merge(&buffer_of(2));
        observer.on_update(&buffer_of(4), 2);

        let recorder = shared.lock().unwrap();
        assert_eq!(recorder.before, vec![2]);
        assert_eq!(recorder.updates, vec![4]);
    }
}
