//! Shared fixtures for runtime integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tailsync_core::{LogEntry, LogSourceError, LogSourcePort, LogSourceResult, LogStream, PageSize};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Entries with the given ids for service `svc`.
pub fn entries(ids: impl IntoIterator<Item = i64>) -> Vec<LogEntry> {
    ids.into_iter()
        .map(|id| LogEntry::new(id, "svc", LogStream::Stdout, format!("line {id}")))
        .collect()
}

/// One scripted fetch outcome.
pub enum Step {
    /// Return the page immediately.
    Page(Vec<LogEntry>),
    /// Fail immediately.
    Fail(LogSourceError),
    /// Return the page after a delay, or `Cancelled` if the token fires first.
    Slow(Duration, Vec<LogEntry>),
    /// Return the page after a delay, ignoring the token.
    Stubborn(Duration, Vec<LogEntry>),
}

/// A recorded fetch call.
#[derive(Debug, Clone)]
pub struct Call {
    pub service_id: String,
    pub page_size: PageSize,
    pub started: Instant,
    pub finished: Option<Instant>,
}

/// Log source that plays back a script, then serves empty pages.
pub struct ScriptedSource {
    steps: Mutex<VecDeque<Step>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedSource {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Arc<Self> {
        Arc::new(Self {
            steps: Mutex::new(steps.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn finish(&self, index: usize) {
        self.calls.lock().unwrap()[index].finished = Some(Instant::now());
    }
}

#[async_trait]
impl LogSourcePort for ScriptedSource {
    async fn fetch(
        &self,
        cancel: &CancellationToken,
        service_id: &str,
        page_size: PageSize,
    ) -> LogSourceResult<Vec<LogEntry>> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(Call {
                service_id: service_id.to_string(),
                page_size,
                started: Instant::now(),
                finished: None,
            });
            calls.len() - 1
        };
        let step = self
            .steps
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Step::Page(Vec::new()));

        let result = match step {
            Step::Page(page) => Ok(page),
            Step::Fail(err) => Err(err),
            Step::Slow(delay, page) => {
                tokio::select! {
                    () = cancel.cancelled() => Err(LogSourceError::Cancelled),
                    () = tokio::time::sleep(delay) => Ok(page),
                }
            }
            Step::Stubborn(delay, page) => {
                tokio::time::sleep(delay).await;
                Ok(page)
            }
        };
        self.finish(index);
        result
    }
}

/// Records every `on_update` call as `(buffer length, appended)`.
pub type Updates = Arc<Mutex<Vec<(usize, usize)>>>;

pub fn recorder() -> (Updates, impl tailsync_runtime::TailObserver) {
    let updates: Updates = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&updates);
    let observer = tailsync_runtime::on_update(move |buffer, appended| {
        sink.lock().unwrap().push((buffer.len(), appended));
    });
    (updates, observer)
}
