//! Terminal rendering of log entries.
//!
//! Format-only: entries come in, lines go out. Error-stream entries are
//! highlighted when the terminal supports colour.

use std::io::{self, Write};

use console::style;
use tailsync_core::{DisplayClass, LogBuffer, LogEntry};
use tailsync_runtime::TailObserver;

/// Render one entry as a single line, without styling.
pub fn format_entry(entry: &LogEntry) -> String {
    format!(
        "{} {:<6} {}",
        entry.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
        entry.stream,
        entry.message
    )
}

/// Render one entry, highlighting error-stream output.
pub fn styled_entry(entry: &LogEntry) -> String {
    let line = format_entry(entry);
    match entry.display_class() {
        DisplayClass::Normal => line,
        DisplayClass::Error => style(line).red().to_string(),
    }
}

/// Prints each buffer entry exactly once as the buffer grows.
///
/// Buffers are append-only, so the printer only tracks how many entries it
/// has already written.
pub struct TailPrinter<W> {
    out: W,
    printed: usize,
}

impl TailPrinter<io::Stdout> {
    /// Printer writing to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TailPrinter<W> {
    pub const fn new(out: W) -> Self {
        Self { out, printed: 0 }
    }

    /// Number of entries written so far.
    pub const fn printed(&self) -> usize {
        self.printed
    }

    /// Write every entry not printed yet and return how many were written.
    pub fn print_new(&mut self, buffer: &LogBuffer) -> io::Result<usize> {
        let pending = buffer.entries().get(self.printed..).unwrap_or_default();
        for entry in pending {
            writeln!(self.out, "{}", styled_entry(entry))?;
        }
        self.out.flush()?;
        self.printed += pending.len();
        Ok(pending.len())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send + 'static> TailObserver for TailPrinter<W> {
    fn on_update(&mut self, buffer: &LogBuffer, _appended: usize) {
        if let Err(e) = self.print_new(buffer) {
            tracing::warn!(error = %e, "Failed to write log lines");
        }
    }
}
