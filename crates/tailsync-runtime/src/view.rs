//! Tail view model with scroll anchoring.
//!
//! [`TailView`] is the presentation side of a poll loop: it keeps rendered
//! rows and a [`Viewport`], and brackets every buffer mutation with the
//! two-phase anchor contract. The decision is captured in
//! [`TailObserver::before_merge`] and applied once the new rows are rendered
//! and the content height is known.

use chrono::{DateTime, Utc};
use tailsync_core::{AnchorDecision, DisplayClass, EntryId, LogBuffer, ScrollAnchor, Viewport};

use crate::observer::TailObserver;

/// Measures the rendered height of a buffer.
pub trait ContentMeasure: Send + 'static {
    /// Total height of the content for `buffer`.
    fn content_height(&self, buffer: &LogBuffer) -> f64;
}

/// Every entry renders as one line of the same height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLineHeight(pub f64);

impl Default for FixedLineHeight {
    fn default() -> Self {
        Self(1.0)
    }
}

impl ContentMeasure for FixedLineHeight {
    #[allow(clippy::cast_precision_loss)]
    fn content_height(&self, buffer: &LogBuffer) -> f64 {
        buffer.len() as f64 * self.0
    }
}

/// One rendered log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRow {
    /// Id of the entry this row renders.
    pub id: EntryId,
    /// Styling hint derived from the entry.
    pub class: DisplayClass,
    /// When the entry was recorded.
    pub timestamp: DateTime<Utc>,
    /// The log line itself.
    pub text: String,
}

/// Rendered view of a log buffer that follows the tail while anchored.
#[derive(Debug)]
pub struct TailView<M = FixedLineHeight> {
    viewport: Viewport,
    anchor: ScrollAnchor,
    measure: M,
    pending: Option<AnchorDecision>,
    rows: Vec<ViewRow>,
}

impl<M: ContentMeasure> TailView<M> {
    /// Create an empty view with the given visible height.
    pub fn new(visible_height: f64, anchor: ScrollAnchor, measure: M) -> Self {
        Self {
            viewport: Viewport::new(0.0, visible_height, 0.0),
            anchor,
            measure,
            pending: None,
            rows: Vec::new(),
        }
    }

    /// Render the initial buffer and pin the viewport to the tail.
    pub fn mount(&mut self, initial: &LogBuffer) {
        self.rows.clear();
        self.pending = None;
        self.render(initial);
        ScrollAnchor::reanchor(&mut self.viewport);
    }

    /// Current scroll geometry.
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Rendered rows, oldest first.
    pub fn rows(&self) -> &[ViewRow] {
        &self.rows
    }

    /// Whether the viewport currently counts as being at the tail.
    pub fn is_anchored(&self) -> bool {
        self.anchor.should_anchor(&self.viewport)
    }

    /// User scroll. The offset is clamped to the content.
    pub fn scroll_to(&mut self, offset: f64) {
        self.viewport.scroll_offset = offset.clamp(0.0, self.viewport.content_height.max(0.0));
    }

    /// Change the visible height, keeping the offset.
    pub fn resize(&mut self, visible_height: f64) {
        self.viewport.visible_height = visible_height.max(0.0);
    }

    // Buffers only grow, so only the unrendered suffix needs new rows
    fn render(&mut self, buffer: &LogBuffer) {
        if buffer.len() < self.rows.len() {
            self.rows.clear();
        }
        let start = self.rows.len();
        self.rows
            .extend(buffer.entries()[start..].iter().map(|entry| ViewRow {
                id: entry.id,
                class: entry.display_class(),
                timestamp: entry.timestamp,
                text: entry.message.clone(),
            }));
        self.viewport.content_height = self.measure.content_height(buffer);
    }
}

impl Default for TailView<FixedLineHeight> {
    fn default() -> Self {
        Self::new(0.0, ScrollAnchor::default(), FixedLineHeight::default())
    }
}

impl<M: ContentMeasure> TailObserver for TailView<M> {
    fn before_merge(&mut self, _current: &LogBuffer) {
        self.pending = Some(self.anchor.capture(&self.viewport));
    }

    /// Without a captured decision the offset is left alone.
    fn on_update(&mut self, buffer: &LogBuffer, _appended: usize) {
        self.render(buffer);
        if let Some(decision) = self.pending.take() {
            decision.apply(&mut self.viewport);
        }
    }
}
