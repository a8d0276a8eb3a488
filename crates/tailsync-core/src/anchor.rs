//! Scroll anchor controller.
//!
//! Keeps a log view pinned to its newest entry while the user is at the
//! tail, and leaves it alone while they read scrollback. The viewport is an
//! explicit value rather than a live handle, and anchoring is a two-phase
//! contract:
//!
//! 1. [`ScrollAnchor::capture`] reads the viewport immediately before the
//!    buffer is mutated and returns an [`AnchorDecision`].
//! 2. After the view re-renders with the merged buffer (and the content
//!    height is known), [`AnchorDecision::apply`] re-pins the viewport if
//!    it was anchored.
//!
//! Fetch latency never influences the decision since it is captured around
//! the mutation, not around the fetch.

use serde::{Deserialize, Serialize};

/// Default distance, in pixels, within which the viewport counts as being
/// at the tail.
pub const DEFAULT_ANCHOR_TOLERANCE: f64 = 5.0;

/// Scroll geometry of a log view.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// Distance from the top of the content to the top of the visible area.
    pub scroll_offset: f64,
    /// Height of the visible area.
    pub visible_height: f64,
    /// Total height of the rendered content.
    pub content_height: f64,
}

impl Viewport {
    /// Create a viewport from its three measurements.
    #[must_use]
    pub const fn new(scroll_offset: f64, visible_height: f64, content_height: f64) -> Self {
        Self {
            scroll_offset,
            visible_height,
            content_height,
        }
    }

    /// Offset of the visible bottom edge.
    #[must_use]
    pub fn bottom_edge(&self) -> f64 {
        self.scroll_offset + self.visible_height
    }
}

/// Decides whether a viewport is anchored to the tail and re-pins it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnchor {
    tolerance: f64,
}

impl Default for ScrollAnchor {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_ANCHOR_TOLERANCE,
        }
    }
}

impl ScrollAnchor {
    /// Create an anchor controller with a custom tolerance.
    ///
    /// Negative tolerances are clamped to zero.
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance: tolerance.max(0.0),
        }
    }

    /// Tolerance in pixels.
    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Whether the visible bottom edge is within tolerance of the content's
    /// bottom edge.
    #[must_use]
    pub fn should_anchor(&self, viewport: &Viewport) -> bool {
        viewport.bottom_edge() >= viewport.content_height - self.tolerance
    }

    /// Scroll the viewport to the tail.
    pub const fn reanchor(viewport: &mut Viewport) {
        viewport.scroll_offset = viewport.content_height;
    }

    /// Read phase: capture the anchor state before the buffer mutates.
    #[must_use]
    pub fn capture(&self, viewport: &Viewport) -> AnchorDecision {
        AnchorDecision {
            anchored: self.should_anchor(viewport),
        }
    }
}

/// Anchor state captured before a merge, applied after the re-render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "an anchor decision does nothing until applied"]
pub struct AnchorDecision {
    anchored: bool,
}

impl AnchorDecision {
    /// Whether the viewport was at the tail when captured.
    pub const fn is_anchored(self) -> bool {
        self.anchored
    }

    /// Write phase: re-pin `viewport` to the tail if it was anchored.
    ///
    /// `viewport.content_height` must already reflect the re-rendered
    /// content. When not anchored the offset is left untouched.
    pub const fn apply(self, viewport: &mut Viewport) {
        if self.anchored {
            ScrollAnchor::reanchor(viewport);
        }
    }
}
