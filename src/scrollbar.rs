//! The `scroll_top ↔ thumb pixel` contract for a virtual scrollbar.
//!
//! Drawing and pointer capture belong to the host; this module only maps between the two
//! coordinate spaces and tracks the transient "flash" visibility.

use crate::range::ceil;

/// Smallest thumb height in pixels.
pub const MIN_THUMB_SIZE: f64 = 20.0;
/// How long the thumb stays visible after a flash.
pub const FLASH_DURATION_MS: u64 = 2000;

/// Thumb placement for the current scroll position.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThumbGeometry {
    pub top: f64,
    pub height: f64,
}

/// Scrollbar track metrics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollBarMetrics {
    pub viewport_height: f64,
    pub scroll_height: f64,
    pub count: usize,
}

impl ScrollBarMetrics {
    /// The thumb is only shown when content overflows.
    pub fn shows_thumb(&self) -> bool {
        self.scroll_height > self.viewport_height
    }

    pub fn thumb_height(&self) -> f64 {
        let count = self.count.max(1) as f64;
        let base = (self.viewport_height / count * 10.0)
            .max(MIN_THUMB_SIZE)
            .min(self.viewport_height / 2.0);
        // floor for non-negative values
        base.max(0.0) as u64 as f64
    }

    fn scroll_range(&self) -> f64 {
        let r = self.scroll_height - self.viewport_height;
        if r.is_finite() { r } else { 0.0 }
    }

    fn track_range(&self) -> f64 {
        let r = self.viewport_height - self.thumb_height();
        if r.is_finite() { r } else { 0.0 }
    }

    pub fn thumb(&self, scroll_top: f64) -> ThumbGeometry {
        let height = self.thumb_height();
        let scroll_range = self.scroll_range();
        let top = if scroll_top == 0.0 || scroll_range == 0.0 {
            0.0
        } else {
            scroll_top / scroll_range * self.track_range()
        };
        ThumbGeometry { top, height }
    }

    /// Inverse of [`Self::thumb`]: the scroll offset for a thumb dragged to `thumb_top`.
    pub fn scroll_top_for_thumb(&self, thumb_top: f64) -> f64 {
        let track = self.track_range();
        if track <= 0.0 {
            return 0.0;
        }
        let thumb_top = thumb_top.max(0.0).min(track);
        ceil(thumb_top / track * self.scroll_range())
    }
}

/// Flash/drag bookkeeping for the scrollbar.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ScrollBarState {
    visible_until_ms: Option<u64>,
    flash_requested: bool,
    now_ms: u64,
}

impl ScrollBarState {
    pub(crate) fn request_flash(&mut self) {
        self.flash_requested = true;
    }

    /// Resolves pending flashes against the frame clock.
    pub(crate) fn on_frame(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
        if self.flash_requested {
            self.flash_requested = false;
            self.visible_until_ms = Some(now_ms.saturating_add(FLASH_DURATION_MS));
        }
        if self.visible_until_ms.is_some_and(|until| now_ms >= until) {
            self.visible_until_ms = None;
        }
    }

    pub(crate) fn is_visible(&self) -> bool {
        self.visible_until_ms.is_some_and(|until| self.now_ms < until)
    }

    pub(crate) fn cancel(&mut self) {
        self.flash_requested = false;
        self.visible_until_ms = None;
    }
}
