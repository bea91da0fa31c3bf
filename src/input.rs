//! Wheel/touch normalization.
//!
//! These types only hold gesture bookkeeping. [`crate::VirtualList`] owns them, feeds them native
//! event data plus a millisecond clock, and turns their output into scroll updates.

/// Delta multiplier applied when the legacy line-scroll event identified a mouse wheel.
pub const LINE_SCROLL_MULTIPLIER: f64 = 10.0;
/// How long edge passthrough stays locked after an intercepted event.
pub const ORIGIN_SCROLL_LOCK_MS: u64 = 50;
/// Touch inertia tick.
pub const TOUCH_INERTIA_INTERVAL_MS: u64 = 16;
/// Per-tick decay of the touch inertia delta.
pub const TOUCH_INERTIA_DECAY: f64 = 14.0 / 15.0;
/// Inertia stops once the delta magnitude falls to this value.
pub const TOUCH_INERTIA_MIN_DELTA: f64 = 0.1;

fn abs(v: f64) -> f64 {
    if v < 0.0 { -v } else { v }
}

/// Decides whether a delta at the scroll edge should go to native handling instead.
///
/// Pulling up at the top (or down at the bottom) passes through, unless an event was
/// intercepted within the last [`ORIGIN_SCROLL_LOCK_MS`]. This keeps a gesture that started
/// mid-list from leaking into the page once it hits the edge.
#[derive(Clone, Copy, Debug, Default)]
pub struct OriginScroll {
    lock_until_ms: Option<u64>,
}

impl OriginScroll {
    /// Returns `true` when the event belongs to native scrolling.
    pub fn check(
        &mut self,
        delta_y: f64,
        smooth: bool,
        at_top: bool,
        at_bottom: bool,
        now_ms: u64,
    ) -> bool {
        let origin = (delta_y < 0.0 && at_top) || (delta_y > 0.0 && at_bottom);
        let locked = self.lock_until_ms.is_some_and(|until| now_ms < until);

        if smooth && origin {
            self.lock_until_ms = None;
            return true;
        }
        if !origin || locked {
            self.lock_until_ms = Some(now_ms.saturating_add(ORIGIN_SCROLL_LOCK_MS));
            return false;
        }
        true
    }

    pub fn reset(&mut self) {
        self.lock_until_ms = None;
    }
}

/// Frame-coalesced wheel accumulator.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameWheel {
    pending: f64,
    flush_scheduled: bool,
    last_delta: Option<f64>,
    is_line_scroll: bool,
}

impl FrameWheel {
    pub fn push(&mut self, delta_y: f64) {
        self.pending += delta_y;
        self.last_delta = Some(delta_y);
    }

    pub fn schedule(&mut self) {
        self.flush_scheduled = true;
    }

    /// Legacy line-scroll events carry a `detail` that equals the wheel delta for real mouse
    /// wheels; those deltas are in lines, not pixels.
    pub fn note_line_scroll(&mut self, detail: f64) {
        self.is_line_scroll = self.last_delta == Some(detail);
    }

    /// Takes the accumulated delta if a flush is due.
    pub fn flush(&mut self) -> Option<f64> {
        if !self.flush_scheduled {
            return None;
        }
        self.flush_scheduled = false;
        let multiplier = if self.is_line_scroll {
            LINE_SCROLL_MULTIPLIER
        } else {
            1.0
        };
        let delta = self.pending * multiplier;
        self.pending = 0.0;
        Some(delta)
    }

    pub fn cancel(&mut self) {
        self.pending = 0.0;
        self.flush_scheduled = false;
    }
}

#[derive(Clone, Copy, Debug)]
struct Inertia {
    delta: f64,
    next_ms: u64,
}

/// Single-finger touch tracking with a decaying inertia tail.
#[derive(Clone, Copy, Debug, Default)]
pub struct TouchMove {
    touch_y: Option<f64>,
    inertia: Option<Inertia>,
}

impl TouchMove {
    /// Starts tracking. Multi-touch and re-entrant starts are ignored.
    pub fn start(&mut self, touches: usize, page_y: f64) -> bool {
        self.inertia = None;
        if touches != 1 || self.touch_y.is_some() {
            return false;
        }
        self.touch_y = Some(crate::range::ceil(page_y));
        true
    }

    /// Returns the per-move delta (positive = content moves up), or `None` when not tracking.
    pub fn motion(&mut self, page_y: f64) -> Option<f64> {
        let prev = self.touch_y?;
        let current = crate::range::ceil(page_y);
        self.touch_y = Some(current);
        Some(prev - current)
    }

    /// Arms the inertia tail after a move.
    pub fn arm_inertia(&mut self, delta: f64, now_ms: u64) {
        self.inertia = Some(Inertia {
            delta,
            next_ms: now_ms.saturating_add(TOUCH_INERTIA_INTERVAL_MS),
        });
    }

    /// Yields the next inertia delta if a tick is due at `now_ms`.
    pub fn next_inertia(&mut self, now_ms: u64) -> Option<f64> {
        let inertia = self.inertia.as_mut()?;
        if now_ms < inertia.next_ms {
            return None;
        }
        inertia.delta *= TOUCH_INERTIA_DECAY;
        inertia.next_ms = inertia.next_ms.saturating_add(TOUCH_INERTIA_INTERVAL_MS);
        Some(inertia.delta)
    }

    /// Stops the tail once it is spent or was declined.
    pub fn settle(&mut self, delta: f64, accepted: bool) {
        if !accepted || abs(delta) <= TOUCH_INERTIA_MIN_DELTA {
            self.inertia = None;
        }
    }

    pub fn has_inertia(&self) -> bool {
        self.inertia.is_some()
    }

    pub fn end(&mut self) {
        self.touch_y = None;
    }

    /// Drops the inertia tail but keeps tracking an active finger.
    pub fn cancel_inertia(&mut self) {
        self.inertia = None;
    }

    pub fn cancel(&mut self) {
        self.touch_y = None;
        self.inertia = None;
    }
}
