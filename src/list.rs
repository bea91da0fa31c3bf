use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::heights::HeightCache;
use crate::input::{FrameWheel, OriginScroll, TouchMove};
use crate::key::ListKey;
use crate::range::{self, compute_range, keep_in_range, list_mode, positive};
use crate::scroll_to::{ScrollToTask, StepContext};
use crate::scrollbar::{ScrollBarMetrics, ScrollBarState, ThumbGeometry};
use crate::state::{Gesture, ScrollPhase, ScrollState};
use crate::{
    EventDisposition, FillerStyle, HolderStyle, ListMode, ListOptions, ScrollAlign,
    ScrollTarget, ScrollToError, VisibleRange,
};

/// The host-side scroll container.
///
/// The engine pushes every clamped `scroll_top` here. Closures `FnMut(f64)` implement it.
pub trait ScrollSurface {
    fn set_scroll_top(&mut self, scroll_top: f64);
}

impl<F: FnMut(f64)> ScrollSurface for F {
    fn set_scroll_top(&mut self, scroll_top: f64) {
        self(scroll_top)
    }
}

/// A headless virtual list.
///
/// The host drives it:
/// - feeds native input (`on_wheel`, `on_touch_*`, `on_native_scroll`, `on_scrollbar_*`),
/// - calls [`VirtualList::on_frame`] once per animation frame,
/// - renders [`VirtualList::rendered`] and reports heights back via
///   [`VirtualList::report_height`].
///
/// Every mutation that can move the window recomputes the [`VisibleRange`] before returning;
/// use [`VirtualList::batch_update`] to coalesce several into one pass.
pub struct VirtualList<T, K> {
    options: ListOptions<T, K>,
    data: Vec<T>,
    data_version: u64,
    heights: HeightCache<K>,
    container_height: Option<f64>,

    scroll_top: f64,
    phase: ScrollPhase,
    range: VisibleRange,
    notified: (usize, usize, u64),

    surface: Option<Box<dyn ScrollSurface>>,
    wheel: FrameWheel,
    wheel_origin: OriginScroll,
    touch_origin: OriginScroll,
    touch: TouchMove,
    scroll_to: Option<ScrollToTask>,
    scrollbar: ScrollBarState,

    batch_depth: usize,
    batch_pending: bool,
}

impl<T, K: ListKey> VirtualList<T, K> {
    pub fn new(options: ListOptions<T, K>, data: Vec<T>) -> Self {
        vdebug!(
            len = data.len(),
            item_height = options.item_height,
            height = options.height,
            "VirtualList::new"
        );
        let mut list = Self {
            options,
            data,
            data_version: 0,
            heights: HeightCache::new(),
            container_height: None,
            scroll_top: 0.0,
            phase: ScrollPhase::default(),
            range: VisibleRange::full(0, None),
            notified: (0, 0, 0),
            surface: None,
            wheel: FrameWheel::default(),
            wheel_origin: OriginScroll::default(),
            touch_origin: OriginScroll::default(),
            touch: TouchMove::default(),
            scroll_to: None,
            scrollbar: ScrollBarState::default(),
            batch_depth: 0,
            batch_pending: false,
        };
        // The initial window is not a change; observers hear about the next one.
        list.recompute_range();
        list.notified = (list.range.start, list.range.end, list.data_version);
        list
    }

    pub fn options(&self) -> &ListOptions<T, K> {
        &self.options
    }

    pub fn set_options(&mut self, options: ListOptions<T, K>) {
        self.options = options;
        vdebug!(
            item_height = self.options.item_height,
            height = self.options.height,
            "VirtualList::set_options"
        );
        if !self.mode().is_virtual() {
            self.wheel.cancel();
            self.touch.cancel();
        }
        self.invalidate();
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut ListOptions<T, K>)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    // ============================== Data ==============================

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Replaces the data set. Cached heights are kept and follow items by key.
    pub fn set_data(&mut self, data: Vec<T>) {
        self.data = data;
        self.data_version = self.data_version.wrapping_add(1);
        vtrace!(len = self.data.len(), "set_data");
        self.invalidate();
    }

    pub fn key_of(&self, item: &T) -> K {
        (self.options.key_of)(item)
    }

    pub fn index_of_key(&self, key: &K) -> Option<usize> {
        self.data.iter().position(|item| self.key_of(item) == *key)
    }

    // ============================= Heights =============================

    pub fn heights(&self) -> &HeightCache<K> {
        &self.heights
    }

    /// Records a measured item height. The range is recomputed only when the cache changed.
    pub fn report_height(&mut self, key: K, height: f64) {
        if self.heights.report(key, height) {
            self.invalidate();
        }
    }

    /// Records many measurements in one recomputation pass.
    pub fn report_heights(&mut self, measurements: impl IntoIterator<Item = (K, f64)>) {
        self.batch_update(|list| {
            for (key, height) in measurements {
                list.report_height(key, height);
            }
        });
    }

    /// Replaces the height cache wholesale (e.g. on a full data reset).
    pub fn reset_heights(&mut self, heights: HeightCache<K>) {
        self.heights = heights;
        self.invalidate();
    }

    /// Natural height of the rendered content; sizes the track while the list is not windowed.
    pub fn report_container_height(&mut self, height: f64) {
        if !height.is_finite() || self.container_height == Some(height) {
            return;
        }
        self.container_height = Some(height);
        self.invalidate();
    }

    // ============================== Range ==============================

    pub fn mode(&self) -> ListMode {
        list_mode(
            self.options.virtual_scroll,
            self.options.height,
            self.options.item_height,
            self.data.len(),
        )
    }

    pub fn visible_range(&self) -> VisibleRange {
        self.range
    }

    /// Items to materialize.
    pub fn rendered(&self) -> &[T] {
        self.range.slice(&self.data)
    }

    /// Iterates the materialized items as `(index, key, item)`.
    pub fn for_each_rendered(&self, mut f: impl FnMut(usize, K, &T)) {
        let start = self.range.start;
        for (i, item) in self.rendered().iter().enumerate() {
            f(start + i, self.key_of(item), item);
        }
    }

    /// Batches several updates into a single recomputation and visibility notification.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        self.batch_depth = self.batch_depth.saturating_add(1);
        f(self);
        debug_assert!(self.batch_depth > 0, "batch_depth underflow");
        self.batch_depth = self.batch_depth.saturating_sub(1);
        if self.batch_depth == 0 && core::mem::take(&mut self.batch_pending) {
            self.refresh();
        }
    }

    fn invalidate(&mut self) {
        if self.batch_depth > 0 {
            self.batch_pending = true;
            return;
        }
        self.refresh();
    }

    fn refresh(&mut self) {
        self.recompute_range();
        self.notify_visible_change();
    }

    fn recompute_range(&mut self) {
        let len = self.data.len();
        self.range = match self.mode() {
            ListMode::Native => VisibleRange::full(len, None),
            ListMode::Contained => VisibleRange::full(len, self.container_height),
            ListMode::Windowed => {
                let (Some(estimate), Some(height)) = (
                    positive(self.options.item_height),
                    positive(self.options.height),
                ) else {
                    return;
                };
                compute_range(
                    &self.data,
                    &*self.options.key_of,
                    &self.heights,
                    estimate,
                    self.scroll_top,
                    height,
                )
            }
        };
    }

    fn notify_visible_change(&mut self) {
        let sig = (self.range.start, self.range.end, self.data_version);
        if self.notified == sig {
            return;
        }
        self.notified = sig;
        if let Some(cb) = &self.options.on_visible_change {
            cb(self.range.slice(&self.data), &self.data);
        }
    }

    // ============================== Scroll ==============================

    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    pub fn is_user_scrolling(&self) -> bool {
        self.phase.is_user_scrolling()
    }

    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            scroll_top: self.scroll_top,
            is_user_scrolling: self.phase.is_user_scrolling(),
        }
    }

    /// `scroll_height - height`, or `None` while the extent is unknown.
    pub fn max_scroll_top(&self) -> Option<f64> {
        range::max_scroll_top(self.range.scroll_height, positive(self.options.height))
    }

    pub fn keep_in_range(&self, scroll_top: f64) -> f64 {
        keep_in_range(scroll_top, self.max_scroll_top())
    }

    pub fn is_scroll_at_top(&self) -> bool {
        self.scroll_top <= 0.0
    }

    pub fn is_scroll_at_bottom(&self) -> bool {
        self.max_scroll_top().is_some_and(|max| self.scroll_top >= max)
    }

    /// Clamps and applies a scroll offset. Supersedes any in-flight scroll-to as well as wheel
    /// deltas and touch inertia that have not been applied yet.
    pub fn sync_scroll_top(&mut self, scroll_top: f64) {
        self.cancel_scroll_to();
        self.drop_pending_input();
        self.apply_scroll_top(scroll_top);
    }

    /// Older input must not land on top of a newer programmatic scroll.
    fn drop_pending_input(&mut self) {
        self.wheel.cancel();
        self.touch.cancel_inertia();
    }

    /// Like [`Self::sync_scroll_top`], with the value derived from the current offset.
    pub fn sync_scroll_top_with(&mut self, f: impl FnOnce(f64) -> f64) {
        let next = f(self.scroll_top);
        self.sync_scroll_top(next);
    }

    fn apply_scroll_top(&mut self, scroll_top: f64) {
        if self.batch_pending {
            // Heights reported earlier in this batch must bound the clamp.
            self.recompute_range();
        }
        let top = self.keep_in_range(scroll_top);
        if let Some(surface) = self.surface.as_mut() {
            surface.set_scroll_top(top);
        }
        if top == self.scroll_top {
            return;
        }
        vtrace!(from = self.scroll_top, to = top, "sync_scroll_top");
        self.scroll_top = top;
        self.scrollbar.request_flash();
        self.invalidate();
    }

    /// A native `scroll` event from the surface. The surface is authoritative: a position that
    /// disagrees with ours (e.g. the platform clamped after the data shrank) is adopted.
    pub fn on_native_scroll(&mut self, scroll_top: f64) {
        if scroll_top != self.scroll_top {
            self.apply_scroll_top(scroll_top);
        }
    }

    // ============================== Input ==============================

    /// A wheel event. Deltas are accumulated and applied on the next [`Self::on_frame`].
    pub fn on_wheel(&mut self, delta_y: f64, now_ms: u64) -> EventDisposition {
        if !self.mode().is_virtual() || !delta_y.is_finite() {
            return EventDisposition::Passthrough;
        }
        let (at_top, at_bottom) = (self.is_scroll_at_top(), self.is_scroll_at_bottom());
        if self
            .wheel_origin
            .check(delta_y, false, at_top, at_bottom, now_ms)
        {
            return EventDisposition::Passthrough;
        }
        self.phase.begin(Gesture::Wheel {
            last_event_ms: now_ms,
        });
        self.push_wheel_delta(delta_y);
        EventDisposition::Handled
    }

    /// Legacy line-scroll event (`DOMMouseScroll`). Only used to detect line-based wheels.
    pub fn on_legacy_line_scroll(&mut self, detail: f64) {
        if self.mode().is_virtual() {
            self.wheel.note_line_scroll(detail);
        }
    }

    /// Legacy pixel-scroll event (`MozMousePixelScroll`). Suppressed while virtualized so the
    /// platform does not scroll a second time.
    pub fn on_legacy_pixel_scroll(&mut self) -> EventDisposition {
        if self.mode().is_virtual() {
            EventDisposition::Handled
        } else {
            EventDisposition::Passthrough
        }
    }

    pub fn on_touch_start(&mut self, touches: usize, page_y: f64) {
        if !self.mode().is_virtual() {
            return;
        }
        if self.touch.start(touches, page_y) {
            self.cancel_scroll_to();
            self.phase.begin(Gesture::Touch);
        }
    }

    pub fn on_touch_move(&mut self, page_y: f64, now_ms: u64) -> EventDisposition {
        if !self.mode().is_virtual() {
            return EventDisposition::Passthrough;
        }
        let Some(delta) = self.touch.motion(page_y) else {
            return EventDisposition::Passthrough;
        };
        let accepted = self.apply_touch_delta(delta, false, now_ms);
        self.touch.arm_inertia(delta, now_ms);
        if accepted {
            EventDisposition::Handled
        } else {
            EventDisposition::Passthrough
        }
    }

    /// Ends the touch gesture. The inertia tail keeps running on subsequent frames.
    pub fn on_touch_end(&mut self) {
        self.touch.end();
        self.phase.end(Gesture::Touch);
    }

    fn apply_touch_delta(&mut self, delta: f64, smooth: bool, now_ms: u64) -> bool {
        let (at_top, at_bottom) = (self.is_scroll_at_top(), self.is_scroll_at_bottom());
        if self
            .touch_origin
            .check(delta, smooth, at_top, at_bottom, now_ms)
        {
            return false;
        }
        self.push_wheel_delta(delta);
        true
    }

    fn push_wheel_delta(&mut self, delta: f64) {
        self.cancel_scroll_to();
        self.wheel.push(delta);
        self.wheel.schedule();
    }

    // ============================ Scrollbar ============================

    /// The scrollbar thumb was dragged to a new scroll offset.
    pub fn on_scrollbar_scroll(&mut self, scroll_top: f64) {
        self.sync_scroll_top(scroll_top);
    }

    pub fn on_scrollbar_drag_start(&mut self) {
        self.cancel_scroll_to();
        self.phase.begin(Gesture::ScrollBar);
    }

    pub fn on_scrollbar_drag_end(&mut self) {
        self.phase.end(Gesture::ScrollBar);
    }

    /// Track metrics; `None` when the list is not virtualized (native scrollbar).
    pub fn scrollbar_metrics(&self) -> Option<ScrollBarMetrics> {
        if !self.mode().is_virtual() {
            return None;
        }
        Some(ScrollBarMetrics {
            viewport_height: positive(self.options.height)?,
            scroll_height: self.range.scroll_height.unwrap_or(0.0),
            count: self.data.len(),
        })
    }

    /// Thumb placement for the current offset; `None` when nothing overflows.
    pub fn scrollbar_thumb(&self) -> Option<ThumbGeometry> {
        let metrics = self.scrollbar_metrics()?;
        metrics
            .shows_thumb()
            .then(|| metrics.thumb(self.scroll_top))
    }

    /// Whether the thumb is inside its post-scroll flash window.
    pub fn is_scrollbar_visible(&self) -> bool {
        self.scrollbar.is_visible()
    }

    /// Shows the thumb briefly, starting next frame.
    pub fn flash_scrollbar(&mut self) {
        self.scrollbar.request_flash();
    }

    // ============================ Scroll-to ============================

    /// Scrolls to a pixel offset, or to an item by index/key.
    ///
    /// Pixel targets apply immediately. Item targets start an iterative search that continues on
    /// each [`Self::on_frame`] until the item is measured and aligned, or the step budget runs
    /// out; `on_scroll_to_complete` reports which. Unknown keys and out-of-range indexes are
    /// ignored. A new scroll-to, or any manual scroll, supersedes one in flight.
    pub fn scroll_to(&mut self, target: ScrollTarget<K>) -> Result<(), ScrollToError> {
        let (index, align, offset) = match target {
            ScrollTarget::Offset(top) => {
                if !top.is_finite() {
                    return Err(ScrollToError::NonFiniteOffset(top));
                }
                self.phase.reset();
                self.sync_scroll_top(top);
                return Ok(());
            }
            ScrollTarget::Index {
                index,
                align,
                offset,
            } => (Some(index), align, offset),
            ScrollTarget::Key { key, align, offset } => (self.index_of_key(&key), align, offset),
        };
        if !offset.is_finite() {
            return Err(ScrollToError::NonFiniteOffset(offset));
        }

        self.cancel_scroll_to();
        let Some(index) = index.filter(|&i| i < self.data.len()) else {
            vdebug!(len = self.data.len(), "scroll_to: target not found, ignoring");
            return Ok(());
        };
        self.phase.reset();
        self.drop_pending_input();
        self.start_scroll_to(index, align, offset);
        Ok(())
    }

    pub fn is_scroll_to_pending(&self) -> bool {
        self.scroll_to.is_some()
    }

    /// Aborts an in-flight scroll-to without firing its completion callback.
    pub fn cancel_scroll_to(&mut self) {
        if let Some(_task) = self.scroll_to.take() {
            vtrace!(index = _task.index(), "scroll_to: superseded");
        }
    }

    fn start_scroll_to(&mut self, index: usize, align: ScrollAlign, offset: f64) {
        self.scroll_to = Some(ScrollToTask::new(
            index,
            align,
            offset,
            self.options.scroll_to_max_steps,
        ));
        self.step_scroll_to();
    }

    fn step_scroll_to(&mut self) {
        let Some(mut task) = self.scroll_to.take() else {
            return;
        };
        let step = {
            let cx = StepContext {
                data: &self.data,
                key_of: &*self.options.key_of,
                heights: &self.heights,
                estimate: positive(self.options.item_height).unwrap_or(0.0),
                viewport_height: positive(self.options.height),
                scroll_top: self.scroll_top,
                max_scroll_top: self.max_scroll_top(),
            };
            task.step(&cx)
        };

        if let Some(top) = step.scroll_top {
            self.apply_scroll_top(top);
        }
        match step.done {
            Some(outcome) => {
                vdebug!(index = task.index(), ?outcome, "scroll_to: done");
                self.scrollbar.request_flash();
                if let Some(cb) = &self.options.on_scroll_to_complete {
                    cb(outcome);
                }
            }
            None => self.scroll_to = Some(task),
        }
    }

    // ============================== Frame ==============================

    /// Runs frame-deferred work: touch inertia, the coalesced wheel delta, the next scroll-to
    /// step, wheel-gesture expiry and scrollbar flash timing.
    ///
    /// Call once per animation frame, after the renderer has reported heights for the previous
    /// frame's window.
    pub fn on_frame(&mut self, now_ms: u64) {
        while let Some(delta) = self.touch.next_inertia(now_ms) {
            let accepted = self.apply_touch_delta(delta, true, now_ms);
            self.touch.settle(delta, accepted);
            if !self.touch.has_inertia() {
                break;
            }
        }

        if let Some(delta) = self.wheel.flush() {
            if self.mode().is_virtual() {
                vtrace!(delta, "wheel flush");
                let top = self.scroll_top + delta;
                self.apply_scroll_top(top);
            }
        }

        if self.scroll_to.is_some() {
            self.step_scroll_to();
        }

        self.phase
            .expire_wheel(now_ms, self.options.is_scrolling_reset_delay_ms);
        self.scrollbar.on_frame(now_ms);
    }

    // ============================== Surface ==============================

    /// Attaches the host scroll container and pushes the current offset to it.
    pub fn attach_surface(&mut self, surface: impl ScrollSurface + 'static) {
        let mut surface: Box<dyn ScrollSurface> = Box::new(surface);
        surface.set_scroll_top(self.scroll_top);
        self.surface = Some(surface);
    }

    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    /// Detaches the surface (unmount): drops pending wheel/touch work and aborts any scroll-to.
    /// Nothing scheduled before the detach fires afterwards.
    pub fn detach_surface(&mut self) -> Option<Box<dyn ScrollSurface>> {
        self.wheel.cancel();
        self.touch.cancel();
        self.wheel_origin.reset();
        self.touch_origin.reset();
        self.scroll_to = None;
        self.scrollbar.cancel();
        self.phase.reset();
        self.surface.take()
    }

    // ============================== Layout ==============================

    pub fn holder_style(&self) -> HolderStyle {
        let Some(height) = positive(self.options.height) else {
            return HolderStyle::default();
        };
        let is_virtual = self.mode().is_virtual();
        HolderStyle {
            height: self.options.full_height.then_some(height),
            max_height: (!self.options.full_height).then_some(height),
            overflow_hidden: is_virtual,
            pointer_events_none: is_virtual && self.phase.is_dragging_scrollbar(),
        }
    }

    pub fn filler_style(&self) -> FillerStyle {
        FillerStyle {
            height: self.range.offset.and(self.range.scroll_height),
            offset: self.range.offset,
        }
    }
}

impl<T, K> core::fmt::Debug for VirtualList<T, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtualList")
            .field("options", &self.options)
            .field("len", &self.data.len())
            .field("scroll_top", &self.scroll_top)
            .field("range", &self.range)
            .field("attached", &self.surface.is_some())
            .field("scroll_to_pending", &self.scroll_to.is_some())
            .finish_non_exhaustive()
    }
}
