use crate::heights::HeightCache;
use crate::key::ListKey;
use crate::{ListMode, VisibleRange};

/// Top/bottom of a single item under current height knowledge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemBounds {
    pub top: f64,
    pub bottom: f64,
    /// Whether the item's own height came from a measurement (vs. the estimate).
    pub measured: bool,
}

impl ItemBounds {
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

pub(crate) fn positive(v: Option<f64>) -> Option<f64> {
    v.filter(|v| v.is_finite() && *v > 0.0)
}

/// `ceil` without `std`.
pub(crate) fn ceil(v: f64) -> f64 {
    let t = v as i64 as f64;
    if t < v { t + 1.0 } else { t }
}

/// Derives the render mode.
///
/// Virtualization is enabled when not opted out and both heights are configured; it is active
/// (windowed) when the estimated content is taller than the viewport.
pub fn list_mode(
    virtual_scroll: Option<bool>,
    viewport_height: Option<f64>,
    item_height: Option<f64>,
    len: usize,
) -> ListMode {
    let (Some(height), Some(estimate)) = (positive(viewport_height), positive(item_height)) else {
        return ListMode::Native;
    };
    if virtual_scroll == Some(false) {
        return ListMode::Native;
    }
    if estimate * len as f64 > height {
        ListMode::Windowed
    } else {
        ListMode::Contained
    }
}

/// Computes the windowed range with a linear walk over `data`.
///
/// Every item contributes its cached height, or `estimate` when unmeasured. `start` is the first
/// item whose bottom reaches `scroll_top`; `end` is the first item whose bottom passes the
/// viewport bottom, plus one trailing buffer slot (capped at `data.len()`).
///
/// When nothing reaches `scroll_top` (data shrank while scrolled near the end) the window falls
/// back to the top: `start = 0`, `offset = 0`, `end = ceil(viewport / estimate)`.
pub fn compute_range<T, K: ListKey>(
    data: &[T],
    key_of: &dyn Fn(&T) -> K,
    heights: &HeightCache<K>,
    estimate: f64,
    scroll_top: f64,
    viewport_height: f64,
) -> VisibleRange {
    let len = data.len();
    let scroll_bottom = scroll_top + viewport_height;

    let mut item_top = 0.0f64;
    let mut start: Option<(usize, f64)> = None;
    let mut end: Option<usize> = None;

    for (i, item) in data.iter().enumerate() {
        let key = key_of(item);
        let item_bottom = item_top + heights.height_or(&key, estimate);

        if start.is_none() && item_bottom >= scroll_top {
            start = Some((i, item_top));
        }
        if end.is_none() && item_bottom > scroll_bottom {
            end = Some(i);
        }

        item_top = item_bottom;
    }

    let (start, offset, end) = match start {
        Some((start, offset)) => (start, offset, end),
        None => {
            vdebug!(scroll_top, len, "compute_range: no start index, resetting to top");
            let fallback_end = if estimate > 0.0 {
                ceil(viewport_height / estimate) as usize
            } else {
                0
            };
            (0, 0.0, Some(fallback_end))
        }
    };
    let end = end.unwrap_or(len.saturating_sub(1));

    VisibleRange {
        start,
        end: end.saturating_add(1).min(len),
        offset: Some(offset),
        scroll_height: Some(item_top),
    }
}

/// Locates item `index` with a prefix sum over cached heights and `estimate`.
///
/// Returns `None` when `index` is out of bounds.
pub fn item_bounds<T, K: ListKey>(
    data: &[T],
    key_of: &dyn Fn(&T) -> K,
    heights: &HeightCache<K>,
    estimate: f64,
    index: usize,
) -> Option<ItemBounds> {
    let target = data.get(index)?;
    let mut top = 0.0f64;
    for item in &data[..index] {
        top += heights.height_or(&key_of(item), estimate);
    }
    let cached = heights.get(&key_of(target));
    Some(ItemBounds {
        top,
        bottom: top + cached.unwrap_or(estimate),
        measured: cached.is_some(),
    })
}

/// Upper scroll bound for a given extent; `None` when the extent is not known yet.
pub(crate) fn max_scroll_top(scroll_height: Option<f64>, viewport_height: Option<f64>) -> Option<f64> {
    let max = scroll_height? - viewport_height.unwrap_or(0.0);
    max.is_finite().then_some(max)
}

/// Clamps `value` into `[0, max]`. An unknown `max` (or a `NaN` `value`) leaves only the lower
/// bound in force.
pub fn keep_in_range(value: f64, max: Option<f64>) -> f64 {
    let mut top = if value.is_nan() { 0.0 } else { value };
    if let Some(max) = max.filter(|m| !m.is_nan()) {
        top = top.min(max);
    }
    top.max(0.0)
}
