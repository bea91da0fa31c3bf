/// The window of items that should be materialized.
///
/// `start..=end` is inclusive. In windowed mode `end` may equal the data length (the trailing
/// buffer slot), so always go through [`VisibleRange::slice`] when indexing data.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize,
    /// Pixel offset of `start` from the top of the full list. `None` when every item is rendered.
    pub offset: Option<f64>,
    /// Total extent of the list under current height knowledge. `None` until known.
    pub scroll_height: Option<f64>,
}

impl VisibleRange {
    /// The full-range window used when virtualization is inactive.
    pub fn full(len: usize, scroll_height: Option<f64>) -> Self {
        Self {
            start: 0,
            end: len.saturating_sub(1),
            offset: None,
            scroll_height,
        }
    }

    /// Returns the materialized items, clamped to `data` bounds.
    pub fn slice<'a, T>(&self, data: &'a [T]) -> &'a [T] {
        let end = self.end.saturating_add(1).min(data.len());
        if self.start >= end {
            return &[];
        }
        &data[self.start..end]
    }
}

/// Which viewport edge a scroll-to target is placed against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollAlign {
    Top,
    Bottom,
    #[default]
    Auto,
}

/// A `scroll_to` request.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollTarget<K> {
    /// A raw pixel offset.
    Offset(f64),
    Index {
        index: usize,
        align: ScrollAlign,
        /// Extra distance kept between the item and the aligned edge.
        offset: f64,
    },
    Key {
        key: K,
        align: ScrollAlign,
        offset: f64,
    },
}

impl<K> ScrollTarget<K> {
    pub fn index(index: usize) -> Self {
        Self::Index {
            index,
            align: ScrollAlign::Auto,
            offset: 0.0,
        }
    }

    pub fn key(key: K) -> Self {
        Self::Key {
            key,
            align: ScrollAlign::Auto,
            offset: 0.0,
        }
    }

    pub fn with_align(mut self, new_align: ScrollAlign) -> Self {
        match &mut self {
            Self::Offset(_) => {}
            Self::Index { align, .. } | Self::Key { align, .. } => *align = new_align,
        }
        self
    }

    pub fn with_offset(mut self, extra: f64) -> Self {
        match &mut self {
            Self::Offset(_) => {}
            Self::Index { offset, .. } | Self::Key { offset, .. } => *offset = extra,
        }
        self
    }
}

impl<K> From<f64> for ScrollTarget<K> {
    fn from(top: f64) -> Self {
        Self::Offset(top)
    }
}

/// How an index/key scroll-to finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollToOutcome {
    /// The target was measured and sits at the requested alignment.
    Converged,
    /// The step budget ran out; the last applied position is kept.
    BestEffort,
}

/// What the host should do with the native event it just forwarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventDisposition {
    /// The engine consumed the event; call `preventDefault`.
    Handled,
    /// Leave the event to native scrolling.
    Passthrough,
}

impl EventDisposition {
    pub fn prevent_default(self) -> bool {
        matches!(self, Self::Handled)
    }
}

/// How the list is currently rendered, derived from options and data length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListMode {
    /// Virtualization disabled or under-configured: native scrolling, every item rendered.
    Native,
    /// Virtualization enabled but content fits: every item rendered, virtual scrollbar kept.
    Contained,
    /// Only the visible window is rendered.
    Windowed,
}

impl ListMode {
    pub fn is_virtual(self) -> bool {
        !matches!(self, Self::Native)
    }
}

/// Layout hints for the scroll holder element.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HolderStyle {
    pub height: Option<f64>,
    pub max_height: Option<f64>,
    /// Native overflow is hidden; scrolling is emulated.
    pub overflow_hidden: bool,
    pub pointer_events_none: bool,
}

/// Layout hints for the spacer that gives the holder its full scroll extent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FillerStyle {
    pub height: Option<f64>,
    /// Vertical translation of the rendered slice.
    pub offset: Option<f64>,
}
