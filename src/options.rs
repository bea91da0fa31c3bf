use alloc::sync::Arc;

use crate::ScrollToOutcome;
use crate::scroll_to::DEFAULT_SCROLL_TO_MAX_STEPS;

/// Maps an item to its stable identity.
pub type KeyOf<T, K> = Arc<dyn Fn(&T) -> K + Send + Sync>;

/// Fired with `(rendered_slice, full_data)` whenever the window or the data set changes.
pub type OnVisibleChange<T> = Arc<dyn Fn(&[T], &[T]) + Send + Sync>;

/// Fired when an index/key scroll-to finishes.
pub type OnScrollToComplete = Arc<dyn Fn(ScrollToOutcome) + Send + Sync>;

/// Configuration for [`crate::VirtualList`].
///
/// Closures are stored in `Arc`s so adapters can clone, tweak a field and hand the result to
/// `VirtualList::set_options` cheaply.
pub struct ListOptions<T, K> {
    /// Estimated height for unmeasured items. Required for virtualization.
    pub item_height: Option<f64>,
    /// Viewport height. Required for virtualization.
    pub height: Option<f64>,
    /// `Some(false)` always uses native scrolling; `None`/`Some(true)` virtualize when possible.
    pub virtual_scroll: Option<bool>,
    /// The holder takes exactly `height` instead of capping at it.
    pub full_height: bool,
    pub key_of: KeyOf<T, K>,
    pub on_visible_change: Option<OnVisibleChange<T>>,
    pub on_scroll_to_complete: Option<OnScrollToComplete>,
    /// Scroll-to step budget (index/key targets).
    pub scroll_to_max_steps: usize,
    /// Quiet period after the last wheel event before `is_user_scrolling` clears.
    pub is_scrolling_reset_delay_ms: u64,
}

impl<T, K> Clone for ListOptions<T, K> {
    fn clone(&self) -> Self {
        Self {
            item_height: self.item_height,
            height: self.height,
            virtual_scroll: self.virtual_scroll,
            full_height: self.full_height,
            key_of: Arc::clone(&self.key_of),
            on_visible_change: self.on_visible_change.clone(),
            on_scroll_to_complete: self.on_scroll_to_complete.clone(),
            scroll_to_max_steps: self.scroll_to_max_steps,
            is_scrolling_reset_delay_ms: self.is_scrolling_reset_delay_ms,
        }
    }
}

impl<T, K> ListOptions<T, K> {
    /// Creates options with a key mapping and no heights (native mode until both heights are set).
    pub fn new(key_of: impl Fn(&T) -> K + Send + Sync + 'static) -> Self {
        Self {
            item_height: None,
            height: None,
            virtual_scroll: None,
            full_height: false,
            key_of: Arc::new(key_of),
            on_visible_change: None,
            on_scroll_to_complete: None,
            scroll_to_max_steps: DEFAULT_SCROLL_TO_MAX_STEPS,
            is_scrolling_reset_delay_ms: 150,
        }
    }

    pub fn with_item_height(mut self, item_height: f64) -> Self {
        self.item_height = Some(item_height);
        self
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_virtual(mut self, virtual_scroll: Option<bool>) -> Self {
        self.virtual_scroll = virtual_scroll;
        self
    }

    pub fn with_full_height(mut self, full_height: bool) -> Self {
        self.full_height = full_height;
        self
    }

    pub fn with_key_of(mut self, key_of: impl Fn(&T) -> K + Send + Sync + 'static) -> Self {
        self.key_of = Arc::new(key_of);
        self
    }

    pub fn with_on_visible_change(
        mut self,
        f: Option<impl Fn(&[T], &[T]) + Send + Sync + 'static>,
    ) -> Self {
        self.on_visible_change = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_scroll_to_complete(
        mut self,
        f: Option<impl Fn(ScrollToOutcome) + Send + Sync + 'static>,
    ) -> Self {
        self.on_scroll_to_complete = f.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_scroll_to_max_steps(mut self, steps: usize) -> Self {
        self.scroll_to_max_steps = steps;
        self
    }

    pub fn with_is_scrolling_reset_delay_ms(mut self, delay_ms: u64) -> Self {
        self.is_scrolling_reset_delay_ms = delay_ms;
        self
    }
}

impl<T, K> core::fmt::Debug for ListOptions<T, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListOptions")
            .field("item_height", &self.item_height)
            .field("height", &self.height)
            .field("virtual_scroll", &self.virtual_scroll)
            .field("full_height", &self.full_height)
            .field("scroll_to_max_steps", &self.scroll_to_max_steps)
            .field(
                "is_scrolling_reset_delay_ms",
                &self.is_scrolling_reset_delay_ms,
            )
            .finish_non_exhaustive()
    }
}
