//! A headless virtual list engine.
//!
//! Renders very large ordered lists by materializing only a scroll-dependent window of items,
//! while reporting a scroll extent that matches the full list. Item heights need not be known
//! up front: unmeasured items use an estimate, and measurements reported by the renderer are
//! cached by item key and folded into every later range computation.
//!
//! It is UI-agnostic. A host layer is expected to:
//! - forward wheel/touch/scroll events and call `on_frame` once per animation frame
//! - render the items in the visible window
//! - report measured item heights back
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod heights;
pub mod input;
mod key;
mod list;
mod options;
mod range;
mod scroll_to;
pub mod scrollbar;
mod state;
mod types;


pub use error::ScrollToError;
pub use heights::HeightCache;
pub use key::ListKey;
pub use list::{ScrollSurface, VirtualList};
pub use options::{KeyOf, ListOptions, OnScrollToComplete, OnVisibleChange};
pub use range::{ItemBounds, compute_range, item_bounds, keep_in_range, list_mode};
pub use scroll_to::DEFAULT_SCROLL_TO_MAX_STEPS;
pub use scrollbar::{ScrollBarMetrics, ThumbGeometry};
pub use state::ScrollState;
pub use types::{
    EventDisposition, FillerStyle, HolderStyle, ListMode, ScrollAlign, ScrollTarget,
    ScrollToOutcome, VisibleRange,
};
