/// Boundary validation failures for [`crate::VirtualList::scroll_to`].
///
/// Everything past this boundary degrades gracefully instead of failing: unknown keys,
/// out-of-range indexes and non-converging searches are silent no-ops or best-effort results.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ScrollToError {
    #[error("scroll offset must be finite, got {0}")]
    NonFiniteOffset(f64),
}
