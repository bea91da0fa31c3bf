use crate::heights::HeightCache;
use crate::key::ListKey;
use crate::range::{item_bounds, keep_in_range};
use crate::{ScrollAlign, ScrollToOutcome};

/// Default number of scroll-to steps before settling for a best-effort position.
pub const DEFAULT_SCROLL_TO_MAX_STEPS: usize = 10;

const SETTLE_EPSILON: f64 = 1e-6;

/// What a single scroll-to step asks the engine to do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Step {
    pub scroll_top: Option<f64>,
    pub done: Option<ScrollToOutcome>,
}

impl Step {
    fn wait() -> Self {
        Self {
            scroll_top: None,
            done: None,
        }
    }

    fn finish(scroll_top: Option<f64>, outcome: ScrollToOutcome) -> Self {
        Self {
            scroll_top,
            done: Some(outcome),
        }
    }
}

/// Inputs a step reads; borrowed from the engine for the duration of one step.
pub(crate) struct StepContext<'a, T, K> {
    pub data: &'a [T],
    pub key_of: &'a dyn Fn(&T) -> K,
    pub heights: &'a HeightCache<K>,
    pub estimate: f64,
    pub viewport_height: Option<f64>,
    pub scroll_top: f64,
    pub max_scroll_top: Option<f64>,
}

/// An in-flight index scroll.
///
/// The target position is re-estimated every step from the latest height cache. `Auto` is
/// resolved to a concrete edge on the first step that needs to move and stays fixed afterwards,
/// so successive steps all approach the same edge.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ScrollToTask {
    index: usize,
    align: ScrollAlign,
    offset: f64,
    steps_left: usize,
}

impl ScrollToTask {
    pub(crate) fn new(index: usize, align: ScrollAlign, offset: f64, max_steps: usize) -> Self {
        Self {
            index,
            align,
            offset,
            steps_left: max_steps.max(1),
        }
    }

    pub(crate) fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn step<T, K: ListKey>(&mut self, cx: &StepContext<'_, T, K>) -> Step {
        self.steps_left = self.steps_left.saturating_sub(1);
        let exhausted = self.steps_left == 0;

        let Some(bounds) = item_bounds(cx.data, cx.key_of, cx.heights, cx.estimate, self.index)
        else {
            vdebug!(index = self.index, "scroll_to: target left the data set");
            return Step::finish(None, ScrollToOutcome::BestEffort);
        };
        let Some(viewport) = cx.viewport_height else {
            return if exhausted {
                Step::finish(None, ScrollToOutcome::BestEffort)
            } else {
                Step::wait()
            };
        };

        let align = match self.align {
            ScrollAlign::Auto => {
                if bounds.top < cx.scroll_top {
                    ScrollAlign::Top
                } else if bounds.bottom > cx.scroll_top + viewport {
                    ScrollAlign::Bottom
                } else if bounds.measured {
                    return Step::finish(None, ScrollToOutcome::Converged);
                } else if exhausted {
                    return Step::finish(None, ScrollToOutcome::BestEffort);
                } else {
                    // Visible on the estimate; wait for the real height before deciding.
                    return Step::wait();
                }
            }
            align => align,
        };
        self.align = align;

        let target = match align {
            ScrollAlign::Top => bounds.top - self.offset,
            _ => bounds.bottom - viewport - self.offset,
        };
        let target = keep_in_range(target, cx.max_scroll_top);
        vtrace!(
            index = self.index,
            target,
            measured = bounds.measured,
            steps_left = self.steps_left,
            "scroll_to: step"
        );

        let settled = {
            let d = target - cx.scroll_top;
            d < SETTLE_EPSILON && d > -SETTLE_EPSILON
        };
        if bounds.measured && settled {
            return Step::finish(None, ScrollToOutcome::Converged);
        }
        if exhausted {
            vwarn!(index = self.index, "scroll_to: step budget exhausted");
            return Step::finish(Some(target), ScrollToOutcome::BestEffort);
        }
        Step {
            scroll_top: Some(target),
            done: None,
        }
    }
}
