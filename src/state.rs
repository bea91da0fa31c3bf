/// A lightweight, serializable snapshot of the scroll position.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    pub scroll_top: f64,
    /// UI hint only (e.g. suppress pointer events); never affects the visible range.
    pub is_user_scrolling: bool,
}

/// The input source currently holding the list in the user-scrolling state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Gesture {
    /// Wheel has no end event; the gesture expires after a quiet period.
    Wheel { last_event_ms: u64 },
    Touch,
    ScrollBar,
}

/// `idle` / `userScrolling` tracking.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ScrollPhase {
    gesture: Option<Gesture>,
}

impl ScrollPhase {
    pub(crate) fn is_user_scrolling(&self) -> bool {
        self.gesture.is_some()
    }

    pub(crate) fn is_dragging_scrollbar(&self) -> bool {
        matches!(self.gesture, Some(Gesture::ScrollBar))
    }

    pub(crate) fn begin(&mut self, gesture: Gesture) -> bool {
        let changed = self.gesture.is_none();
        match (self.gesture, gesture) {
            // A wheel tick never downgrades an explicit touch or drag gesture.
            (Some(Gesture::Touch | Gesture::ScrollBar), Gesture::Wheel { .. }) => {}
            _ => self.gesture = Some(gesture),
        }
        changed
    }

    /// Ends the gesture if it matches `kind` (by variant). Returns `true` on a transition to idle.
    pub(crate) fn end(&mut self, kind: Gesture) -> bool {
        match self.gesture {
            Some(g) if core::mem::discriminant(&g) == core::mem::discriminant(&kind) => {
                self.gesture = None;
                true
            }
            _ => false,
        }
    }

    /// Programmatic scrolls and detaches force the idle state.
    pub(crate) fn reset(&mut self) -> bool {
        self.gesture.take().is_some()
    }

    /// Expires a wheel gesture after `delay_ms` without new wheel events.
    pub(crate) fn expire_wheel(&mut self, now_ms: u64, delay_ms: u64) -> bool {
        match self.gesture {
            Some(Gesture::Wheel { last_event_ms })
                if now_ms.saturating_sub(last_event_ms) >= delay_ms =>
            {
                self.gesture = None;
                true
            }
            _ => false,
        }
    }
}
