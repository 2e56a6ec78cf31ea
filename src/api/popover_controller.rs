use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::Rect;
use crate::interaction::{DismissReason, FocusTarget, PopoverView};
use crate::render::Renderer;

use super::ChartEngine;

/// Work completed by one `tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickOutcome {
    /// A deferred pointer move was applied.
    pub pointer_applied: bool,
    /// Where the host should move focus after a dismissal settled.
    pub focus: Option<FocusTarget>,
}

impl<R: Renderer> ChartEngine<R> {
    /// Closes the popover.
    ///
    /// Outside clicks reset everything. Escape clears highlight and legend
    /// emphasis. The dismiss button only unpins. The last two schedule a
    /// focus return resolved by the next `tick`.
    pub fn dismiss_popover(&mut self, reason: DismissReason) {
        self.store.unpin_popover();
        match reason {
            DismissReason::OutsideClick => {
                self.store.clear_state();
                self.focused = false;
            }
            DismissReason::Escape => {
                self.store.clear_highlight();
                self.store.clear_highlighted_legend();
                self.popover.schedule_focus_return();
            }
            DismissReason::DismissButton => self.popover.schedule_focus_return(),
        }
        self.popover.release();
        debug!(?reason, "popover dismissed");
        self.sync_derived_state();
    }

    /// Drains deferred work: the trailing throttled pointer move and any
    /// pending focus return.
    pub fn tick(&mut self, now: Duration) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if let Some(sample) = self.pointer_throttle.poll(now) {
            self.apply_pointer_move(sample);
            outcome.pointer_applied = true;
        }
        if self.popover.take_focus_return() {
            let target = if self.store.get().is_idle() {
                self.store.clear_highlight();
                self.store.clear_highlighted_legend();
                FocusTarget::Plot
            } else {
                FocusTarget::Application
            };
            self.focused = true;
            self.sync_derived_state();
            debug!(?target, "focus returned after dismiss");
            outcome.focus = Some(target);
        }
        outcome
    }

    /// Reports the box the popover renderer drew, in client coordinates.
    ///
    /// When unset, the computed placement is used for dead-zone checks.
    pub fn set_popover_bounds(&mut self, bounds: Option<Rect>) {
        self.popover.set_reported_bounds(bounds);
    }

    #[must_use]
    pub fn popover_bounds(&self) -> Option<Rect> {
        self.popover.bounds()
    }

    #[must_use]
    pub fn popover_view(&self) -> &PopoverView {
        self.popover.view()
    }

    #[must_use]
    pub fn is_popover_open(&self) -> bool {
        self.popover.is_open()
    }
}
