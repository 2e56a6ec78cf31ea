use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::SeriesId;
use crate::interaction::{
    ChartKey, DismissReason, FocusTrigger, HoverTarget, NavigationCommand, resolve_hover,
};
use crate::render::Renderer;

use super::ChartEngine;

/// Pointer position in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub client_x: f64,
    pub client_y: f64,
}

/// Where the pointer went when it left the plot element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerTarget {
    /// An element still contained in the plot root.
    InsidePlot,
    /// The detail popover itself.
    Popover,
    /// Anything else.
    Outside,
}

/// Pointer-out event: last client position plus the element entered next.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerOut {
    pub client_x: f64,
    pub client_y: f64,
    pub related: PointerTarget,
}

impl<R: Renderer> ChartEngine<R> {
    /// Handles pointer movement over the plot, throttled on the trailing edge.
    ///
    /// Moves arriving within the throttle interval are deferred; the latest
    /// one is applied by a later `tick`.
    pub fn pointer_move(&mut self, client_x: f64, client_y: f64, now: Duration) {
        let sample = PointerSample { client_x, client_y };
        if let Some(sample) = self.pointer_throttle.submit(sample, now) {
            self.apply_pointer_move(sample);
        }
    }

    pub(super) fn apply_pointer_move(&mut self, sample: PointerSample) {
        if self.store.get().popover_pinned {
            return;
        }
        if self.popover.is_pointer_over(sample.client_x, sample.client_y) {
            trace!("pointer over popover dead zone");
            return;
        }
        let x = sample.client_x - self.config.plot_origin_x;
        let y = sample.client_y - self.config.plot_origin_y;
        let hover_margin = self.config.interaction_tuning.hover_margin_px;
        match resolve_hover(&self.model, x, y, hover_margin) {
            Some(HoverTarget::Point(point)) => self.store.highlight_point(point),
            Some(HoverTarget::Column(column)) => self.store.highlight_x(Some(column)),
            Some(HoverTarget::Group(index)) => self.store.highlight_group(Some(index)),
            Some(HoverTarget::Clear) => {
                self.store.clear_highlight();
                self.store.clear_highlighted_legend();
            }
            None => return,
        }
        self.sync_derived_state();
    }

    /// Handles the pointer leaving the plot element.
    ///
    /// Always cancels a pending throttled move. Highlight is cleared only when
    /// the pointer left for an unrelated element outside the popover dead zone.
    pub fn pointer_out(&mut self, event: PointerOut) {
        self.pointer_throttle.cancel();
        if self.store.get().popover_pinned {
            return;
        }
        if self.popover.is_pointer_over(event.client_x, event.client_y) {
            return;
        }
        if event.related != PointerTarget::Outside {
            return;
        }
        self.store.clear_highlight();
        self.store.clear_highlighted_legend();
        self.sync_derived_state();
    }

    /// Handles the pointer leaving the popover box.
    ///
    /// An unpinned popover that the pointer abandons for something outside the
    /// chart clears the highlight. Moving back onto the plot keeps it.
    pub fn popover_pointer_leave(&mut self, related: PointerTarget) {
        if self.store.get().popover_pinned || related != PointerTarget::Outside {
            return;
        }
        self.pointer_throttle.cancel();
        self.store.clear_highlight();
        self.store.clear_highlighted_legend();
        trace!("pointer left popover for outside target");
        self.sync_derived_state();
    }

    /// Pointer-down on the plot pins an open popover or dismisses a pinned one.
    pub fn pointer_down(&mut self) {
        if !self.popover.is_open() {
            return;
        }
        if self.store.get().popover_pinned {
            self.dismiss_popover(DismissReason::DismissButton);
        } else {
            self.store.pin_popover();
            debug!("popover pinned by pointer");
            self.sync_derived_state();
        }
    }

    /// Pointer-down anywhere in the document; outside clicks dismiss the popover.
    pub fn document_pointer_down(&mut self, target: PointerTarget) {
        if target == PointerTarget::Outside
            && (self.popover.is_open() || self.store.get().popover_pinned)
        {
            self.dismiss_popover(DismissReason::OutsideClick);
        }
    }

    /// Handles one key press. Returns `true` when the key was consumed.
    pub fn key_down(&mut self, key: ChartKey) -> bool {
        if key == ChartKey::Escape {
            if self.popover.is_open() || self.store.get().popover_pinned {
                self.dismiss_popover(DismissReason::Escape);
                return true;
            }
            return false;
        }
        if !self.focused {
            return false;
        }
        let snapshot = self.store.get();
        match self.navigator.on_key(&self.model, &snapshot, key) {
            Some(command) => {
                self.apply_navigation(command);
                true
            }
            None => false,
        }
    }

    /// Focus gained. Only keyboard-initiated focus selects an initial highlight.
    pub fn focus(&mut self, trigger: FocusTrigger) {
        self.focused = true;
        if trigger != FocusTrigger::Keyboard {
            return;
        }
        let snapshot = self.store.get();
        if let Some(command) = self.navigator.on_focus(&self.model, &snapshot) {
            self.apply_navigation(command);
        }
    }

    /// Focus lost. A pinned popover keeps the highlight alive.
    pub fn blur(&mut self) {
        self.focused = false;
        if self.store.get().popover_pinned {
            return;
        }
        self.store.clear_highlight();
        self.sync_derived_state();
    }

    /// The whole chart container lost focus; resets highlight and pin.
    pub fn container_blur(&mut self) {
        self.focused = false;
        self.pointer_throttle.cancel();
        self.store.clear_state();
        self.sync_derived_state();
    }

    /// Legend hover: emphasize a series, or clear with `None`.
    pub fn legend_highlight(&mut self, series: Option<SeriesId>) {
        let series = series.filter(|id| self.model.series().get(*id).is_some());
        self.store.highlight_series(series);
        self.sync_derived_state();
    }

    fn apply_navigation(&mut self, command: NavigationCommand) {
        match command {
            NavigationCommand::HighlightPoint(point) => self.store.highlight_point(point),
            NavigationCommand::HighlightColumn(column) => self.store.highlight_x(Some(column)),
            NavigationCommand::HighlightGroup(index) => self.store.highlight_group(Some(index)),
            NavigationCommand::TogglePin => self.store.toggle_popover_pin(),
        }
        self.sync_derived_state();
    }
}
