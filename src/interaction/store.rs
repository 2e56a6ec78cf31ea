use tracing::trace;

use crate::core::{ScaledPoint, SeriesId, XColumn};
use crate::error::{ChartError, ChartResult};
use crate::extensions::InteractionObserver;

use super::{Highlight, InteractionSnapshot};

/// Single owner of the chart highlight state.
///
/// Every mutation goes through one of the methods below. Observers are invoked
/// synchronously, in registration order, right after a change is committed.
/// Calls that leave the state unchanged do not notify.
#[derive(Default)]
pub struct InteractionStore {
    snapshot: InteractionSnapshot,
    observers: Vec<Box<dyn InteractionObserver>>,
}

impl std::fmt::Debug for InteractionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractionStore")
            .field("snapshot", &self.snapshot)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl InteractionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self) -> InteractionSnapshot {
        self.snapshot
    }

    pub fn highlight_point(&mut self, point: ScaledPoint) {
        self.commit(Highlight::Point(point), self.snapshot.popover_pinned);
    }

    pub fn highlight_series(&mut self, series: Option<SeriesId>) {
        let highlight = series.map_or(Highlight::None, Highlight::Series);
        self.commit(highlight, self.snapshot.popover_pinned);
    }

    pub fn highlight_x(&mut self, column: Option<XColumn>) {
        let highlight = column.map_or(Highlight::None, Highlight::Column);
        self.commit(highlight, self.snapshot.popover_pinned);
    }

    pub fn highlight_group(&mut self, group: Option<usize>) {
        let highlight = group.map_or(Highlight::None, Highlight::Group);
        self.commit(highlight, self.snapshot.popover_pinned);
    }

    /// Returns to idle; the pin flag is left untouched.
    pub fn clear_highlight(&mut self) {
        self.commit(Highlight::None, self.snapshot.popover_pinned);
    }

    /// Drops a series-only (legend) highlight; other variants are kept.
    pub fn clear_highlighted_legend(&mut self) {
        if matches!(self.snapshot.highlight, Highlight::Series(_)) {
            self.commit(Highlight::None, self.snapshot.popover_pinned);
        }
    }

    /// Returns to idle and unpins the popover.
    pub fn clear_state(&mut self) {
        self.commit(Highlight::None, false);
    }

    pub fn pin_popover(&mut self) {
        self.commit(self.snapshot.highlight, true);
    }

    pub fn unpin_popover(&mut self) {
        self.commit(self.snapshot.highlight, false);
    }

    pub fn toggle_popover_pin(&mut self) {
        self.commit(self.snapshot.highlight, !self.snapshot.popover_pinned);
    }

    /// Registers an observer with a unique, non-empty id.
    pub fn register_observer(&mut self, observer: Box<dyn InteractionObserver>) -> ChartResult<()> {
        let observer_id = observer.id().to_owned();
        if observer_id.is_empty() {
            return Err(ChartError::InvalidData(
                "observer id must not be empty".to_owned(),
            ));
        }
        if self.has_observer(&observer_id) {
            return Err(ChartError::InvalidData(format!(
                "observer with id `{observer_id}` is already registered"
            )));
        }
        self.observers.push(observer);
        Ok(())
    }

    /// Unregisters an observer by id. Returns `true` when removed.
    pub fn unregister_observer(&mut self, observer_id: &str) -> bool {
        match self
            .observers
            .iter()
            .position(|observer| observer.id() == observer_id)
        {
            Some(position) => {
                self.observers.remove(position);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn has_observer(&self, observer_id: &str) -> bool {
        self.observers
            .iter()
            .any(|observer| observer.id() == observer_id)
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn commit(&mut self, highlight: Highlight, popover_pinned: bool) {
        if self.snapshot.highlight == highlight && self.snapshot.popover_pinned == popover_pinned {
            return;
        }
        self.snapshot = InteractionSnapshot {
            highlight,
            popover_pinned,
            revision: self.snapshot.revision + 1,
        };
        trace!(
            phase = ?self.snapshot.phase(),
            pinned = popover_pinned,
            revision = self.snapshot.revision,
            "interaction state committed"
        );
        let snapshot = self.snapshot;
        for observer in &mut self.observers {
            observer.on_state_changed(&snapshot);
        }
    }
}
