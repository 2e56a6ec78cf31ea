use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{PlotModel, ScaledPoint, SeriesId, XColumn, nearest_by};

use super::{Highlight, InteractionSnapshot};

/// Keys the chart reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKey {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Space,
    Enter,
    Escape,
}

impl ChartKey {
    #[must_use]
    pub fn is_arrow(self) -> bool {
        matches!(
            self,
            Self::ArrowLeft | Self::ArrowRight | Self::ArrowUp | Self::ArrowDown
        )
    }
}

/// Store operation requested by the navigator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavigationCommand {
    HighlightPoint(ScaledPoint),
    HighlightColumn(XColumn),
    HighlightGroup(usize),
    TogglePin,
}

/// Keyboard navigation over a plot model.
///
/// The navigator only computes the next highlight; the caller applies it to
/// the interaction store. It remembers the last visited column so that
/// Up/Down from idle lands on the column the user left off at.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyboardNavigator {
    column_cursor: usize,
}

impl KeyboardNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.column_cursor = 0;
    }

    #[must_use]
    pub fn column_cursor(&self) -> usize {
        self.column_cursor
    }

    /// Records the column of the current highlight, if any.
    pub fn sync(&mut self, snapshot: &InteractionSnapshot) {
        if let Some(index) = snapshot.highlight.column_index() {
            self.column_cursor = index;
        }
    }

    /// Highlight applied when the chart receives keyboard focus.
    #[must_use]
    pub fn on_focus(
        &self,
        model: &PlotModel,
        snapshot: &InteractionSnapshot,
    ) -> Option<NavigationCommand> {
        if model.is_group_navigation() {
            let index = snapshot.highlighted_group().unwrap_or(0);
            return Some(NavigationCommand::HighlightGroup(index));
        }
        if !snapshot.is_idle() {
            return None;
        }
        match model.navigable_series() {
            [] => None,
            [single] => model
                .series_points(*single)
                .first()
                .map(|point| NavigationCommand::HighlightPoint(*point)),
            _ => model.column(0).map(NavigationCommand::HighlightColumn),
        }
    }

    /// Resolves one key press. Arrow keys are ignored while the popover is pinned.
    #[must_use]
    pub fn on_key(
        &self,
        model: &PlotModel,
        snapshot: &InteractionSnapshot,
        key: ChartKey,
    ) -> Option<NavigationCommand> {
        if key.is_arrow() && snapshot.popover_pinned {
            return None;
        }
        let command = match key {
            ChartKey::ArrowLeft => self.move_within_x_axis(model, snapshot, -1),
            ChartKey::ArrowRight => self.move_within_x_axis(model, snapshot, 1),
            ChartKey::ArrowUp => self.move_between_series(model, snapshot, -1),
            ChartKey::ArrowDown => self.move_between_series(model, snapshot, 1),
            ChartKey::Space | ChartKey::Enter => {
                (!snapshot.is_idle() || snapshot.popover_pinned).then_some(NavigationCommand::TogglePin)
            }
            ChartKey::Escape => None,
        };
        trace!(?key, ?command, "keyboard navigation resolved");
        command
    }

    fn move_within_x_axis(
        &self,
        model: &PlotModel,
        snapshot: &InteractionSnapshot,
        direction: isize,
    ) -> Option<NavigationCommand> {
        if model.is_group_navigation() {
            return move_group(model, snapshot, direction);
        }
        match snapshot.highlight {
            Highlight::Point(point) => {
                let points = model.series_points(point.series);
                let current = points
                    .iter()
                    .position(|candidate| candidate.index == point.index)
                    .unwrap_or(0);
                let next = circle_index(current as isize + direction, points.len())?;
                Some(NavigationCommand::HighlightPoint(points[next]))
            }
            Highlight::Column(column) => {
                let next = circle_index(column.index as isize + direction, model.columns().len())?;
                model.column(next).map(NavigationCommand::HighlightColumn)
            }
            Highlight::Series(series) => edge_point(model, series, direction),
            Highlight::None | Highlight::Group(_) => match model.navigable_series() {
                [] => None,
                [single] => edge_point(model, *single, direction),
                _ => {
                    let columns = model.columns();
                    let index = if direction > 0 { 0 } else { columns.len().checked_sub(1)? };
                    model.column(index).map(NavigationCommand::HighlightColumn)
                }
            },
        }
    }

    /// Cycles through `[column, series 0, .., series n-1]` for multi-series
    /// charts and through `[series 0]` for single-series charts.
    fn move_between_series(
        &self,
        model: &PlotModel,
        snapshot: &InteractionSnapshot,
        direction: isize,
    ) -> Option<NavigationCommand> {
        if model.is_group_navigation() {
            return move_group(model, snapshot, direction);
        }
        let navigable = model.navigable_series();
        if navigable.is_empty() {
            return None;
        }
        let last = navigable.len() as isize - 1;
        let first = if navigable.len() > 1 { -1 } else { 0 };

        let current = match snapshot.highlight {
            Highlight::Point(point) => slot_of(navigable, point.series),
            Highlight::Series(series) => slot_of(navigable, series),
            Highlight::Column(_) => Some(-1),
            Highlight::None | Highlight::Group(_) => None,
        };
        let next = match current {
            None if direction > 0 => 0,
            None => last,
            Some(slot) => {
                let next = slot + direction;
                if next > last {
                    first
                } else if next < first {
                    last
                } else {
                    next
                }
            }
        };

        let column_index = snapshot
            .highlight
            .column_index()
            .unwrap_or(self.column_cursor);
        let column = model.column(column_index).or_else(|| model.column(0));

        if next < 0 {
            return column.map(NavigationCommand::HighlightColumn);
        }
        let target = navigable[next as usize];
        let points = model.series_points(target);
        let anchor_x = match snapshot.highlight {
            Highlight::Point(point) => point.x,
            _ => column.map_or(0.0, |column| column.scaled_x),
        };
        nearest_by(points, anchor_x, |point| point.x)
            .map(|point| NavigationCommand::HighlightPoint(*point))
    }
}

fn move_group(
    model: &PlotModel,
    snapshot: &InteractionSnapshot,
    direction: isize,
) -> Option<NavigationCommand> {
    let count = model.bar_groups().len();
    let next = match snapshot.highlighted_group() {
        Some(index) => circle_index(index as isize + direction, count)?,
        None if direction > 0 => 0,
        None => count.checked_sub(1)?,
    };
    Some(NavigationCommand::HighlightGroup(next))
}

fn edge_point(model: &PlotModel, series: SeriesId, direction: isize) -> Option<NavigationCommand> {
    let points = model.series_points(series);
    let point = if direction > 0 {
        points.first()
    } else {
        points.last()
    };
    point.map(|point| NavigationCommand::HighlightPoint(*point))
}

fn slot_of(navigable: &[SeriesId], series: SeriesId) -> Option<isize> {
    navigable
        .iter()
        .position(|candidate| *candidate == series)
        .map(|position| position as isize)
}

/// Wraps `index` into `0..len`: below zero goes to the end, past the end to zero.
fn circle_index(index: isize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let last = len as isize - 1;
    Some(if index < 0 {
        last as usize
    } else if index > last {
        0
    } else {
        index as usize
    })
}

#[cfg(test)]
mod tests {
    use super::circle_index;

    #[test]
    fn circle_index_wraps_both_ends() {
        assert_eq!(circle_index(-1, 3), Some(2));
        assert_eq!(circle_index(3, 3), Some(0));
        assert_eq!(circle_index(1, 3), Some(1));
        assert_eq!(circle_index(0, 0), None);
    }
}
