use serde::{Deserialize, Serialize};

use crate::core::{ScaledPoint, SeriesId, XColumn};

/// What the chart currently emphasizes. Exactly one variant is active.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Highlight {
    #[default]
    None,
    /// One data point; its series is emphasized in the legend as well.
    Point(ScaledPoint),
    /// Legend-only emphasis of a whole series.
    Series(SeriesId),
    /// Every point sharing one X position.
    Column(XColumn),
    /// One bar group by index.
    Group(usize),
}

/// State-machine view of `Highlight`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionPhase {
    Idle,
    PointHighlighted,
    SeriesHighlighted,
    ColumnHighlighted,
    GroupHighlighted,
}

impl Highlight {
    #[must_use]
    pub fn phase(&self) -> InteractionPhase {
        match self {
            Self::None => InteractionPhase::Idle,
            Self::Point(_) => InteractionPhase::PointHighlighted,
            Self::Series(_) => InteractionPhase::SeriesHighlighted,
            Self::Column(_) => InteractionPhase::ColumnHighlighted,
            Self::Group(_) => InteractionPhase::GroupHighlighted,
        }
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Column index implied by the highlight, when it has one.
    #[must_use]
    pub fn column_index(&self) -> Option<usize> {
        match self {
            Self::Point(point) => Some(point.index.x),
            Self::Column(column) => Some(column.index),
            _ => None,
        }
    }
}

/// Immutable state handed to observers and renderers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct InteractionSnapshot {
    pub highlight: Highlight,
    pub popover_pinned: bool,
    /// Incremented on every committed change.
    pub revision: u64,
}

impl InteractionSnapshot {
    #[must_use]
    pub fn phase(&self) -> InteractionPhase {
        self.highlight.phase()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.highlight.is_none()
    }

    #[must_use]
    pub fn highlighted_point(&self) -> Option<ScaledPoint> {
        match self.highlight {
            Highlight::Point(point) => Some(point),
            _ => None,
        }
    }

    #[must_use]
    pub fn highlighted_column(&self) -> Option<XColumn> {
        match self.highlight {
            Highlight::Column(column) => Some(column),
            _ => None,
        }
    }

    #[must_use]
    pub fn highlighted_group(&self) -> Option<usize> {
        match self.highlight {
            Highlight::Group(index) => Some(index),
            _ => None,
        }
    }

    /// Series emphasized in the legend: the highlighted point's series or the
    /// series-only highlight.
    #[must_use]
    pub fn emphasized_series(&self) -> Option<SeriesId> {
        match self.highlight {
            Highlight::Point(point) => Some(point.series),
            Highlight::Series(series) => Some(series),
            _ => None,
        }
    }
}
