use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::primitives::format_value;
use crate::core::{PlotModel, Rect, ScaledPoint, SeriesKind};
use crate::render::Color;

use super::{Highlight, InteractionSnapshot};

/// Why the detail popover is being dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DismissReason {
    /// Pointer-down outside both the popover and the chart container.
    OutsideClick,
    /// Escape pressed anywhere in the document.
    Escape,
    /// The popover's own dismiss button.
    DismissButton,
}

/// Where focus should move after a non-outside-click dismissal settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusTarget {
    /// The interactive "application" element; something is still highlighted.
    Application,
    /// The plot root; nothing is highlighted anymore.
    Plot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PopoverSide {
    Right,
    Left,
}

/// Anchor point in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopoverAnchor {
    pub x: f64,
    pub y: f64,
}

/// Resolved popover box in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopoverPlacement {
    pub anchor: PopoverAnchor,
    pub side: PopoverSide,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRow {
    pub label: String,
    pub value: String,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopoverDetails {
    pub title: String,
    pub rows: SmallVec<[DetailRow; 4]>,
}

/// Everything the popover renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopoverView {
    pub open: bool,
    pub pinned: bool,
    pub placement: Option<PopoverPlacement>,
    pub details: Option<PopoverDetails>,
}

impl PopoverView {
    #[must_use]
    pub fn closed() -> Self {
        Self {
            open: false,
            pinned: false,
            placement: None,
            details: None,
        }
    }
}

/// Geometry and formatting knobs of the popover.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopoverBehavior {
    pub width_px: f64,
    pub height_px: f64,
    /// Gap between the anchor and the nearest popover edge.
    pub offset_px: f64,
    /// Decimal places in detail rows.
    pub value_precision: u32,
}

impl Default for PopoverBehavior {
    fn default() -> Self {
        Self {
            width_px: 240.0,
            height_px: 120.0,
            offset_px: 12.0,
            value_precision: 2,
        }
    }
}

/// Decides when the detail popover is open, where it sits and what it shows.
#[derive(Debug, Clone)]
pub struct PopoverCoordinator {
    behavior: PopoverBehavior,
    dead_zone_px: f64,
    reported_bounds: Option<Rect>,
    retained: Option<(PopoverPlacement, PopoverDetails)>,
    view: PopoverView,
    focus_return_pending: bool,
}

impl PopoverCoordinator {
    #[must_use]
    pub fn new(behavior: PopoverBehavior, dead_zone_px: f64) -> Self {
        Self {
            behavior,
            dead_zone_px,
            reported_bounds: None,
            retained: None,
            view: PopoverView::closed(),
            focus_return_pending: false,
        }
    }

    #[must_use]
    pub fn behavior(&self) -> PopoverBehavior {
        self.behavior
    }

    #[must_use]
    pub fn dead_zone_px(&self) -> f64 {
        self.dead_zone_px
    }

    pub fn set_dead_zone_px(&mut self, dead_zone_px: f64) {
        self.dead_zone_px = dead_zone_px;
    }

    #[must_use]
    pub fn view(&self) -> &PopoverView {
        &self.view
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.view.open
    }

    /// Stores the box the popover renderer actually drew, in client coordinates.
    pub fn set_reported_bounds(&mut self, bounds: Option<Rect>) {
        self.reported_bounds = bounds.filter(|rect| rect.is_finite());
    }

    /// Box used for dead-zone tests: the reported box, else the computed placement.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        if !self.view.open {
            return None;
        }
        self.reported_bounds
            .or_else(|| self.view.placement.map(|placement| placement.rect))
    }

    /// Whether a client position falls inside the popover grown by the dead zone.
    #[must_use]
    pub fn is_pointer_over(&self, client_x: f64, client_y: f64) -> bool {
        self.bounds()
            .is_some_and(|rect| rect.contains_with_margin(client_x, client_y, self.dead_zone_px))
    }

    /// Recomputes the view from the current highlight.
    ///
    /// While pinned, the last open content is kept even if the highlight has
    /// been cleared in the meantime.
    pub fn sync(&mut self, model: &PlotModel, snapshot: &InteractionSnapshot, container: Rect) {
        let current = resolve_anchor(model, &snapshot.highlight, container).and_then(|anchor| {
            let details =
                format_details(model, &snapshot.highlight, self.behavior.value_precision)?;
            Some((compute_placement(anchor, self.behavior, container), details))
        });

        let content = match current {
            Some(content) => Some(content),
            None if snapshot.popover_pinned => self.retained.clone(),
            None => None,
        };

        let was_open = self.view.open;
        self.view = match &content {
            Some((placement, details)) => PopoverView {
                open: true,
                pinned: snapshot.popover_pinned,
                placement: Some(*placement),
                details: Some(details.clone()),
            },
            None => PopoverView::closed(),
        };
        self.retained = content;
        if !self.view.open {
            self.reported_bounds = None;
        }
        if was_open != self.view.open {
            debug!(open = self.view.open, pinned = self.view.pinned, "popover visibility changed");
        }
    }

    /// Drops retained content so a later sync can close the popover.
    pub fn release(&mut self) {
        self.retained = None;
    }

    pub fn schedule_focus_return(&mut self) {
        self.focus_return_pending = true;
    }

    #[must_use]
    pub fn take_focus_return(&mut self) -> bool {
        std::mem::take(&mut self.focus_return_pending)
    }

    pub fn reset(&mut self) {
        self.reported_bounds = None;
        self.retained = None;
        self.view = PopoverView::closed();
        self.focus_return_pending = false;
    }
}

/// Anchor of the highlight in client coordinates. Series-only highlights have none.
#[must_use]
pub fn resolve_anchor(
    model: &PlotModel,
    highlight: &Highlight,
    container: Rect,
) -> Option<PopoverAnchor> {
    let (x, y) = match highlight {
        Highlight::Point(point) => (point.x, point.y),
        Highlight::Column(column) => (column.scaled_x, container.height / 2.0),
        Highlight::Group(index) => {
            let group = model.bar_groups().get(*index)?;
            (model.group_center_x(*index)?, group.rect.y)
        }
        Highlight::Series(_) | Highlight::None => return None,
    };
    (x.is_finite() && y.is_finite()).then(|| PopoverAnchor {
        x: container.x + x,
        y: container.y + y,
    })
}

/// Places the popover to the right of the anchor, flipping left on overflow.
///
/// Pure function of its inputs, so repeated calls yield identical placements.
#[must_use]
pub fn compute_placement(
    anchor: PopoverAnchor,
    behavior: PopoverBehavior,
    container: Rect,
) -> PopoverPlacement {
    let width = behavior.width_px;
    let height = behavior.height_px;
    let right_x = anchor.x + behavior.offset_px;
    let (side, x) = if right_x + width <= container.right() {
        (PopoverSide::Right, right_x)
    } else {
        let left_x = anchor.x - behavior.offset_px - width;
        (PopoverSide::Left, left_x.max(container.x))
    };
    let y = (anchor.y - height / 2.0)
        .min(container.bottom() - height)
        .max(container.y);

    PopoverPlacement {
        anchor,
        side,
        rect: Rect::new(x, y, width, height),
    }
}

/// Title and rows describing the highlight.
#[must_use]
pub fn format_details(
    model: &PlotModel,
    highlight: &Highlight,
    precision: u32,
) -> Option<PopoverDetails> {
    match highlight {
        Highlight::Point(point) => {
            let mut rows = SmallVec::new();
            rows.push(detail_row(model, point, precision)?);
            // X-thresholds crossing the same X are listed with the point.
            for candidate in model.column_points(point.index.x) {
                let is_x_threshold = model
                    .series()
                    .get(candidate.series)
                    .is_some_and(|series| series.kind() == SeriesKind::XThreshold);
                if is_x_threshold
                    && candidate.series != point.series
                    && candidate.datum.x == point.datum.x
                {
                    rows.extend(detail_row(model, candidate, precision));
                }
            }
            Some(PopoverDetails {
                title: format_value(point.datum.x, precision),
                rows,
            })
        }
        Highlight::Column(column) => column_details(model, column.index, column.x, precision),
        Highlight::Group(index) => {
            let group = model.bar_groups().get(*index)?;
            let column = model
                .columns()
                .iter()
                .find(|column| column.x == group.x)?;
            column_details(model, column.index, group.x, precision)
        }
        Highlight::Series(_) | Highlight::None => None,
    }
}

fn column_details(
    model: &PlotModel,
    column_index: usize,
    x: f64,
    precision: u32,
) -> Option<PopoverDetails> {
    let rows: SmallVec<[DetailRow; 4]> = model
        .column_points(column_index)
        .iter()
        .filter_map(|point| detail_row(model, point, precision))
        .collect();
    (!rows.is_empty()).then(|| PopoverDetails {
        title: format_value(x, precision),
        rows,
    })
}

fn detail_row(model: &PlotModel, point: &ScaledPoint, precision: u32) -> Option<DetailRow> {
    let series = model.series().get(point.series)?;
    let value = match series.kind() {
        SeriesKind::XThreshold => String::new(),
        _ => format_value(point.datum.y, precision),
    };
    Some(DetailRow {
        label: series.label().to_owned(),
        value,
        color: point.color,
    })
}
