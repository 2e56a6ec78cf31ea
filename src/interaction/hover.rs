use crate::core::{PlotModel, ScaledPoint, XColumn, nearest_by};

/// Outcome of resolving a pointer position against the plot geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoverTarget {
    Point(ScaledPoint),
    Column(XColumn),
    Group(usize),
    /// Pointer is over the plot but not over anything highlightable.
    Clear,
}

/// Resolves a plot-relative pointer position.
///
/// Charts with bars use group boxes. Other charts pick the nearest column by
/// X, then the nearest point of that column by Y; the point wins only when
/// both distances are strictly below `hover_margin_px`, otherwise the whole
/// column is highlighted. Returns `None` when there is nothing to resolve.
#[must_use]
pub fn resolve_hover(
    model: &PlotModel,
    x: f64,
    y: f64,
    hover_margin_px: f64,
) -> Option<HoverTarget> {
    if !x.is_finite() || !y.is_finite() {
        return None;
    }

    if model.is_group_navigation() {
        return Some(match model.group_at(x, y) {
            Some(index) => HoverTarget::Group(index),
            None => HoverTarget::Clear,
        });
    }

    let column = model.nearest_column(x)?;
    let points = model.column_points(column.index);
    let closest = nearest_by(points, y, |point| point.y)?;
    if (x - closest.x).abs() < hover_margin_px && (y - closest.y).abs() < hover_margin_px {
        Some(HoverTarget::Point(*closest))
    } else {
        Some(HoverTarget::Column(column))
    }
}
