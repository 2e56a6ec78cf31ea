use serde::{Deserialize, Serialize};

use crate::core::{PlotModel, ScaledPoint};

use super::Highlight;

/// Vertical guide drawn through the highlighted X position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerticalMarker {
    /// Plot-relative pixel X of the guide.
    pub x: f64,
    /// Every plotted point on that X, in series order.
    pub points: Vec<ScaledPoint>,
}

/// Derives the vertical marker from the current highlight.
///
/// Series-only highlights and idle state have no marker.
#[must_use]
pub fn resolve_vertical_marker(model: &PlotModel, highlight: &Highlight) -> Option<VerticalMarker> {
    match highlight {
        Highlight::Point(point) => Some(VerticalMarker {
            x: point.x,
            points: model.column_points(point.index.x).to_vec(),
        }),
        Highlight::Column(column) => Some(VerticalMarker {
            x: column.scaled_x,
            points: model.column_points(column.index).to_vec(),
        }),
        Highlight::Group(index) => {
            let group = model.bar_groups().get(*index)?;
            let points = model
                .columns()
                .iter()
                .find(|column| column.x == group.x)
                .map(|column| model.column_points(column.index).to_vec())
                .unwrap_or_default();
            Some(VerticalMarker {
                x: model.group_center_x(*index)?,
                points,
            })
        }
        Highlight::Series(_) | Highlight::None => None,
    }
}
