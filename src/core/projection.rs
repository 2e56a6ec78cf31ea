use std::collections::BTreeMap;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::domain::{compute_x_categories, compute_x_domain, compute_y_domain};
use crate::core::scale::nearest_by;
use crate::core::{
    BandScale, ChartScale, DataPoint, LinearScale, Rect, Series, SeriesId, SeriesKind, SeriesSet,
    Viewport,
};
use crate::error::ChartResult;
use crate::render::Color;

/// Type of the X axis scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum XScaleType {
    #[default]
    Linear,
    Categorical,
}

/// Inputs of one layout pass besides the series snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotLayout {
    pub viewport: Viewport,
    pub x_scale_type: XScaleType,
    pub x_domain: Option<(f64, f64)>,
    pub y_domain: Option<(f64, f64)>,
    pub band_padding: f64,
}

impl PlotLayout {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            x_scale_type: XScaleType::Linear,
            x_domain: None,
            y_domain: None,
            band_padding: 0.2,
        }
    }
}

/// Logical coordinates of a scaled point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointIndex {
    /// Column (distinct scaled X) index.
    pub x: usize,
    /// Rank inside the column, in series order.
    pub y: usize,
}

/// Pixel-space projection of one datum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaledPoint {
    pub x: f64,
    pub y: f64,
    pub series: SeriesId,
    pub datum: DataPoint,
    pub index: PointIndex,
    pub color: Color,
}

/// All points sharing one scaled X position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XColumn {
    pub index: usize,
    pub x: f64,
    pub scaled_x: f64,
}

/// Pixel region covering every bar of one X category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGroup {
    pub x: f64,
    pub rect: Rect,
}

/// Derived plot geometry for one series/layout snapshot.
///
/// Never mutated after construction; a new snapshot builds a new model.
#[derive(Debug, Clone)]
pub struct PlotModel {
    series: SeriesSet,
    layout: PlotLayout,
    x_scale: ChartScale,
    y_scale: LinearScale,
    columns: Vec<XColumn>,
    column_points: Vec<Vec<ScaledPoint>>,
    series_points: Vec<Vec<ScaledPoint>>,
    bar_groups: Vec<BarGroup>,
    navigable: Vec<SeriesId>,
}

struct RawPoint {
    x: f64,
    y: f64,
    series: SeriesId,
    datum: DataPoint,
    color: Color,
}

impl PlotModel {
    pub fn build(series: SeriesSet, layout: PlotLayout) -> ChartResult<Self> {
        let viewport = layout.viewport.ensure_valid()?;
        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);

        let y_domain = layout.y_domain.unwrap_or_else(|| compute_y_domain(&series));
        let y_scale = LinearScale::new(y_domain, (height, 0.0))?;

        // Bars are placed into bands, so any bar series forces a categorical axis.
        let categorical = layout.x_scale_type == XScaleType::Categorical || series.has_bars();
        let categories = compute_x_categories(&series);
        let x_scale = if categorical && !categories.is_empty() {
            ChartScale::Band(BandScale::new(
                categories,
                (0.0, width),
                layout.band_padding,
            )?)
        } else {
            let x_domain = layout.x_domain.unwrap_or_else(|| compute_x_domain(&series));
            ChartScale::Linear(LinearScale::new(x_domain, (0.0, width))?)
        };

        let raw = project_all(&series, &x_scale, y_scale);
        let (columns, column_points) = group_columns(&series, raw, y_scale);

        let mut series_points = vec![Vec::new(); series.len()];
        for point in column_points.iter().flatten() {
            series_points[point.series.0].push(*point);
        }

        let bar_groups = match &x_scale {
            ChartScale::Band(band) if series.has_bars() => {
                let bandwidth = band.bandwidth();
                band.categories()
                    .filter_map(|x| {
                        band.band_start(x).map(|start| BarGroup {
                            x,
                            rect: Rect::new(start, 0.0, bandwidth, height),
                        })
                    })
                    .collect()
            }
            _ => Vec::new(),
        };

        let navigable = series.navigable();
        debug!(
            series = series.len(),
            columns = columns.len(),
            bar_groups = bar_groups.len(),
            "plot model rebuilt"
        );

        Ok(Self {
            series,
            layout,
            x_scale,
            y_scale,
            columns,
            column_points,
            series_points,
            bar_groups,
            navigable,
        })
    }

    #[must_use]
    pub fn series(&self) -> &SeriesSet {
        &self.series
    }

    #[must_use]
    pub fn layout(&self) -> PlotLayout {
        self.layout
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.layout.viewport
    }

    #[must_use]
    pub fn x_scale(&self) -> &ChartScale {
        &self.x_scale
    }

    #[must_use]
    pub fn y_scale(&self) -> LinearScale {
        self.y_scale
    }

    #[must_use]
    pub fn columns(&self) -> &[XColumn] {
        &self.columns
    }

    #[must_use]
    pub fn column(&self, index: usize) -> Option<XColumn> {
        self.columns.get(index).copied()
    }

    /// Points of one column in series order.
    #[must_use]
    pub fn column_points(&self, index: usize) -> &[ScaledPoint] {
        self.column_points
            .get(index)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Points of one series ordered by X.
    #[must_use]
    pub fn series_points(&self, id: SeriesId) -> &[ScaledPoint] {
        self.series_points
            .get(id.0)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn points(&self) -> impl Iterator<Item = &ScaledPoint> {
        self.column_points.iter().flatten()
    }

    #[must_use]
    pub fn bar_groups(&self) -> &[BarGroup] {
        &self.bar_groups
    }

    #[must_use]
    pub fn navigable_series(&self) -> &[SeriesId] {
        &self.navigable
    }

    /// Any bar series switches the chart to group navigation.
    #[must_use]
    pub fn is_group_navigation(&self) -> bool {
        !self.bar_groups.is_empty()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.bar_groups.is_empty()
    }

    #[must_use]
    pub fn nearest_column(&self, pixel_x: f64) -> Option<XColumn> {
        nearest_by(&self.columns, pixel_x, |column| column.scaled_x).copied()
    }

    /// Group whose box contains the plot-relative position, first match wins.
    #[must_use]
    pub fn group_at(&self, x: f64, y: f64) -> Option<usize> {
        self.bar_groups
            .iter()
            .position(|group| group.rect.contains(x, y))
    }

    /// Center X of a bar group in plot pixels.
    #[must_use]
    pub fn group_center_x(&self, index: usize) -> Option<f64> {
        let group = self.bar_groups.get(index)?;
        Some(group.rect.x + self.x_scale.center_offset())
    }
}

fn project_series(
    id: SeriesId,
    series: &Series,
    x_scale: &ChartScale,
    y_scale: LinearScale,
) -> Vec<RawPoint> {
    let color = series.color();
    match series.kind() {
        SeriesKind::Line | SeriesKind::Bar => {
            let mut skipped = 0usize;
            let mut out = Vec::with_capacity(series.points().len());
            for datum in series.points() {
                let mapped = datum
                    .is_finite()
                    .then(|| x_scale.to_pixel(datum.x).zip(y_scale.to_pixel(datum.y)))
                    .flatten();
                match mapped {
                    Some((x, y)) => out.push(RawPoint {
                        x,
                        y,
                        series: id,
                        datum: *datum,
                        color,
                    }),
                    None => skipped += 1,
                }
            }
            if skipped > 0 {
                warn!(
                    series = series.label(),
                    skipped, "skipping data points that cannot be projected"
                );
            }
            out
        }
        SeriesKind::XThreshold => {
            let baseline = y_scale.domain().0;
            series
                .threshold()
                .and_then(|x| x_scale.to_pixel(x).map(|px| (x, px)))
                .map(|(x, px)| RawPoint {
                    x: px,
                    y: y_scale.range().0,
                    series: id,
                    datum: DataPoint::new(x, baseline),
                    color,
                })
                .into_iter()
                .collect()
        }
        // Y-thresholds match every column and are expanded while grouping.
        SeriesKind::YThreshold => Vec::new(),
    }
}

#[cfg(not(feature = "parallel-projection"))]
fn project_all(series: &SeriesSet, x_scale: &ChartScale, y_scale: LinearScale) -> Vec<RawPoint> {
    series
        .iter()
        .flat_map(|(id, series)| project_series(id, series, x_scale, y_scale))
        .collect()
}

#[cfg(feature = "parallel-projection")]
fn project_all(series: &SeriesSet, x_scale: &ChartScale, y_scale: LinearScale) -> Vec<RawPoint> {
    use rayon::prelude::*;

    let entries: Vec<(SeriesId, &Series)> = series.iter().collect();
    entries
        .par_iter()
        .map(|(id, series)| project_series(*id, series, x_scale, y_scale))
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}

fn group_columns(
    series: &SeriesSet,
    raw: Vec<RawPoint>,
    y_scale: LinearScale,
) -> (Vec<XColumn>, Vec<Vec<ScaledPoint>>) {
    let mut grouped: BTreeMap<OrderedFloat<f64>, Vec<RawPoint>> = BTreeMap::new();
    for point in raw {
        grouped.entry(OrderedFloat(point.x)).or_default().push(point);
    }

    let y_thresholds: Vec<(SeriesId, f64, f64, Color)> = series
        .iter()
        .filter(|(_, series)| series.kind() == SeriesKind::YThreshold)
        .filter_map(|(id, series)| {
            let value = series.threshold()?;
            let pixel = y_scale.to_pixel(value)?;
            Some((id, value, pixel, series.color()))
        })
        .collect();

    let mut columns = Vec::with_capacity(grouped.len());
    let mut column_points = Vec::with_capacity(grouped.len());
    for (index, (scaled_x, mut points)) in grouped.into_iter().enumerate() {
        let x = points.first().map_or(f64::NAN, |point| point.datum.x);
        for (id, value, pixel, color) in &y_thresholds {
            points.push(RawPoint {
                x: scaled_x.0,
                y: *pixel,
                series: *id,
                datum: DataPoint::new(x, *value),
                color: *color,
            });
        }
        // Stable sort keeps insertion order for duplicate X values within a series.
        points.sort_by_key(|point| point.series);

        columns.push(XColumn {
            index,
            x,
            scaled_x: scaled_x.0,
        });
        column_points.push(
            points
                .into_iter()
                .enumerate()
                .map(|(rank, point)| ScaledPoint {
                    x: point.x,
                    y: point.y,
                    series: point.series,
                    datum: point.datum,
                    index: PointIndex { x: index, y: rank },
                    color: point.color,
                })
                .collect(),
        );
    }
    (columns, column_points)
}
