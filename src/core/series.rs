use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::DataPoint;
use crate::render::Color;

/// Position of a series inside the current `SeriesSet` snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesKind {
    Line,
    Bar,
    XThreshold,
    YThreshold,
}

/// Plotted values of one series.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesValues {
    /// Ordered data for line and bar series.
    Points(Vec<DataPoint>),
    /// Single domain value for threshold series.
    Threshold(f64),
}

/// Immutable description of one plotted line, bar set or threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    kind: SeriesKind,
    label: String,
    color: Color,
    values: SeriesValues,
}

impl Series {
    #[must_use]
    pub fn line(label: impl Into<String>, points: Vec<DataPoint>) -> Self {
        Self::with_values(SeriesKind::Line, label, SeriesValues::Points(points))
    }

    #[must_use]
    pub fn bar(label: impl Into<String>, points: Vec<DataPoint>) -> Self {
        Self::with_values(SeriesKind::Bar, label, SeriesValues::Points(points))
    }

    /// Vertical threshold drawn at a fixed X value.
    #[must_use]
    pub fn x_threshold(label: impl Into<String>, x: f64) -> Self {
        Self::with_values(SeriesKind::XThreshold, label, SeriesValues::Threshold(x))
    }

    /// Horizontal threshold drawn at a fixed Y value.
    #[must_use]
    pub fn y_threshold(label: impl Into<String>, y: f64) -> Self {
        Self::with_values(SeriesKind::YThreshold, label, SeriesValues::Threshold(y))
    }

    fn with_values(kind: SeriesKind, label: impl Into<String>, values: SeriesValues) -> Self {
        Self {
            kind,
            label: label.into(),
            color: Color::rgb(0.0, 0.0, 0.0),
            values,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn kind(&self) -> SeriesKind {
        self.kind
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn values(&self) -> &SeriesValues {
        &self.values
    }

    /// Data points of a line or bar series; empty for thresholds.
    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        match &self.values {
            SeriesValues::Points(points) => points,
            SeriesValues::Threshold(_) => &[],
        }
    }

    #[must_use]
    pub fn threshold(&self) -> Option<f64> {
        match self.values {
            SeriesValues::Threshold(value) => Some(value),
            SeriesValues::Points(_) => None,
        }
    }

    #[must_use]
    pub fn is_bar(&self) -> bool {
        self.kind == SeriesKind::Bar
    }
}

/// Shared, immutable series snapshot supplied on every layout pass.
///
/// Derived caches are keyed by the snapshot identity: handing the engine a
/// clone of the same `SeriesSet` keeps caches, a fresh one rebuilds them.
#[derive(Debug, Clone, Default)]
pub struct SeriesSet {
    series: Arc<[Series]>,
}

impl SeriesSet {
    #[must_use]
    pub fn new(series: Vec<Series>) -> Self {
        Self {
            series: series.into(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: SeriesId) -> Option<&Series> {
        self.series.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SeriesId, &Series)> {
        self.series
            .iter()
            .enumerate()
            .map(|(index, series)| (SeriesId(index), series))
    }

    #[must_use]
    pub fn has_bars(&self) -> bool {
        self.series.iter().any(Series::is_bar)
    }

    #[must_use]
    pub fn same_snapshot(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.series, &other.series)
    }

    /// Series reachable with Up/Down navigation.
    ///
    /// Lines and thresholds are listed in order; all bar series collapse into
    /// the position of the first bar series.
    #[must_use]
    pub fn navigable(&self) -> Vec<SeriesId> {
        let mut result = Vec::with_capacity(self.series.len());
        let mut bar_seen = false;
        for (id, series) in self.iter() {
            if series.is_bar() {
                if bar_seen {
                    continue;
                }
                bar_seen = true;
            }
            result.push(id);
        }
        result
    }
}

impl From<Vec<Series>> for SeriesSet {
    fn from(series: Vec<Series>) -> Self {
        Self::new(series)
    }
}
