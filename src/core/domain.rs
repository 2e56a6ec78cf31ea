use indexmap::IndexSet;
use ordered_float::OrderedFloat;

use crate::core::{SeriesKind, SeriesSet};

/// Fallback domain used when no finite value is available.
pub const EMPTY_DOMAIN: (f64, f64) = (0.0, 1.0);

/// Continuous X domain covering line/bar data and x-thresholds.
#[must_use]
pub fn compute_x_domain(series: &SeriesSet) -> (f64, f64) {
    let values = series.iter().flat_map(|(_, series)| {
        let points = series.points().iter().map(|point| point.x);
        let threshold = match series.kind() {
            SeriesKind::XThreshold => series.threshold(),
            _ => None,
        };
        points.chain(threshold)
    });
    widen_degenerate(min_max(values))
}

/// Distinct X categories in first-seen order, x-thresholds included.
#[must_use]
pub fn compute_x_categories(series: &SeriesSet) -> Vec<f64> {
    let mut categories: IndexSet<OrderedFloat<f64>> = IndexSet::new();
    for (_, series) in series.iter() {
        for point in series.points() {
            if point.x.is_finite() {
                categories.insert(OrderedFloat(point.x));
            }
        }
        if series.kind() == SeriesKind::XThreshold {
            if let Some(x) = series.threshold().filter(|x| x.is_finite()) {
                categories.insert(OrderedFloat(x));
            }
        }
    }
    categories.into_iter().map(|value| value.0).collect()
}

/// Y domain covering every point value and y-threshold; bars anchor the domain at zero.
#[must_use]
pub fn compute_y_domain(series: &SeriesSet) -> (f64, f64) {
    let anchor = series.has_bars().then_some(0.0);
    let values = series.iter().flat_map(|(_, series)| {
        let points = series.points().iter().map(|point| point.y);
        let threshold = match series.kind() {
            SeriesKind::YThreshold => series.threshold(),
            _ => None,
        };
        points.chain(threshold)
    });
    widen_degenerate(min_max(values.chain(anchor)))
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|value| value.is_finite())
        .fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}

/// Relative padding for single-value domains; a fixed ±1 vanishes past ~1e16.
const DEGENERATE_RELATIVE_PAD: f64 = 1e-9;

fn widen_degenerate(range: Option<(f64, f64)>) -> (f64, f64) {
    match range {
        None => EMPTY_DOMAIN,
        Some((min, max)) if min == max => {
            let pad = (min.abs() * DEGENERATE_RELATIVE_PAD).max(1.0);
            ((min - pad).max(f64::MIN), (max + pad).min(f64::MAX))
        }
        Some(range) => range,
    }
}
