use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Continuous scale mapping a numeric domain onto a pixel range.
///
/// The range may be descending (`range_start > range_end`), which is how the
/// Y axis is inverted so that the domain minimum lands on the plot bottom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        let (domain_start, domain_end) = domain;
        let (range_start, range_end) = range;
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !(domain_end - domain_start).is_finite() {
            return Err(ChartError::InvalidData(
                "scale domain span overflows f64".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn to_pixel(self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        Some(self.range_start + normalized * (self.range_end - self.range_start))
    }

    #[must_use]
    pub fn to_domain(self, pixel: f64) -> Option<f64> {
        let span = self.range_end - self.range_start;
        if !pixel.is_finite() || span == 0.0 {
            return None;
        }
        let normalized = (pixel - self.range_start) / span;
        Some(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }
}

/// Categorical scale placing ordered categories into equally sized bands.
///
/// Inner and outer padding share one ratio `p`:
/// `step = span / (n + p)`, `start(i) = range_start + step * (p + i)`,
/// `bandwidth = step * (1 - p)`.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    categories: IndexMap<OrderedFloat<f64>, usize>,
    range_start: f64,
    range_end: f64,
    padding: f64,
}

impl BandScale {
    pub fn new(
        categories: impl IntoIterator<Item = f64>,
        range: (f64, f64),
        padding: f64,
    ) -> ChartResult<Self> {
        if !padding.is_finite() || !(0.0..1.0).contains(&padding) {
            return Err(ChartError::InvalidData(
                "band padding must be finite and in [0, 1)".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        let mut index = IndexMap::new();
        for category in categories {
            if !category.is_finite() {
                return Err(ChartError::InvalidData(
                    "band categories must be finite".to_owned(),
                ));
            }
            let next = index.len();
            index.entry(OrderedFloat(category)).or_insert(next);
        }
        if index.is_empty() {
            return Err(ChartError::InvalidData(
                "band scale requires at least one category".to_owned(),
            ));
        }

        Ok(Self {
            categories: index,
            range_start: range.0,
            range_end: range.1,
            padding,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn categories(&self) -> impl Iterator<Item = f64> + '_ {
        self.categories.keys().map(|key| key.0)
    }

    #[must_use]
    pub fn category_at(&self, index: usize) -> Option<f64> {
        self.categories.get_index(index).map(|(key, _)| key.0)
    }

    #[must_use]
    pub fn index_of(&self, value: f64) -> Option<usize> {
        self.categories.get(&OrderedFloat(value)).copied()
    }

    fn step(&self) -> f64 {
        (self.range_end - self.range_start) / (self.len() as f64 + self.padding)
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding)
    }

    /// Start pixel of the band holding `value`, or `None` for unknown categories.
    #[must_use]
    pub fn band_start(&self, value: f64) -> Option<f64> {
        let index = self.index_of(value)?;
        Some(self.range_start + self.step() * (self.padding + index as f64))
    }
}

/// Axis scale used for the X dimension of a chart.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartScale {
    Linear(LinearScale),
    Band(BandScale),
}

impl ChartScale {
    #[must_use]
    pub fn is_categorical(&self) -> bool {
        matches!(self, Self::Band(_))
    }

    /// Offset applied to band starts so category centers align with ticks.
    #[must_use]
    pub fn center_offset(&self) -> f64 {
        match self {
            Self::Linear(_) => 0.0,
            Self::Band(band) => (band.bandwidth() - 1.0).max(0.0) / 2.0,
        }
    }

    /// Maps a domain value to its pixel; band values map to their centered position.
    #[must_use]
    pub fn to_pixel(&self, value: f64) -> Option<f64> {
        match self {
            Self::Linear(scale) => scale.to_pixel(value),
            Self::Band(band) => band.band_start(value).map(|start| start + self.center_offset()),
        }
    }

    /// Maps a pixel back to the nearest domain value.
    ///
    /// Categorical scales return the category whose centered position is closest.
    #[must_use]
    pub fn to_domain(&self, pixel: f64) -> Option<f64> {
        match self {
            Self::Linear(scale) => scale.to_domain(pixel),
            Self::Band(band) => {
                let centers: Vec<(f64, f64)> = band
                    .categories()
                    .filter_map(|category| self.to_pixel(category).map(|px| (category, px)))
                    .collect();
                nearest_by(&centers, pixel, |entry| entry.1).map(|entry| entry.0)
            }
        }
    }
}

/// Returns the item whose key is closest to `target`.
///
/// Ties resolve to the earliest item so lookups stay deterministic. Items with
/// a non-finite key are ignored; an empty input yields `None`.
pub fn nearest_by<T, F>(items: &[T], target: f64, key: F) -> Option<&T>
where
    F: Fn(&T) -> f64,
{
    if !target.is_finite() {
        return None;
    }
    items
        .iter()
        .filter_map(|item| {
            let value = key(item);
            value
                .is_finite()
                .then(|| (OrderedFloat((value - target).abs()), item))
        })
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, item)| item)
}
