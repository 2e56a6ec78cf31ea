pub mod domain;
pub mod primitives;
pub mod projection;
pub mod scale;
pub mod series;
pub mod types;

pub use projection::{
    BarGroup, PlotLayout, PlotModel, PointIndex, ScaledPoint, XColumn, XScaleType,
};
pub use scale::{BandScale, ChartScale, LinearScale, nearest_by};
pub use series::{Series, SeriesId, SeriesKind, SeriesSet, SeriesValues};
pub use types::{DataPoint, Rect, Viewport};
