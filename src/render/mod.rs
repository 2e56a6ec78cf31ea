mod frame;
mod null_renderer;
mod primitives;

pub use frame::OverlayFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, LinePrimitive, PointMarker, RectPrimitive, TextHAlign, TextPrimitive,
};

use crate::error::ChartResult;

/// Contract implemented by any overlay drawing backend.
///
/// Backends receive a fully materialized `OverlayFrame` so drawing code stays
/// isolated from chart geometry and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &OverlayFrame) -> ChartResult<()>;
}
