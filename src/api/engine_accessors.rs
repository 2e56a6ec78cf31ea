use crate::core::{PlotModel, Rect, Viewport};
use crate::error::ChartResult;
use crate::interaction::{InteractionSnapshot, VerticalMarker, resolve_vertical_marker};
use crate::render::Renderer;

use super::validation::validate_interaction_tuning;
use super::{ChartEngine, ChartEngineConfig, InteractionTuning};

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn config(&self) -> ChartEngineConfig {
        self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    /// Plot area in client coordinates.
    #[must_use]
    pub fn plot_rect(&self) -> Rect {
        self.config.plot_rect()
    }

    #[must_use]
    pub fn model(&self) -> &PlotModel {
        &self.model
    }

    /// Current interaction state.
    #[must_use]
    pub fn snapshot(&self) -> InteractionSnapshot {
        self.store.get()
    }

    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    #[must_use]
    pub fn vertical_marker(&self) -> Option<VerticalMarker> {
        resolve_vertical_marker(&self.model, &self.store.get().highlight)
    }

    #[must_use]
    pub fn interaction_tuning(&self) -> InteractionTuning {
        self.config.interaction_tuning
    }

    /// Replaces pointer tolerances. A pending throttled move is dropped.
    pub fn set_interaction_tuning(&mut self, tuning: InteractionTuning) -> ChartResult<()> {
        let tuning = validate_interaction_tuning(tuning)?;
        self.config.interaction_tuning = tuning;
        self.pointer_throttle = crate::interaction::Throttle::new(tuning.pointer_throttle());
        self.popover.set_dead_zone_px(tuning.popover_dead_zone_px);
        Ok(())
    }

    /// Maps a domain X value to plot pixels.
    #[must_use]
    pub fn map_x_to_pixel(&self, x: f64) -> Option<f64> {
        self.model.x_scale().to_pixel(x)
    }

    /// Maps a plot pixel to the nearest X domain value.
    #[must_use]
    pub fn map_pixel_to_x(&self, pixel: f64) -> Option<f64> {
        self.model.x_scale().to_domain(pixel)
    }

    #[must_use]
    pub fn map_y_to_pixel(&self, y: f64) -> Option<f64> {
        self.model.y_scale().to_pixel(y)
    }

    #[must_use]
    pub fn map_pixel_to_y(&self, pixel: f64) -> Option<f64> {
        self.model.y_scale().to_domain(pixel)
    }
}
