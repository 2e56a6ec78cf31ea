use tracing::debug;

use crate::core::{PlotModel, SeriesSet, Viewport, XScaleType};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::validation::validate_config;
use super::{ChartEngine, ChartEngineConfig};

impl<R: Renderer> ChartEngine<R> {
    /// Replaces the series snapshot.
    ///
    /// Passing the same shared snapshot again is a no-op. A new snapshot
    /// rebuilds plot geometry and resets all interaction state.
    pub fn set_series(&mut self, series: impl Into<SeriesSet>) -> ChartResult<()> {
        let series = series.into();
        if self.model.series().same_snapshot(&series) {
            return Ok(());
        }
        self.rebuild(self.config, series)
    }

    /// Updates plot dimensions.
    pub fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if viewport == self.config.viewport {
            return Ok(());
        }
        let mut config = self.config;
        config.viewport = viewport;
        self.rebuild(config, self.model.series().clone())
    }

    /// Moves the plot's top-left corner in client coordinates.
    pub fn set_plot_origin(&mut self, x: f64, y: f64) -> ChartResult<()> {
        let config = validate_config(self.config.with_plot_origin(x, y))?;
        self.config = config;
        self.sync_derived_state();
        Ok(())
    }

    pub fn set_x_scale_type(&mut self, scale_type: XScaleType) -> ChartResult<()> {
        if scale_type == self.config.x_scale_type {
            return Ok(());
        }
        let config = self.config.with_x_scale_type(scale_type);
        self.rebuild(config, self.model.series().clone())
    }

    /// Sets or clears explicit domains; `None` computes them from series.
    pub fn set_domains(
        &mut self,
        x_domain: Option<(f64, f64)>,
        y_domain: Option<(f64, f64)>,
    ) -> ChartResult<()> {
        let mut config = self.config;
        config.x_domain = x_domain;
        config.y_domain = y_domain;
        let config = validate_config(config)?;
        self.rebuild(config, self.model.series().clone())
    }

    /// Builds the model for `config` and commits both only when the build succeeds.
    fn rebuild(&mut self, config: ChartEngineConfig, series: SeriesSet) -> ChartResult<()> {
        let model = PlotModel::build(series, config.plot_layout())?;
        self.config = config;
        self.model = model;
        self.reset_interaction();
        debug!(
            width = self.config.viewport.width,
            height = self.config.viewport.height,
            "series snapshot applied"
        );
        Ok(())
    }

    /// Drops highlight, pin, pending pointer work and popover content.
    pub(super) fn reset_interaction(&mut self) {
        self.pointer_throttle.cancel();
        self.navigator.reset();
        self.popover.reset();
        self.store.clear_state();
        self.sync_derived_state();
    }
}
