use serde::{Deserialize, Serialize};

use crate::core::{PlotLayout, Rect, Viewport, XScaleType};
use crate::error::{ChartError, ChartResult};
use crate::interaction::PopoverBehavior;

use super::{InteractionTuning, PopoverSize};

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub plot_origin_x: f64,
    #[serde(default)]
    pub plot_origin_y: f64,
    #[serde(default)]
    pub x_scale_type: XScaleType,
    #[serde(default)]
    pub x_domain: Option<(f64, f64)>,
    #[serde(default)]
    pub y_domain: Option<(f64, f64)>,
    #[serde(default)]
    pub interaction_tuning: InteractionTuning,
    #[serde(default = "default_band_padding")]
    pub band_padding: f64,
    #[serde(default)]
    pub popover_size: PopoverSize,
    #[serde(default = "default_popover_offset_px")]
    pub popover_offset_px: f64,
    #[serde(default = "default_value_precision")]
    pub value_precision: u32,
}

impl ChartEngineConfig {
    /// Creates a config with computed domains and default tuning.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            plot_origin_x: 0.0,
            plot_origin_y: 0.0,
            x_scale_type: XScaleType::Linear,
            x_domain: None,
            y_domain: None,
            interaction_tuning: InteractionTuning::default(),
            band_padding: default_band_padding(),
            popover_size: PopoverSize::default(),
            popover_offset_px: default_popover_offset_px(),
            value_precision: default_value_precision(),
        }
    }

    /// Sets the plot top-left corner in client coordinates.
    #[must_use]
    pub fn with_plot_origin(mut self, x: f64, y: f64) -> Self {
        self.plot_origin_x = x;
        self.plot_origin_y = y;
        self
    }

    #[must_use]
    pub fn with_x_scale_type(mut self, scale_type: XScaleType) -> Self {
        self.x_scale_type = scale_type;
        self
    }

    /// Fixes the X domain instead of computing it from series.
    #[must_use]
    pub fn with_x_domain(mut self, start: f64, end: f64) -> Self {
        self.x_domain = Some((start, end));
        self
    }

    /// Fixes the Y domain instead of computing it from series.
    #[must_use]
    pub fn with_y_domain(mut self, min: f64, max: f64) -> Self {
        self.y_domain = Some((min, max));
        self
    }

    #[must_use]
    pub fn with_interaction_tuning(mut self, tuning: InteractionTuning) -> Self {
        self.interaction_tuning = tuning;
        self
    }

    #[must_use]
    pub fn with_band_padding(mut self, padding: f64) -> Self {
        self.band_padding = padding;
        self
    }

    #[must_use]
    pub fn with_popover_size(mut self, width_px: f64, height_px: f64) -> Self {
        self.popover_size = PopoverSize {
            width_px,
            height_px,
        };
        self
    }

    #[must_use]
    pub fn with_popover_offset_px(mut self, offset_px: f64) -> Self {
        self.popover_offset_px = offset_px;
        self
    }

    #[must_use]
    pub fn with_value_precision(mut self, precision: u32) -> Self {
        self.value_precision = precision;
        self
    }

    #[must_use]
    pub fn plot_layout(self) -> PlotLayout {
        PlotLayout {
            viewport: self.viewport,
            x_scale_type: self.x_scale_type,
            x_domain: self.x_domain,
            y_domain: self.y_domain,
            band_padding: self.band_padding,
        }
    }

    /// Plot area in client coordinates.
    #[must_use]
    pub fn plot_rect(self) -> Rect {
        Rect::new(
            self.plot_origin_x,
            self.plot_origin_y,
            f64::from(self.viewport.width),
            f64::from(self.viewport.height),
        )
    }

    #[must_use]
    pub fn popover_behavior(self) -> PopoverBehavior {
        PopoverBehavior {
            width_px: self.popover_size.width_px,
            height_px: self.popover_size.height_px,
            offset_px: self.popover_offset_px,
            value_precision: self.value_precision,
        }
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config: {e}")))
    }
}

fn default_band_padding() -> f64 {
    0.2
}

fn default_popover_offset_px() -> f64 {
    12.0
}

fn default_value_precision() -> u32 {
    2
}
