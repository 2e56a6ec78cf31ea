use crate::error::{ChartError, ChartResult};

use super::{ChartEngineConfig, InteractionTuning};

pub(super) fn validate_config(config: ChartEngineConfig) -> ChartResult<ChartEngineConfig> {
    if !config.viewport.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: config.viewport.width,
            height: config.viewport.height,
        });
    }
    if !config.plot_origin_x.is_finite() || !config.plot_origin_y.is_finite() {
        return Err(ChartError::InvalidConfig(
            "plot origin must be finite".to_owned(),
        ));
    }
    if let Some(domain) = config.x_domain {
        validate_domain("x", domain)?;
    }
    if let Some(domain) = config.y_domain {
        validate_domain("y", domain)?;
    }
    validate_interaction_tuning(config.interaction_tuning)?;
    if !config.band_padding.is_finite() || !(0.0..1.0).contains(&config.band_padding) {
        return Err(ChartError::InvalidConfig(
            "band padding must be finite and in [0, 1)".to_owned(),
        ));
    }
    let size = config.popover_size;
    if !size.width_px.is_finite()
        || !size.height_px.is_finite()
        || size.width_px <= 0.0
        || size.height_px <= 0.0
    {
        return Err(ChartError::InvalidConfig(
            "popover size must be finite and > 0".to_owned(),
        ));
    }
    if !config.popover_offset_px.is_finite() || config.popover_offset_px < 0.0 {
        return Err(ChartError::InvalidConfig(
            "popover offset must be finite and >= 0".to_owned(),
        ));
    }
    if config.value_precision > 12 {
        return Err(ChartError::InvalidConfig(
            "value precision must be <= 12".to_owned(),
        ));
    }
    Ok(config)
}

pub(super) fn validate_interaction_tuning(
    tuning: InteractionTuning,
) -> ChartResult<InteractionTuning> {
    if !tuning.hover_margin_px.is_finite() || tuning.hover_margin_px < 0.0 {
        return Err(ChartError::InvalidConfig(
            "hover margin must be finite and >= 0".to_owned(),
        ));
    }
    if !tuning.popover_dead_zone_px.is_finite() || tuning.popover_dead_zone_px < 0.0 {
        return Err(ChartError::InvalidConfig(
            "popover dead zone must be finite and >= 0".to_owned(),
        ));
    }
    if tuning.pointer_throttle_ms == 0 {
        return Err(ChartError::InvalidConfig(
            "pointer throttle interval must be > 0 ms".to_owned(),
        ));
    }
    Ok(tuning)
}

fn validate_domain(axis: &str, (start, end): (f64, f64)) -> ChartResult<()> {
    if !start.is_finite() || !end.is_finite() {
        return Err(ChartError::InvalidConfig(format!(
            "{axis} domain must be finite"
        )));
    }
    if start == end {
        return Err(ChartError::InvalidConfig(format!(
            "{axis} domain must have a non-zero span"
        )));
    }
    Ok(())
}
