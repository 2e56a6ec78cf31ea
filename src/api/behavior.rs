use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Pointer and popover tolerances used by interaction handlers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionTuning {
    /// A point is hovered only when both axis distances are strictly below this.
    #[serde(default = "default_hover_margin_px")]
    pub hover_margin_px: f64,
    /// Margin added around the popover box before testing pointer containment.
    #[serde(default = "default_popover_dead_zone_px")]
    pub popover_dead_zone_px: f64,
    /// Minimum spacing between applied pointer moves.
    #[serde(default = "default_pointer_throttle_ms")]
    pub pointer_throttle_ms: u64,
}

impl Default for InteractionTuning {
    fn default() -> Self {
        Self {
            hover_margin_px: default_hover_margin_px(),
            popover_dead_zone_px: default_popover_dead_zone_px(),
            pointer_throttle_ms: default_pointer_throttle_ms(),
        }
    }
}

impl InteractionTuning {
    #[must_use]
    pub fn pointer_throttle(self) -> Duration {
        Duration::from_millis(self.pointer_throttle_ms)
    }
}

/// Popover box size used for placement when the renderer has not reported one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopoverSize {
    pub width_px: f64,
    pub height_px: f64,
}

impl Default for PopoverSize {
    fn default() -> Self {
        Self {
            width_px: 240.0,
            height_px: 120.0,
        }
    }
}

fn default_hover_margin_px() -> f64 {
    6.0
}

fn default_popover_dead_zone_px() -> f64 {
    12.0
}

fn default_pointer_throttle_ms() -> u64 {
    25
}
