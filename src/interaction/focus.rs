use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What caused the chart to receive focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusTrigger {
    Keyboard,
    Pointer,
}

/// Tracks the most recent input modality for hosts that only learn about
/// focus after the fact.
///
/// A pointer press within `window` before the focus event classifies the
/// focus as pointer-initiated; anything else counts as keyboard focus.
#[derive(Debug, Clone, Copy)]
pub struct InputModality {
    window: Duration,
    last_pointer_down: Option<Duration>,
}

impl Default for InputModality {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

impl InputModality {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_pointer_down: None,
        }
    }

    pub fn on_pointer_down(&mut self, now: Duration) {
        self.last_pointer_down = Some(now);
    }

    pub fn on_key_down(&mut self) {
        self.last_pointer_down = None;
    }

    #[must_use]
    pub fn focus_trigger(&self, now: Duration) -> FocusTrigger {
        match self.last_pointer_down {
            Some(at) if now.saturating_sub(at) <= self.window => FocusTrigger::Pointer,
            _ => FocusTrigger::Keyboard,
        }
    }
}
