//! chart-interaction: headless interaction model for line, bar and threshold charts.
//!
//! The crate maps series data into pixel space, resolves pointer and keyboard
//! input into a single highlight state, and decides where and when the detail
//! popover is shown. Drawing is left to a `render::Renderer` backend.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{ChartError, ChartResult};
