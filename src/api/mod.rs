mod behavior;
mod data_controller;
mod engine;
mod engine_accessors;
mod engine_config;
mod interaction_controller;
mod json_contract;
mod observer_registry;
mod overlay_frame_builder;
mod popover_controller;
mod validation;

pub use behavior::{InteractionTuning, PopoverSize};
pub use engine::ChartEngine;
pub use engine_config::ChartEngineConfig;
pub use interaction_controller::{PointerOut, PointerSample, PointerTarget};
pub use json_contract::{INTERACTION_SNAPSHOT_JSON_SCHEMA_V1, InteractionSnapshotJsonContractV1};
pub use popover_controller::TickOutcome;
