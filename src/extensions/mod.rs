//! Hooks for code that reacts to interaction state without owning it.

mod observers;

pub use observers::{FnObserver, InteractionObserver, observer_fn};
