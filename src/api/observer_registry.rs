use crate::error::ChartResult;
use crate::extensions::InteractionObserver;
use crate::render::Renderer;

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    /// Registers an observer with unique identifier.
    pub fn register_observer(&mut self, observer: Box<dyn InteractionObserver>) -> ChartResult<()> {
        self.store.register_observer(observer)
    }

    /// Unregisters an observer by id. Returns `true` when removed.
    pub fn unregister_observer(&mut self, observer_id: &str) -> bool {
        self.store.unregister_observer(observer_id)
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.store.observer_count()
    }

    #[must_use]
    pub fn has_observer(&self, observer_id: &str) -> bool {
        self.store.has_observer(observer_id)
    }
}
