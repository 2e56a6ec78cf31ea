use crate::interaction::InteractionSnapshot;

/// Receives every committed interaction state change.
///
/// Observers are called synchronously from the store, so they should not
/// block. They see state only; mutation goes through the engine.
pub trait InteractionObserver {
    fn id(&self) -> &str;
    fn on_state_changed(&mut self, snapshot: &InteractionSnapshot);
}

/// Observer backed by a closure.
pub struct FnObserver<F> {
    id: String,
    callback: F,
}

impl<F> InteractionObserver for FnObserver<F>
where
    F: FnMut(&InteractionSnapshot),
{
    fn id(&self) -> &str {
        &self.id
    }

    fn on_state_changed(&mut self, snapshot: &InteractionSnapshot) {
        (self.callback)(snapshot);
    }
}

/// Wraps a closure into a boxed observer.
#[must_use]
pub fn observer_fn<F>(id: impl Into<String>, callback: F) -> Box<dyn InteractionObserver>
where
    F: FnMut(&InteractionSnapshot) + 'static,
{
    Box::new(FnObserver {
        id: id.into(),
        callback,
    })
}
