use api::{ViewCell, ViewState};
use dioxus::prelude::*;

/// A Dioxus signal as the state holder of a [`api::Lifecycle`].
///
/// Reads go through `peek` so async handlers don't subscribe the component;
/// components read the signal itself when rendering.
pub struct SignalCell<M: 'static>(pub Signal<ViewState<M>>);

impl<M: 'static> Clone for SignalCell<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: 'static> Copy for SignalCell<M> {}

impl<M: Clone + 'static> ViewCell for SignalCell<M> {
    type Model = M;

    fn snapshot(&self) -> ViewState<M> {
        self.0.peek().clone()
    }

    fn update<R>(&self, f: impl FnOnce(&mut ViewState<M>) -> R) -> R {
        let mut signal = self.0;
        let mut state = signal.write();
        f(&mut state)
    }
}
