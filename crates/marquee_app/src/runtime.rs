use std::sync::Arc;
use std::time::Duration;

use marquee_core::{update, BrowserState, BrowserViewModel, Msg};
use marquee_engine::{CatalogClient, EngineEvent, EngineHandle};
use tokio::sync::mpsc;

use crate::effects::{map_event, EffectRunner};

/// The controller as seen by a presentation layer.
///
/// Owns the state exclusively and applies every message on the caller's task;
/// catalog IO and debounce timers run in spawned tasks that only report back
/// through the engine's event channel. All methods that dispatch must be
/// called from within a tokio runtime.
pub struct Browser {
    state: BrowserState,
    runner: EffectRunner,
    events: mpsc::UnboundedReceiver<EngineEvent>,
}

impl Browser {
    pub fn new(client: Arc<dyn CatalogClient>, quiet: Duration) -> Self {
        let (engine, events) = EngineHandle::new(client);
        Self {
            state: BrowserState::with_quiet_period(quiet),
            runner: EffectRunner::new(engine),
            events,
        }
    }

    pub fn snapshot(&self) -> BrowserViewModel {
        self.state.view()
    }

    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    /// Returns whether the snapshot changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    pub fn mount(&mut self) {
        self.dispatch(Msg::Mounted);
    }

    pub fn unmount(&mut self) {
        self.dispatch(Msg::Unmounted);
    }

    pub fn input_changed(&mut self, text: impl Into<String>) {
        self.dispatch(Msg::InputChanged(text.into()));
    }

    pub fn search(&mut self, term: impl Into<String>) {
        self.dispatch(Msg::SearchSubmitted(term.into()));
    }

    pub fn load_more(&mut self) {
        self.dispatch(Msg::LoadMoreClicked);
    }

    pub fn retry(&mut self) {
        self.dispatch(Msg::RetryClicked);
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);
    }

    /// Waits for the next engine event and applies it.
    ///
    /// Returns `false` once the engine can no longer report anything.
    pub async fn next_event(&mut self) -> bool {
        match self.events.recv().await {
            Some(event) => {
                self.dispatch(map_event(event));
                true
            }
            None => false,
        }
    }

    /// Applies events until no authoritative request is outstanding.
    pub async fn settle(&mut self) {
        while self.state.in_flight_request().is_some() {
            if !self.next_event().await {
                break;
            }
        }
    }

    /// Requests whose cancellation tokens are still held by the engine.
    pub fn requests_in_flight(&self) -> usize {
        self.runner.in_flight()
    }
}
