use crate::{BrowserState, Effect, FailureContext, FetchStatus, Msg};

/// Pure update function: applies a message to state and returns any effects.
///
/// Effects are ordered; a `CancelRequest` always precedes the `FetchPage`
/// that supersedes it.
pub fn update(mut state: BrowserState, msg: Msg) -> (BrowserState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted => {
            if state.is_mounted() {
                return (state, Vec::new());
            }
            state.set_mounted(true);
            state.start_session(String::new(), FailureContext::InitialLoad)
        }
        Msg::Unmounted => {
            state.set_mounted(false);
            state.input_mut().discard();
            let effects: Vec<Effect> = state.cancel_in_flight().into_iter().collect();
            if state.status().is_loading() {
                state.reset_status();
            }
            effects
        }
        Msg::InputChanged(text) => {
            let revision = state.input_mut().record(text);
            let delay = state.input_mut().quiet();
            vec![Effect::ScheduleDebounce { revision, delay }]
        }
        Msg::DebounceElapsed { revision } => match state.input_mut().take_if_current(revision) {
            Some(term) => state.start_session(term, FailureContext::Search),
            None => Vec::new(),
        },
        Msg::SearchSubmitted(term) => state.start_session(term, FailureContext::Search),
        Msg::LoadMoreClicked => {
            let session = state.session();
            // Nothing loaded yet, nothing left, or a request already owns the slot.
            if state.status().is_loading() || session.page == 0 || !session.has_more() {
                return (state, Vec::new());
            }
            state.request_next_page()
        }
        Msg::RetryClicked => {
            if !matches!(state.status(), FetchStatus::Error(_))
                || state.failed_request().is_none()
            {
                return (state, Vec::new());
            }
            state.reissue_failed()
        }
        Msg::PageLoaded {
            request_id,
            outcome,
        } => {
            state.apply_outcome(request_id, outcome);
            Vec::new()
        }
    };

    (state, effects)
}
