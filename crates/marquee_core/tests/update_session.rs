use std::sync::Once;

use marquee_core::{
    update, BrowserState, CatalogPage, Effect, FetchFailure, FetchStatus, Movie, Msg, RequestId,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(marquee_logging::initialize_for_tests);
}

fn movie(id: u64) -> Movie {
    Movie {
        id,
        title: format!("Movie {id}"),
        original_title: format!("Original {id}"),
        overview: String::new(),
        poster_path: None,
        backdrop_path: None,
    }
}

fn page(number: u32, ids: impl IntoIterator<Item = u64>, total_pages: u32) -> CatalogPage {
    let results: Vec<Movie> = ids.into_iter().map(movie).collect();
    CatalogPage {
        page: number,
        total_results: u64::from(total_pages) * 20,
        results,
        total_pages,
    }
}

fn fetched_request(effects: &[Effect]) -> (RequestId, String, u32) {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchPage {
                request_id,
                term,
                page,
            } => Some((*request_id, term.clone(), *page)),
            _ => None,
        })
        .expect("fetch effect")
}

fn mounted_and_loaded() -> BrowserState {
    let (state, effects) = update(BrowserState::new(), Msg::Mounted);
    let (request_id, _, _) = fetched_request(&effects);
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request_id,
            outcome: Ok(page(1, 1..=20, 5)),
        },
    );
    state
}

#[test]
fn mount_loads_first_popular_page() {
    init_logging();
    let (mut state, effects) = update(BrowserState::new(), Msg::Mounted);

    assert_eq!(
        effects,
        vec![Effect::FetchPage {
            request_id: 1,
            term: String::new(),
            page: 1,
        }]
    );
    assert_eq!(state.status(), &FetchStatus::LoadingInitial);
    assert!(state.consume_dirty());

    let (mut state, effects) = update(
        state,
        Msg::PageLoaded {
            request_id: 1,
            outcome: Ok(page(1, 1..=20, 5)),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.status(), &FetchStatus::Idle);
    assert_eq!(state.session().page, 1);
    assert_eq!(state.session().results.len(), 20);
    assert_eq!(state.session().total_pages, 5);
    assert_eq!(state.in_flight_request(), None);
    assert!(state.consume_dirty());
}

#[test]
fn second_mount_is_ignored() {
    init_logging();
    let (state, _) = update(BrowserState::new(), Msg::Mounted);
    let (next, effects) = update(state.clone(), Msg::Mounted);

    assert!(effects.is_empty());
    assert_eq!(next, state);
}

#[test]
fn initial_load_failure_sets_error_and_keeps_results_empty() {
    init_logging();
    let (state, effects) = update(BrowserState::new(), Msg::Mounted);
    let (request_id, _, _) = fetched_request(&effects);

    let (state, effects) = update(
        state,
        Msg::PageLoaded {
            request_id,
            outcome: Err(FetchFailure::Transport("connection refused".to_string())),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(
        state.status(),
        &FetchStatus::Error("Failed to load initial movies. Please try again.".to_string())
    );
    assert!(state.session().results.is_empty());
    assert_eq!(state.session().page, 0);
}

#[test]
fn search_resets_session_before_fetch_resolves() {
    init_logging();
    let state = mounted_and_loaded();
    assert_eq!(state.session().results.len(), 20);

    let (state, effects) = update(state, Msg::SearchSubmitted("batman".to_string()));

    assert_eq!(state.session().term, "batman");
    assert_eq!(state.session().page, 0);
    assert!(state.session().results.is_empty());
    assert_eq!(state.session().total_pages, 0);
    assert_eq!(state.session().total_results, 0);
    assert_eq!(state.status(), &FetchStatus::LoadingInitial);
    assert_eq!(
        effects,
        vec![Effect::FetchPage {
            request_id: 2,
            term: "batman".to_string(),
            page: 1,
        }]
    );
}

#[test]
fn search_cancels_previous_request_before_issuing() {
    init_logging();
    let (state, _) = update(BrowserState::new(), Msg::Mounted);
    let (state, effects) = update(state, Msg::SearchSubmitted("x".to_string()));

    assert_eq!(
        effects,
        vec![
            Effect::CancelRequest { request_id: 1 },
            Effect::FetchPage {
                request_id: 2,
                term: "x".to_string(),
                page: 1,
            },
        ]
    );
    assert_eq!(state.in_flight_request(), Some(2));
}

#[test]
fn superseded_completion_never_mutates_state() {
    init_logging();
    let (state, _) = update(BrowserState::new(), Msg::SearchSubmitted("x".to_string()));
    let (state, _) = update(state, Msg::SearchSubmitted("y".to_string()));

    // "x" resolves late with a page; nothing changes.
    let (state, effects) = update(
        state,
        Msg::PageLoaded {
            request_id: 1,
            outcome: Ok(page(1, [100, 101], 3)),
        },
    );
    assert!(effects.is_empty());
    assert!(state.session().results.is_empty());
    assert_eq!(state.status(), &FetchStatus::LoadingInitial);

    // "x" also reporting failure must not surface an error.
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request_id: 1,
            outcome: Err(FetchFailure::Transport("reset".to_string())),
        },
    );
    assert_eq!(state.status(), &FetchStatus::LoadingInitial);

    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request_id: 2,
            outcome: Ok(page(1, [7, 8, 9], 1)),
        },
    );
    let ids: Vec<_> = state.session().results.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![7, 8, 9]);
    assert_eq!(state.session().term, "y");
    assert_eq!(state.status(), &FetchStatus::Idle);
}

#[test]
fn cancellation_after_newer_request_completed_is_noop() {
    init_logging();
    let (state, _) = update(BrowserState::new(), Msg::SearchSubmitted("a".to_string()));
    let (state, _) = update(state, Msg::SearchSubmitted("b".to_string()));
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request_id: 2,
            outcome: Ok(page(1, [1], 1)),
        },
    );
    let before = state.clone();

    let (state, effects) = update(
        state,
        Msg::PageLoaded {
            request_id: 1,
            outcome: Err(FetchFailure::Cancelled),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state, before);
}

#[test]
fn cancellation_of_current_request_returns_to_idle_silently() {
    init_logging();
    let (state, _) = update(BrowserState::new(), Msg::SearchSubmitted("a".to_string()));
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request_id: 1,
            outcome: Err(FetchFailure::Cancelled),
        },
    );

    assert_eq!(state.status(), &FetchStatus::Idle);
    assert_eq!(state.in_flight_request(), None);
}

#[test]
fn searching_same_term_again_refetches() {
    init_logging();
    let (state, _) = update(BrowserState::new(), Msg::SearchSubmitted("dune".to_string()));
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request_id: 1,
            outcome: Ok(page(1, [1, 2], 1)),
        },
    );

    let (state, effects) = update(state, Msg::SearchSubmitted("dune".to_string()));

    assert_eq!(fetched_request(&effects), (2, "dune".to_string(), 1));
    assert!(state.session().results.is_empty());
}

#[test]
fn unmount_cancels_and_ignores_late_completion() {
    init_logging();
    let (state, _) = update(BrowserState::new(), Msg::Mounted);
    let (state, effects) = update(state, Msg::Unmounted);

    assert_eq!(effects, vec![Effect::CancelRequest { request_id: 1 }]);
    assert_eq!(state.status(), &FetchStatus::Idle);
    assert!(!state.is_mounted());

    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request_id: 1,
            outcome: Ok(page(1, [1], 1)),
        },
    );
    assert!(state.session().results.is_empty());
}
