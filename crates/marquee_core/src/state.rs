use std::time::Duration;

use crate::view_model::BrowserViewModel;
use crate::{Effect, FetchFailure, InputDebounce};

pub type MovieId = u64;
pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub original_title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

/// One page as reported by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogPage {
    pub page: u32,
    pub results: Vec<Movie>,
    pub total_pages: u32,
    pub total_results: u64,
}

/// Accumulated results for one search term.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuerySession {
    pub term: String,
    /// Last successfully fetched page; 0 until the first page lands.
    pub page: u32,
    pub results: Vec<Movie>,
    pub total_pages: u32,
    pub total_results: u64,
}

impl QuerySession {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Self::default()
        }
    }

    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    fn merge(&mut self, requested_page: u32, page: CatalogPage) {
        if requested_page > 1 {
            self.results.extend(page.results);
        } else {
            self.results = page.results;
        }
        self.page = requested_page;
        self.total_pages = page.total_pages;
        self.total_results = page.total_results;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    LoadingInitial,
    LoadingMore,
    Error(String),
}

impl FetchStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchStatus::LoadingInitial | FetchStatus::LoadingMore)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            FetchStatus::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Where a request came from; only decides the user-facing failure text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureContext {
    InitialLoad,
    Search,
}

impl FailureContext {
    pub fn message(self) -> &'static str {
        match self {
            FailureContext::InitialLoad => "Failed to load initial movies. Please try again.",
            FailureContext::Search => "Failed to fetch movies. Please try again.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PageRequest {
    pub(crate) term: String,
    pub(crate) page: u32,
    pub(crate) context: FailureContext,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct InFlight {
    id: RequestId,
    request: PageRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BrowserState {
    session: QuerySession,
    status: FetchStatus,
    in_flight: Option<InFlight>,
    failed: Option<PageRequest>,
    last_request_id: RequestId,
    input: InputDebounce,
    mounted: bool,
    dirty: bool,
}

impl BrowserState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quiet_period(quiet: Duration) -> Self {
        Self {
            input: InputDebounce::new(quiet),
            ..Self::default()
        }
    }

    pub fn view(&self) -> BrowserViewModel {
        BrowserViewModel::from_state(self.session.clone(), self.status.clone(), self.dirty)
    }

    pub fn session(&self) -> &QuerySession {
        &self.session
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Id of the single request whose completion may still change state.
    pub fn in_flight_request(&self) -> Option<RequestId> {
        self.in_flight.as_ref().map(|in_flight| in_flight.id)
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn input_mut(&mut self) -> &mut InputDebounce {
        &mut self.input
    }

    pub(crate) fn set_mounted(&mut self, mounted: bool) {
        self.mounted = mounted;
    }

    pub(crate) fn failed_request(&self) -> Option<&PageRequest> {
        self.failed.as_ref()
    }

    /// Resets the session to `term` and requests its first page.
    pub(crate) fn start_session(&mut self, term: String, context: FailureContext) -> Vec<Effect> {
        self.session = QuerySession::new(term.clone());
        self.issue(
            PageRequest {
                term,
                page: 1,
                context,
            },
            FetchStatus::LoadingInitial,
        )
    }

    /// Requests the page after the current cursor for the current term.
    pub(crate) fn request_next_page(&mut self) -> Vec<Effect> {
        let request = PageRequest {
            term: self.session.term.clone(),
            page: self.session.page + 1,
            context: FailureContext::Search,
        };
        self.issue(request, FetchStatus::LoadingMore)
    }

    /// Reissues the failed request under a fresh id.
    pub(crate) fn reissue_failed(&mut self) -> Vec<Effect> {
        let Some(request) = self.failed.clone() else {
            return Vec::new();
        };
        let status = if request.page > 1 {
            FetchStatus::LoadingMore
        } else {
            FetchStatus::LoadingInitial
        };
        self.issue(request, status)
    }

    /// Abandons the authoritative request, if any.
    pub(crate) fn cancel_in_flight(&mut self) -> Option<Effect> {
        self.in_flight
            .take()
            .map(|in_flight| Effect::CancelRequest {
                request_id: in_flight.id,
            })
    }

    pub(crate) fn reset_status(&mut self) {
        self.status = FetchStatus::Idle;
        self.mark_dirty();
    }

    fn issue(&mut self, request: PageRequest, status: FetchStatus) -> Vec<Effect> {
        let mut effects = Vec::with_capacity(2);
        effects.extend(self.cancel_in_flight());

        self.last_request_id += 1;
        let request_id = self.last_request_id;
        effects.push(Effect::FetchPage {
            request_id,
            term: request.term.clone(),
            page: request.page,
        });

        self.in_flight = Some(InFlight {
            id: request_id,
            request,
        });
        self.failed = None;
        self.status = status;
        self.mark_dirty();
        effects
    }

    /// Applies a completion. Returns `false` when it was stale and ignored.
    pub(crate) fn apply_outcome(
        &mut self,
        request_id: RequestId,
        outcome: Result<CatalogPage, FetchFailure>,
    ) -> bool {
        if self.in_flight_request() != Some(request_id) {
            return false;
        }
        let Some(InFlight { request, .. }) = self.in_flight.take() else {
            return false;
        };

        match outcome {
            Ok(page) => {
                self.session.merge(request.page, page);
                self.status = FetchStatus::Idle;
            }
            Err(FetchFailure::Cancelled) => {
                self.status = FetchStatus::Idle;
            }
            Err(FetchFailure::Transport(_)) => {
                self.status = FetchStatus::Error(request.context.message().to_string());
                self.failed = Some(request);
            }
        }
        self.mark_dirty();
        true
    }
}
