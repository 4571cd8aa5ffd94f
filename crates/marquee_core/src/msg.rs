use crate::{CatalogPage, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The browser became visible; loads the popular listing once.
    Mounted,
    /// The browser went away; in-flight work is abandoned.
    Unmounted,
    /// User edited the search box (raw, not yet debounced).
    InputChanged(String),
    /// Quiet-period timer for the given input revision fired.
    DebounceElapsed { revision: u64 },
    /// Start a new session for a term immediately.
    SearchSubmitted(String),
    /// User asked for the next page.
    LoadMoreClicked,
    /// User asked to repeat the failed request.
    RetryClicked,
    /// Catalog outcome for a previously issued request.
    PageLoaded {
        request_id: RequestId,
        outcome: Result<CatalogPage, FetchFailure>,
    },
}

/// How a catalog request ended when it did not produce a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// The request was superseded or torn down. Never shown to the user.
    Cancelled,
    /// Network, status or decoding failure. The detail is for logs only.
    Transport(String),
}
