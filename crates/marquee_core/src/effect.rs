use std::time::Duration;

use crate::RequestId;

/// Side effects requested by [`crate::update`]; executed in order by the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Deliver `Msg::DebounceElapsed { revision }` after `delay`.
    ScheduleDebounce { revision: u64, delay: Duration },
    /// Signal the request's cancellation token. Fire and forget.
    CancelRequest { request_id: RequestId },
    /// Ask the catalog for one page; answered by `Msg::PageLoaded`.
    FetchPage {
        request_id: RequestId,
        term: String,
        page: u32,
    },
}
