use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use marquee_logging::{marquee_debug, marquee_trace, marquee_warn};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::{CatalogClient, EngineEvent, RequestId};

type TokenMap = Arc<Mutex<HashMap<RequestId, CancellationToken>>>;

/// Runs catalog requests and timers on the current tokio runtime.
///
/// Every spawned task reports back through the event channel returned by
/// [`EngineHandle::new`]. The handle owns the cancellation token of each
/// in-flight request until it completes or is cancelled.
#[derive(Clone)]
pub struct EngineHandle {
    client: Arc<dyn CatalogClient>,
    tokens: TokenMap,
    event_tx: mpsc::UnboundedSender<EngineEvent>,
}

impl EngineHandle {
    pub fn new(client: Arc<dyn CatalogClient>) -> (Self, mpsc::UnboundedReceiver<EngineEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let handle = Self {
            client,
            tokens: Arc::new(Mutex::new(HashMap::new())),
            event_tx,
        };
        (handle, event_rx)
    }

    /// Starts fetching `page` of `query`. Must be called inside a tokio runtime.
    pub fn fetch(&self, request_id: RequestId, query: String, page: u32) {
        let token = CancellationToken::new();
        lock_tokens(&self.tokens).insert(request_id, token.clone());

        let client = self.client.clone();
        let tokens = self.tokens.clone();
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = client.search_movies(&query, page, &token).await;
            lock_tokens(&tokens).remove(&request_id);
            marquee_trace!(
                "request {} finished ok={} cancelled={}",
                request_id,
                result.is_ok(),
                token.is_cancelled()
            );
            let _ = event_tx.send(EngineEvent::PageFetched { request_id, result });
        });
    }

    /// Signals cancellation without waiting for the request to unwind.
    ///
    /// Returns `false` when the request already finished.
    pub fn cancel(&self, request_id: RequestId) -> bool {
        let token = lock_tokens(&self.tokens).remove(&request_id);
        match token {
            Some(token) => {
                marquee_debug!("cancelling request {}", request_id);
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Emits [`EngineEvent::TimerFired`] after `after` elapses.
    pub fn schedule_timer(&self, timer_id: u64, after: Duration) {
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let _ = event_tx.send(EngineEvent::TimerFired { timer_id });
        });
    }

    /// Number of requests whose tokens are still held.
    pub fn in_flight(&self) -> usize {
        lock_tokens(&self.tokens).len()
    }
}

/// A task that panicked while holding the map leaves it poisoned; the map is
/// still consistent, so keep using it rather than losing cancellations.
fn lock_tokens(tokens: &TokenMap) -> MutexGuard<'_, HashMap<RequestId, CancellationToken>> {
    tokens.lock().unwrap_or_else(|poisoned| {
        marquee_warn!("request token map was poisoned; recovering");
        PoisonError::into_inner(poisoned)
    })
}
