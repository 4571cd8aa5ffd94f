use marquee_core::{CatalogPage, Effect, FetchFailure, Movie, Msg};
use marquee_engine::{EngineEvent, EngineHandle, FetchError, MovieRecord};
use marquee_logging::{marquee_debug, marquee_info, marquee_warn};

pub(crate) struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub(crate) fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub(crate) fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ScheduleDebounce { revision, delay } => {
                    self.engine.schedule_timer(revision, delay);
                }
                Effect::CancelRequest { request_id } => {
                    if !self.engine.cancel(request_id) {
                        marquee_debug!("request {} already finished", request_id);
                    }
                }
                Effect::FetchPage {
                    request_id,
                    term,
                    page,
                } => {
                    marquee_info!(
                        "FetchPage request_id={} page={} term={:?}",
                        request_id,
                        page,
                        term
                    );
                    self.engine.fetch(request_id, term, page);
                }
            }
        }
    }

    pub(crate) fn in_flight(&self) -> usize {
        self.engine.in_flight()
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::TimerFired { timer_id } => Msg::DebounceElapsed { revision: timer_id },
        EngineEvent::PageFetched { request_id, result } => Msg::PageLoaded {
            request_id,
            outcome: result.map(map_page).map_err(|err| map_failure(request_id, err)),
        },
    }
}

fn map_failure(request_id: u64, err: FetchError) -> FetchFailure {
    if err.is_cancelled() {
        marquee_debug!("request {} cancelled", request_id);
        FetchFailure::Cancelled
    } else {
        marquee_warn!("request {} failed: {}", request_id, err);
        FetchFailure::Transport(err.to_string())
    }
}

fn map_page(page: marquee_engine::CatalogPage) -> CatalogPage {
    CatalogPage {
        page: page.page,
        results: page.results.into_iter().map(map_movie).collect(),
        total_pages: page.total_pages,
        total_results: page.total_results,
    }
}

fn map_movie(record: MovieRecord) -> Movie {
    Movie {
        id: record.id,
        title: record.title,
        original_title: record.original_title,
        overview: record.overview,
        poster_path: record.poster_path,
        backdrop_path: record.backdrop_path,
    }
}
