use crate::{FetchStatus, MovieId, QuerySession};

/// Title shown above the result grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionHeader {
    #[default]
    Popular,
    SearchResults,
}

impl SectionHeader {
    pub fn label(self) -> &'static str {
        match self {
            SectionHeader::Popular => "Popular Movies",
            SectionHeader::SearchResults => "Search Results",
        }
    }
}

/// Featured movie on the popular listing: the first result, when it has a backdrop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroBanner {
    pub movie_id: MovieId,
    pub title: String,
    pub overview: String,
    pub backdrop_path: String,
}

/// Read-only snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BrowserViewModel {
    pub session: QuerySession,
    pub status: FetchStatus,
    pub header: SectionHeader,
    pub hero: Option<HeroBanner>,
    pub can_load_more: bool,
    pub show_spinner: bool,
    pub error: Option<String>,
    pub dirty: bool,
}

impl BrowserViewModel {
    pub(crate) fn from_state(session: QuerySession, status: FetchStatus, dirty: bool) -> Self {
        let header = if session.term.is_empty() {
            SectionHeader::Popular
        } else {
            SectionHeader::SearchResults
        };
        let hero = if header == SectionHeader::Popular {
            hero_banner(&session)
        } else {
            None
        };
        let can_load_more = session.has_more() && status == FetchStatus::Idle;

        Self {
            header,
            hero,
            can_load_more,
            show_spinner: status.is_loading(),
            error: status.error_message().map(ToOwned::to_owned),
            session,
            status,
            dirty,
        }
    }
}

fn hero_banner(session: &QuerySession) -> Option<HeroBanner> {
    let first = session.results.first()?;
    let backdrop_path = first.backdrop_path.clone()?;
    Some(HeroBanner {
        movie_id: first.id,
        title: first.original_title.clone(),
        overview: first.overview.clone(),
        backdrop_path,
    })
}
