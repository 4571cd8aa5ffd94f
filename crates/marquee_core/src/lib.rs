//! Marquee core: pure search/pagination state machine and view-model helpers.
mod debounce;
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use debounce::{InputDebounce, DEFAULT_QUIET_PERIOD};
pub use effect::Effect;
pub use msg::{FetchFailure, Msg};
pub use state::{
    BrowserState, CatalogPage, FailureContext, FetchStatus, Movie, MovieId, QuerySession,
    RequestId,
};
pub use update::update;
pub use view_model::{BrowserViewModel, HeroBanner, SectionHeader};
