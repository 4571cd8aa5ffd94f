//! Marquee engine: catalog IO and effect execution.
mod catalog;
mod engine;
mod types;

pub use catalog::{CatalogClient, CatalogSettings, ReqwestCatalogClient};
pub use engine::EngineHandle;
pub use tokio_util::sync::CancellationToken;
pub use types::{CatalogPage, EngineEvent, FailureKind, FetchError, MovieRecord, RequestId};
