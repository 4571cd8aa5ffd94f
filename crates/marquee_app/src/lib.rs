//! Marquee app: wires the pure core to the catalog engine.
pub mod config;
mod effects;
mod runtime;

pub use config::{AppConfig, CatalogConfig, ConfigError};
pub use runtime::Browser;
