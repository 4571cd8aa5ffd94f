#![deny(missing_docs)]
//! Shared logging utilities for the marquee workspace.
//!
//! This crate provides the `marquee_*` logging macros used across the codebase,
//! the application logger setup and a minimal test initializer for the global
//! logger.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::Deserialize;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Log file used when a destination does not name one.
pub const DEFAULT_LOG_FILE: &str = "./marquee.log";

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! marquee_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! marquee_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! marquee_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! marquee_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! marquee_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Destination for log output.
///
/// Deserializes from RON as `File("./marquee.log")`, `Terminal` or
/// `Both("./marquee.log")`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum LogDestination {
    /// Log file only, truncated on startup.
    File(PathBuf),
    /// Terminal only (stderr for warnings and errors).
    Terminal,
    /// Terminal plus the given file.
    Both(PathBuf),
}

impl Default for LogDestination {
    fn default() -> Self {
        LogDestination::File(PathBuf::from(DEFAULT_LOG_FILE))
    }
}

impl LogDestination {
    /// File this destination writes to, if any.
    pub fn file(&self) -> Option<&Path> {
        match self {
            LogDestination::File(path) | LogDestination::Both(path) => Some(path.as_path()),
            LogDestination::Terminal => None,
        }
    }

    fn writes_terminal(&self) -> bool {
        !matches!(self, LogDestination::File(_))
    }
}

/// Initializes the global logger with the specified destination.
///
/// The terminal shares its output with the presentation adapter, so the
/// application defaults to a file. Returns `false` when a logger was already
/// installed or no sink could be created.
pub fn initialize(destination: &LogDestination, level: LevelFilter) -> bool {
    let config = build_config();
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::with_capacity(2);

    if destination.writes_terminal() {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if let Some(path) = destination.file() {
        match create_file_logger(level, config, path) {
            Ok(file_logger) => loggers.push(file_logger),
            // Terminal output still works for `Both`.
            Err(err) => eprintln!("marquee: log file {} unavailable: {err}", path.display()),
        }
    }
    if loggers.is_empty() {
        return false;
    }

    CombinedLogger::init(loggers).is_ok()
}

/// Initializes a terminal logger for test binaries.
///
/// Debug level in debug builds, info otherwise. A second call, or a call after
/// another test installed a logger, leaves the existing logger in place.
pub fn initialize_for_tests() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    level: LevelFilter,
    config: Config,
    path: &Path,
) -> io::Result<Box<WriteLogger<File>>> {
    let file = File::create(path)?;
    Ok(WriteLogger::new(level, config, file))
}
