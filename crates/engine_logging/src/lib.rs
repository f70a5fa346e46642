#![deny(missing_docs)]
//! Shared logging utilities for the declutter workspace.
//!
//! This crate provides the `engine_*` logging macros used across the codebase,
//! the logger initialisation used by binaries, and a minimal test initializer
//! for the global logger.
//!
//! Every line logged through the macros is prefixed with the current poll tick,
//! so a log can be read against the navigation monitor's schedule.

use std::cell::Cell;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

thread_local! {
    /// Thread-local storage for the navigation poll tick count.
    static POLL_TICK: Cell<u64> = const { Cell::new(0) };
}

/// Sets the poll tick count for the current thread.
/// The session runtime calls this once per navigation poll.
pub fn set_poll_tick(tick: u64) {
    POLL_TICK.with(|v| v.set(tick));
}

/// Retrieves the poll tick count for the current thread.
/// Returns 0 before the first poll.
pub fn poll_tick() -> u64 {
    POLL_TICK.with(|v| v.get())
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        log::trace!("[tick {}] {}", $crate::poll_tick(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!("[tick {}] {}", $crate::poll_tick(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!("[tick {}] {}", $crate::poll_tick(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!("[tick {}] {}", $crate::poll_tick(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!("[tick {}] {}", $crate::poll_tick(), format_args!($($arg)*));
    }};
}

/// Where log lines go. Terminal output is written to stderr so it never
/// mixes with a binary's report on stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// Stderr only.
    Terminal,
    /// Truncates and writes the given file.
    File(PathBuf),
    /// The given file and stderr.
    Both(PathBuf),
}

impl LogDestination {
    fn writes_terminal(&self) -> bool {
        matches!(self, Self::Terminal | Self::Both(_))
    }

    fn file(&self) -> Option<&Path> {
        match self {
            Self::Terminal => None,
            Self::File(path) | Self::Both(path) => Some(path.as_path()),
        }
    }
}

/// Default log file name for binaries that write a log file.
pub const LOG_FILE_NAME: &str = "declutter.log";

/// Installs the global logger for `destination` at `level`.
///
/// Fails only if the log file cannot be created. A logger installed earlier
/// is kept.
pub fn initialize(destination: &LogDestination, level: LevelFilter) -> io::Result<()> {
    let config = line_config();
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if let Some(path) = destination.file() {
        loggers.push(WriteLogger::new(level, config.clone(), File::create(path)?));
    }
    if destination.writes_terminal() {
        loggers.push(TermLogger::new(
            level,
            config,
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    let _ = CombinedLogger::init(loggers);
    Ok(())
}

/// Timestamp and message only; the tick prefix already locates a line.
fn line_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_thread_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_location_level(LevelFilter::Off)
        .build()
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
