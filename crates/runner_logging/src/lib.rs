#![deny(missing_docs)]
//! Shared logging utilities for the actor runner workspace.
//!
//! This crate provides the `runner_*` logging macros used across the codebase,
//! the stage label they prefix every record with, and a minimal test
//! initializer for the global logger.

use std::cell::Cell;

#[doc(hidden)]
pub use log as __log;

thread_local! {
    /// Thread-local label of the stage currently executing.
    static STAGE: Cell<&'static str> = const { Cell::new("-") };
}

/// Sets the stage label for the current thread.
/// The binary calls this once per subcommand before doing any work.
pub fn set_stage(stage: &'static str) {
    STAGE.with(|v| v.set(stage));
}

/// Retrieves the stage label for the current thread.
/// Returns `"-"` if no stage has been set.
pub fn current_stage() -> &'static str {
    STAGE.with(|v| v.get())
}

/// Logs a trace-level message tagged with the current stage.
#[macro_export]
macro_rules! runner_trace {
    ($($arg:tt)*) => {{
        $crate::__log::trace!("[{}] {}", $crate::current_stage(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message tagged with the current stage.
#[macro_export]
macro_rules! runner_info {
    ($($arg:tt)*) => {{
        $crate::__log::info!("[{}] {}", $crate::current_stage(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message tagged with the current stage.
#[macro_export]
macro_rules! runner_debug {
    ($($arg:tt)*) => {{
        $crate::__log::debug!("[{}] {}", $crate::current_stage(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message tagged with the current stage.
#[macro_export]
macro_rules! runner_warn {
    ($($arg:tt)*) => {{
        $crate::__log::warn!("[{}] {}", $crate::current_stage(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message tagged with the current stage.
#[macro_export]
macro_rules! runner_error {
    ($($arg:tt)*) => {{
        $crate::__log::error!("[{}] {}", $crate::current_stage(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
