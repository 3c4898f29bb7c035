//! Logging utilities
//!
//! This module sets up the `log` facade with `env_logger`. The library itself
//! only emits through the `log` macros; binaries and tests call one of the
//! initialisers here once.
//!
//! # Example
//!
//! ```rust
//! use compliance_fort::utils::Logger;
//!
//! // Safe to call more than once
//! Logger::try_init();
//! log::info!("engine started");
//! ```

use env_logger::Env;
use log::LevelFilter;

/// Logging utilities
pub struct Logger;

impl Logger {
    /// Initialize the logger
    ///
    /// Uses `RUST_LOG` when set, `info` otherwise.
    ///
    /// # Panics
    /// If a global logger is already installed; use `try_init` when that is
    /// possible.
    pub fn init() {
        env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    }

    /// Initialize logger with a fixed level, ignoring `RUST_LOG`
    ///
    /// # Arguments
    /// * `level` - Log level filter
    pub fn init_with_level(level: LevelFilter) {
        env_logger::Builder::new().filter_level(level).init();
    }

    /// Initialize the logger unless one is already installed
    ///
    /// # Returns
    /// `true` if this call installed the logger
    pub fn try_init() -> bool {
        env_logger::Builder::from_env(Env::default().default_filter_or("info"))
            .is_test(cfg!(test))
            .try_init()
            .is_ok()
    }

    /// Level for a CLI verbosity count (`-v`, `-vv`, ...)
    pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
