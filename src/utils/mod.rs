//! Utilities module
//!
//! This module provides utility functions for common operations:
//! - Timing helpers
//! - Logging setup
//!
//! # Example
//!
//! ```rust
//! use compliance_fort::utils::{Helpers, Logger};
//!
//! Logger::try_init();
//! let formatted = Helpers::format_duration(1_000);
//! ```

pub mod helpers;
pub mod logger;

// Re-export main types for convenience
pub use helpers::Helpers;
pub use logger::Logger;
