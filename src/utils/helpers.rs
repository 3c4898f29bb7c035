//! Helper functions
//!
//! Timing helpers shared by the CLI and the API server.
//!
//! # Example
//!
//! ```rust
//! use compliance_fort::utils::Helpers;
//!
//! let formatted = Helpers::format_duration(1_234_000_000);
//! assert_eq!(formatted, "1.23s");
//! ```

use std::time::{Duration, Instant};

/// Helper functions
pub struct Helpers;

impl Helpers {
    /// Format duration to human-readable string
    ///
    /// # Arguments
    /// * `nanos` - Duration in nanoseconds
    ///
    /// # Returns
    /// Formatted string (e.g., "1.23s", "500ms", "750µs")
    pub fn format_duration(nanos: u64) -> String {
        let duration = Duration::from_nanos(nanos);

        if duration.as_secs() >= 1 {
            format!("{:.2}s", duration.as_secs_f64())
        } else if duration.as_millis() >= 1 {
            format!("{}ms", duration.as_millis())
        } else if duration.as_micros() >= 1 {
            format!("{}µs", duration.as_micros())
        } else {
            format!("{}ns", nanos)
        }
    }

    /// Format duration from Duration struct
    pub fn format_duration_from(duration: Duration) -> String {
        Self::format_duration(duration.as_nanos() as u64)
    }

    /// Milliseconds since `start`, rounded to three decimals
    pub fn elapsed_ms(start: Instant) -> f64 {
        Self::round_ms(start.elapsed())
    }

    fn round_ms(duration: Duration) -> f64 {
        (duration.as_secs_f64() * 1_000_000.0).round() / 1000.0
    }
}
