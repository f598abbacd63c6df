//! Validation configuration.

use chrono::Duration;

/// Default freshness tolerance (minutes).
pub const DEFAULT_FRESHNESS_TOLERANCE_MINS: u32 = 5;

/// Tolerance for checks where little drift is expected (minutes).
pub const STRICT_FRESHNESS_TOLERANCE_MINS: u32 = 1;

/// Configuration parameters for itinerary validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    /// How far before the request time the fastest itinerary may start
    /// (minutes). Covers clock drift between this machine and the API.
    pub freshness_tolerance_mins: u32,
}

impl ValidationConfig {
    /// Create a configuration with the given tolerance.
    pub fn new(freshness_tolerance_mins: u32) -> Self {
        Self {
            freshness_tolerance_mins,
        }
    }

    /// Configuration with a one-minute tolerance.
    pub fn strict() -> Self {
        Self::new(STRICT_FRESHNESS_TOLERANCE_MINS)
    }

    /// Returns the freshness tolerance as a Duration.
    pub fn freshness_tolerance(&self) -> Duration {
        Duration::minutes(i64::from(self.freshness_tolerance_mins))
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FRESHNESS_TOLERANCE_MINS)
    }
}
