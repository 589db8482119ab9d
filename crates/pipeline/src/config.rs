//! Tunables for building training data.

use serde::{Deserialize, Serialize};

/// Rating at or above which a user's rating counts as a positive example
pub const DEFAULT_THRESHOLD: f64 = 4.0;

/// Decimal digits kept when averaging item ratings
pub const DEFAULT_PRECISION: u32 = 3;

/// Configuration shared by the aggregation, partition and sampling stages.
///
/// ## Usage
/// ```ignore
/// let config = SamplingConfig::default().with_threshold(3.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub threshold: f64,
    pub precision: u32,
}

impl SamplingConfig {
    pub fn new(threshold: f64, precision: u32) -> Self {
        Self {
            threshold,
            precision,
        }
    }

    /// Set the positive-label threshold (builder pattern)
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the number of decimals kept for item averages (builder pattern)
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD, DEFAULT_PRECISION)
    }
}
