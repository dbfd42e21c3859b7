//! Proximity search and check-in configuration.

use domain::{DomainError, MaxCheckinDistance};
use serde::{Deserialize, Serialize};

/// Proximity search settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Rows fetched per candidate batch during proximity search
    #[serde(default = "default_candidate_batch_size")]
    pub candidate_batch_size: u32,
}

const fn default_candidate_batch_size() -> u32 {
    500
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            candidate_batch_size: default_candidate_batch_size(),
        }
    }
}

/// Check-in geofence settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckinConfig {
    /// Largest accepted distance between user and place, in meters
    #[serde(default = "default_max_distance_meters")]
    pub max_distance_meters: f64,
}

impl CheckinConfig {
    /// The configured threshold as a validated distance
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCheckinDistance` outside 0 to 10 000 m.
    pub fn max_distance(&self) -> Result<MaxCheckinDistance, DomainError> {
        MaxCheckinDistance::from_meters(self.max_distance_meters)
    }
}

const fn default_max_distance_meters() -> f64 {
    MaxCheckinDistance::DEFAULT_METERS
}

impl Default for CheckinConfig {
    fn default() -> Self {
        Self {
            max_distance_meters: default_max_distance_meters(),
        }
    }
}
