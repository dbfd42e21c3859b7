//! Maximum check-in distance value object

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::Distance;

/// How far from a place a user may be when checking in
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct MaxCheckinDistance(f64);

impl MaxCheckinDistance {
    /// Default threshold in meters
    pub const DEFAULT_METERS: f64 = 500.0;
    /// Hard cap in meters
    pub const MAX_METERS: f64 = 10_000.0;

    /// Create a validated threshold
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCheckinDistance` outside [0, 10000] m
    pub fn from_meters(meters: f64) -> Result<Self, DomainError> {
        if !(0.0..=Self::MAX_METERS).contains(&meters) {
            return Err(DomainError::InvalidCheckinDistance(meters));
        }
        Ok(Self(meters))
    }

    /// Threshold in meters
    #[must_use]
    pub const fn meters(&self) -> f64 {
        self.0
    }

    /// Threshold as a distance
    #[must_use]
    pub const fn as_distance(&self) -> Distance {
        Distance::from_meters(self.0)
    }
}

impl Default for MaxCheckinDistance {
    fn default() -> Self {
        Self(Self::DEFAULT_METERS)
    }
}

impl TryFrom<f64> for MaxCheckinDistance {
    type Error = DomainError;

    fn try_from(meters: f64) -> Result<Self, Self::Error> {
        Self::from_meters(meters)
    }
}

impl From<MaxCheckinDistance> for f64 {
    fn from(max: MaxCheckinDistance) -> Self {
        max.0
    }
}
