//! Search radius value object

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::Distance;

/// Radius of a proximity search in kilometers, bounded to [0.1, 50]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SearchRadius(f64);

impl SearchRadius {
    /// Smallest accepted radius
    pub const MIN_KM: f64 = 0.1;
    /// Largest accepted radius
    pub const MAX_KM: f64 = 50.0;

    /// Create a validated radius
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRadius` outside [0.1, 50] km
    pub fn from_kilometers(kilometers: f64) -> Result<Self, DomainError> {
        if !(Self::MIN_KM..=Self::MAX_KM).contains(&kilometers) {
            return Err(DomainError::InvalidRadius(kilometers));
        }
        Ok(Self(kilometers))
    }

    /// Radius in kilometers
    #[must_use]
    pub const fn kilometers(&self) -> f64 {
        self.0
    }

    /// Radius as a distance
    #[must_use]
    pub fn as_distance(&self) -> Distance {
        Distance::from_kilometers(self.0)
    }
}

impl TryFrom<f64> for SearchRadius {
    type Error = DomainError;

    fn try_from(kilometers: f64) -> Result<Self, Self::Error> {
        Self::from_kilometers(kilometers)
    }
}

impl From<SearchRadius> for f64 {
    fn from(radius: SearchRadius) -> Self {
        radius.0
    }
}
