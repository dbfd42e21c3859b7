//! Distance value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-negative distance, stored in meters
///
/// Distances are derived on every query and never rounded; callers round
/// for display.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distance(f64);

impl Distance {
    /// Zero distance
    pub const ZERO: Self = Self(0.0);

    /// Create a distance from meters
    #[must_use]
    pub const fn from_meters(meters: f64) -> Self {
        Self(meters)
    }

    /// Create a distance from kilometers
    #[must_use]
    pub fn from_kilometers(kilometers: f64) -> Self {
        Self(kilometers * 1000.0)
    }

    /// Distance in meters
    #[must_use]
    pub const fn meters(&self) -> f64 {
        self.0
    }

    /// Distance in kilometers
    #[must_use]
    pub fn kilometers(&self) -> f64 {
        self.0 / 1000.0
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 1000.0 {
            write!(f, "{:.0} m", self.0)
        } else {
            write!(f, "{:.2} km", self.kilometers())
        }
    }
}
