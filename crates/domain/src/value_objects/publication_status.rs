//! Publication status shared by places and regions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a catalogued entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PublicationStatus {
    /// Created but not yet visible to other users
    #[default]
    Draft,
    /// Visible and open for check-ins
    Published,
    /// Hidden from listings, kept for history
    Archived,
}

impl PublicationStatus {
    /// Whether users can check in to an entity in this status
    #[must_use]
    pub const fn accepts_checkins(&self) -> bool {
        matches!(self, Self::Published)
    }

    /// Storage representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for PublicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PublicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            _ => Err(format!("Invalid publication status: {s}")),
        }
    }
}
