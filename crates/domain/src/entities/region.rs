//! Region entity - A named area grouping places, searchable by its center

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::Located;
use crate::value_objects::{Coordinate, DisplayName, PublicationStatus, RegionId};

/// A catalogued region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Unique identifier
    pub id: RegionId,
    /// Display name
    pub name: DisplayName,
    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Representative center of the region
    pub location: Coordinate,
    /// Lifecycle status
    pub status: PublicationStatus,
    /// When this region was created
    pub created_at: DateTime<Utc>,
    /// When this region was last updated
    pub updated_at: DateTime<Utc>,
}

impl Region {
    /// Create a new draft region
    #[must_use]
    pub fn new(name: DisplayName, location: Coordinate) -> Self {
        let now = Utc::now();
        Self {
            id: RegionId::new(),
            name,
            description: None,
            location,
            status: PublicationStatus::Draft,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the status
    #[must_use]
    pub const fn with_status(mut self, status: PublicationStatus) -> Self {
        self.status = status;
        self
    }
}

impl Located for Region {
    fn location(&self) -> Coordinate {
        self.location
    }
}
