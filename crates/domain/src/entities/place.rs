//! Place entity - A point of interest users can check in to

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::Located;
use crate::value_objects::{Coordinate, DisplayName, PlaceId, PublicationStatus, RegionId, UserId};

/// A catalogued place with a registered location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Unique identifier
    pub id: PlaceId,
    /// Region this place belongs to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_id: Option<RegionId>,
    /// Display name
    pub name: DisplayName,
    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-form category (e.g. "cafe", "shrine")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Registered location, used for search and check-in geofencing
    pub location: Coordinate,
    /// Lifecycle status
    pub status: PublicationStatus,
    /// User who registered the place
    pub created_by: UserId,
    /// When this place was created
    pub created_at: DateTime<Utc>,
    /// When this place was last updated
    pub updated_at: DateTime<Utc>,
}

impl Place {
    /// Create a new draft place
    #[must_use]
    pub fn new(name: DisplayName, location: Coordinate, created_by: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: PlaceId::new(),
            region_id: None,
            name,
            description: None,
            category: None,
            location,
            status: PublicationStatus::Draft,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach the place to a region
    #[must_use]
    pub const fn with_region(mut self, region_id: RegionId) -> Self {
        self.region_id = Some(region_id);
        self
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the category
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the status
    #[must_use]
    pub const fn with_status(mut self, status: PublicationStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the creation time (used by fixtures and imports)
    #[must_use]
    pub const fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = created_at;
        self
    }

    /// Move the place to a new location
    pub fn relocate(&mut self, location: Coordinate) {
        self.location = location;
        self.touch();
    }

    /// Change the lifecycle status
    pub fn set_status(&mut self, status: PublicationStatus) {
        self.status = status;
        self.touch();
    }

    /// Whether users can currently check in here
    #[must_use]
    pub const fn accepts_checkins(&self) -> bool {
        self.status.accepts_checkins()
    }

    /// Mark the place as modified now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Located for Place {
    fn location(&self) -> Coordinate {
        self.location
    }
}
