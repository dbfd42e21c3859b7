//! Check-in entity - A user's recorded visit to a place

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::Located;
use crate::value_objects::{CheckinId, Coordinate, Distance, PlaceId, UserId};

/// An accepted check-in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkin {
    /// Unique identifier
    pub id: CheckinId,
    /// User who checked in
    pub user_id: UserId,
    /// Place checked in to
    pub place_id: PlaceId,
    /// Location reported by the user's device
    pub user_location: Coordinate,
    /// Distance to the place measured when the check-in was accepted
    pub distance: Distance,
    /// Optional note left by the user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// When the check-in happened
    pub created_at: DateTime<Utc>,
}

impl Checkin {
    /// Record a check-in
    #[must_use]
    pub fn new(
        user_id: UserId,
        place_id: PlaceId,
        user_location: Coordinate,
        distance: Distance,
    ) -> Self {
        Self {
            id: CheckinId::new(),
            user_id,
            place_id,
            user_location,
            distance,
            comment: None,
            created_at: Utc::now(),
        }
    }

    /// Attach a comment
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

impl Located for Checkin {
    fn location(&self) -> Coordinate {
        self.user_location
    }
}
