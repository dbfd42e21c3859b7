//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Latitude or longitude outside the valid range
    #[error(
        "Invalid coordinates ({latitude}, {longitude}): latitude must be -90 to 90, longitude must be -180 to 180"
    )]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// Search radius outside the permitted range
    #[error("Invalid search radius: {0} km (allowed 0.1 to 50 km)")]
    InvalidRadius(f64),

    /// Check-in distance threshold outside the permitted range
    #[error("Invalid check-in distance: {0} m (allowed 0 to 10000 m)")]
    InvalidCheckinDistance(f64),

    /// The user is not close enough to the place to check in
    #[error(
        "Too far from place: {distance_meters:.0} m away, check-in allowed within {max_distance_meters:.0} m"
    )]
    TooFarFromPlace {
        distance_meters: f64,
        max_distance_meters: f64,
    },

    /// Entity not found
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    /// Whether this error should be shown to the user as "too far from place"
    pub const fn is_too_far(&self) -> bool {
        matches!(self, Self::TooFarFromPlace { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_creates_correct_error() {
        let err = DomainError::not_found("Place", "123");
        match err {
            DomainError::NotFound { entity_type, id } => {
                assert_eq!(entity_type, "Place");
                assert_eq!(id, "123");
            },
            _ => unreachable!("Expected NotFound error"),
        }
    }

    #[test]
    fn not_found_error_message_is_correct() {
        let err = DomainError::not_found("Place", "123");
        assert_eq!(err.to_string(), "Place not found: 123");
    }

    #[test]
    fn invalid_radius_error_message() {
        let err = DomainError::InvalidRadius(75.0);
        assert_eq!(
            err.to_string(),
            "Invalid search radius: 75 km (allowed 0.1 to 50 km)"
        );
    }

    #[test]
    fn too_far_error_message_rounds_distances() {
        let err = DomainError::TooFarFromPlace {
            distance_meters: 612.4,
            max_distance_meters: 500.0,
        };
        assert_eq!(
            err.to_string(),
            "Too far from place: 612 m away, check-in allowed within 500 m"
        );
        assert!(err.is_too_far());
    }

    #[test]
    fn validation_error_is_not_too_far() {
        let err = DomainError::ValidationError("name is required".to_string());
        assert_eq!(err.to_string(), "Validation failed: name is required");
        assert!(!err.is_too_far());
    }
}
