//! Check-in service
//!
//! Accepts a check-in only when the user's reported location is within the
//! configured distance of the place.

use std::{fmt, sync::Arc};

use domain::entities::Checkin;
use domain::value_objects::{Coordinate, MaxCheckinDistance, PlaceId, UserId};
use domain::{CheckinLocationValidator, DomainError};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{CheckinRepository, Page, PageRequest, PlaceRepository},
};

/// Configuration for the check-in service
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckinServiceConfig {
    /// Largest accepted user-to-place distance (default: 500 m)
    pub max_distance: MaxCheckinDistance,
}

/// Service for recording and listing check-ins
pub struct CheckinService<P: PlaceRepository, C: CheckinRepository> {
    places: Arc<P>,
    checkins: Arc<C>,
    config: CheckinServiceConfig,
}

impl<P: PlaceRepository, C: CheckinRepository> fmt::Debug for CheckinService<P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckinService")
            .field("max_distance_meters", &self.config.max_distance.meters())
            .finish_non_exhaustive()
    }
}

impl<P: PlaceRepository, C: CheckinRepository> Clone for CheckinService<P, C> {
    fn clone(&self) -> Self {
        Self {
            places: Arc::clone(&self.places),
            checkins: Arc::clone(&self.checkins),
            config: self.config,
        }
    }
}

impl<P: PlaceRepository, C: CheckinRepository> CheckinService<P, C> {
    /// Create a new check-in service
    #[must_use]
    pub const fn new(places: Arc<P>, checkins: Arc<C>, config: CheckinServiceConfig) -> Self {
        Self {
            places,
            checkins,
            config,
        }
    }

    /// Record a check-in at a published place
    ///
    /// # Errors
    ///
    /// - `DomainError::NotFound` if the place does not exist
    /// - `ApplicationError::InvalidRequest` if the place is not published
    /// - `DomainError::TooFarFromPlace` if the user is beyond the configured
    ///   distance
    #[instrument(skip(self, comment))]
    pub async fn check_in(
        &self,
        user_id: UserId,
        place_id: PlaceId,
        user_location: Coordinate,
        comment: Option<String>,
    ) -> Result<Checkin, ApplicationError> {
        let place = self
            .places
            .get(&place_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Place", place_id.to_string()))?;

        if !place.accepts_checkins() {
            return Err(ApplicationError::InvalidRequest(format!(
                "Place {place_id} is {} and does not accept check-ins",
                place.status
            )));
        }

        let distance =
            CheckinLocationValidator::check(&user_location, &place.location, self.config.max_distance)
                .inspect_err(|e| warn!(%place_id, error = %e, "Check-in rejected"))?;

        let mut checkin = Checkin::new(user_id, place_id, user_location, distance);
        if let Some(comment) = comment {
            checkin = checkin.with_comment(comment);
        }

        self.checkins.insert(&checkin).await?;

        info!(id = %checkin.id, %place_id, distance = %distance, "Check-in recorded");
        Ok(checkin)
    }

    /// Check-ins at a place, newest first
    #[instrument(skip(self))]
    pub async fn list_for_place(
        &self,
        place_id: &PlaceId,
        page: PageRequest,
    ) -> Result<Page<Checkin>, ApplicationError> {
        let result = self.checkins.list_for_place(place_id, page).await?;
        debug!(total = result.total_count, "Listed check-ins for place");
        Ok(result)
    }

    /// A user's check-ins, newest first
    #[instrument(skip(self))]
    pub async fn list_for_user(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<Page<Checkin>, ApplicationError> {
        self.checkins.list_for_user(user_id, page).await
    }

    /// Number of check-ins recorded at a place
    #[instrument(skip(self))]
    pub async fn count_for_place(&self, place_id: &PlaceId) -> Result<u64, ApplicationError> {
        self.checkins.count_for_place(place_id).await
    }
}

#[cfg(test)]
mod tests {
    use domain::entities::Place;
    use domain::value_objects::PublicationStatus;

    use super::*;
    use crate::ports::{MockCheckinRepository, MockPlaceRepository};
    use crate::testing::{north_of, place_at};

    fn kyoto_place() -> Place {
        place_at("Nishiki Market", 35.0116, 135.7681)
    }

    fn service(
        places: MockPlaceRepository,
        checkins: MockCheckinRepository,
    ) -> CheckinService<MockPlaceRepository, MockCheckinRepository> {
        CheckinService::new(
            Arc::new(places),
            Arc::new(checkins),
            CheckinServiceConfig::default(),
        )
    }

    fn places_returning(place: Option<Place>) -> MockPlaceRepository {
        let mut mock = MockPlaceRepository::new();
        mock.expect_get().returning(move |_| Ok(place.clone()));
        mock
    }

    #[tokio::test]
    async fn check_in_within_range_is_recorded() {
        let place = kyoto_place();
        let place_id = place.id;
        let mut checkins = MockCheckinRepository::new();
        checkins
            .expect_insert()
            .withf(move |c| c.place_id == place_id && c.comment.as_deref() == Some("busy"))
            .times(1)
            .returning(|_| Ok(()));

        let user_location = north_of(place.location, 499.99);
        let checkin = service(places_returning(Some(place)), checkins)
            .check_in(UserId::new(), place_id, user_location, Some("busy".to_string()))
            .await
            .unwrap();

        assert!((checkin.distance.meters() - 499.99).abs() < 0.01);
        assert_eq!(checkin.user_location, user_location);
    }

    #[tokio::test]
    async fn check_in_too_far_is_rejected() {
        let place = kyoto_place();
        let place_id = place.id;
        let mut checkins = MockCheckinRepository::new();
        checkins.expect_insert().never();

        let result = service(places_returning(Some(place.clone())), checkins)
            .check_in(UserId::new(), place_id, north_of(place.location, 500.01), None)
            .await;

        let err = result.unwrap_err();
        assert!(err.is_too_far_from_place());
    }

    #[tokio::test]
    async fn check_in_at_missing_place_is_not_found() {
        let mut checkins = MockCheckinRepository::new();
        checkins.expect_insert().never();

        let result = service(places_returning(None), checkins)
            .check_in(UserId::new(), PlaceId::new(), Coordinate::kyoto(), None)
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::NotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn check_in_at_draft_place_is_invalid() {
        let place = kyoto_place().with_status(PublicationStatus::Draft);
        let place_id = place.id;
        let location = place.location;
        let mut checkins = MockCheckinRepository::new();
        checkins.expect_insert().never();

        let result = service(places_returning(Some(place)), checkins)
            .check_in(UserId::new(), place_id, location, None)
            .await;

        assert!(matches!(result, Err(ApplicationError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn custom_distance_threshold_is_applied() {
        let place = kyoto_place();
        let place_id = place.id;
        let location = north_of(place.location, 800.0);
        let mut checkins = MockCheckinRepository::new();
        checkins.expect_insert().times(1).returning(|_| Ok(()));

        let service = CheckinService::new(
            Arc::new(places_returning(Some(place))),
            Arc::new(checkins),
            CheckinServiceConfig {
                max_distance: MaxCheckinDistance::from_meters(1_000.0).unwrap(),
            },
        );

        assert!(service.check_in(UserId::new(), place_id, location, None).await.is_ok());
    }

    #[tokio::test]
    async fn list_for_place_delegates() {
        let mut checkins = MockCheckinRepository::new();
        checkins
            .expect_list_for_place()
            .withf(|_, page| page.limit == 5)
            .returning(|_, _| Ok(Page::empty()));

        let page = service(MockPlaceRepository::new(), checkins)
            .list_for_place(&PlaceId::new(), PageRequest::first(5))
            .await
            .unwrap();

        assert_eq!(page.total_count, 0);
    }
}
