//! Check-in storage port

use async_trait::async_trait;
use domain::entities::Checkin;
use domain::value_objects::{PlaceId, UserId};
#[cfg(test)]
use mockall::automock;

use super::{Page, PageRequest};
use crate::error::ApplicationError;

/// Port for check-in persistence operations
///
/// Listings are ordered newest first.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CheckinRepository: Send + Sync {
    /// Store an accepted check-in
    async fn insert(&self, checkin: &Checkin) -> Result<(), ApplicationError>;

    /// Check-ins at a place
    async fn list_for_place(
        &self,
        place_id: &PlaceId,
        page: PageRequest,
    ) -> Result<Page<Checkin>, ApplicationError>;

    /// Check-ins by a user
    async fn list_for_user(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<Page<Checkin>, ApplicationError>;

    /// Number of check-ins at a place
    async fn count_for_place(&self, place_id: &PlaceId) -> Result<u64, ApplicationError>;
}
