//! Place storage port
//!
//! Defines the interface for persisting and listing places.
//! Adapters in the infrastructure layer implement this port using SQLite.

use async_trait::async_trait;
use domain::entities::Place;
use domain::value_objects::{PlaceId, PublicationStatus, RegionId};
#[cfg(test)]
use mockall::automock;

use super::{Page, RepositoryQuery};
use crate::error::ApplicationError;

/// Non-geo filters for listing places
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceFilter {
    /// Filter by status
    pub status: Option<PublicationStatus>,
    /// Filter by exact category
    pub category: Option<String>,
    /// Filter by region
    pub region_id: Option<RegionId>,
    /// Case-insensitive substring match on name or description
    pub keyword: Option<String>,
}

impl PlaceFilter {
    /// Only published places
    #[must_use]
    pub fn published() -> Self {
        Self {
            status: Some(PublicationStatus::Published),
            ..Default::default()
        }
    }

    /// Set status filter
    #[must_use]
    pub const fn with_status(mut self, status: PublicationStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set category filter
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set region filter
    #[must_use]
    pub const fn with_region(mut self, region_id: RegionId) -> Self {
        self.region_id = Some(region_id);
        self
    }

    /// Set keyword filter
    #[must_use]
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }
}

/// Listing query for places
pub type PlaceQuery = RepositoryQuery<PlaceFilter>;

/// Port for place persistence operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PlaceRepository: Send + Sync {
    /// Store a new place
    async fn insert(&self, place: &Place) -> Result<(), ApplicationError>;

    /// Get a place by ID
    async fn get(&self, id: &PlaceId) -> Result<Option<Place>, ApplicationError>;

    /// Overwrite an existing place
    ///
    /// Returns `false` if no place with this ID exists.
    async fn update(&self, place: &Place) -> Result<bool, ApplicationError>;

    /// Delete a place
    ///
    /// Returns `false` if no place with this ID exists.
    async fn delete(&self, id: &PlaceId) -> Result<bool, ApplicationError>;

    /// List places matching the query
    ///
    /// `total_count` counts every row matching the filter and bounding box,
    /// ignoring the page.
    async fn find(&self, query: &PlaceQuery) -> Result<Page<Place>, ApplicationError>;

    /// Every place matching the query's filter and bounding box, in its sort order
    ///
    /// The query's page is ignored. Rows are read in chunks of `batch_size`
    /// within one read transaction, so concurrent writes never duplicate or
    /// drop rows between chunks.
    async fn find_all(
        &self,
        query: &PlaceQuery,
        batch_size: u32,
    ) -> Result<Vec<Place>, ApplicationError>;
}
