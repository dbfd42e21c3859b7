//! Region storage port

use async_trait::async_trait;
use domain::entities::Region;
use domain::value_objects::{PublicationStatus, RegionId};
#[cfg(test)]
use mockall::automock;

use super::{Page, RepositoryQuery};
use crate::error::ApplicationError;

/// Non-geo filters for listing regions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionFilter {
    /// Filter by status
    pub status: Option<PublicationStatus>,
    /// Case-insensitive substring match on name or description
    pub keyword: Option<String>,
}

impl RegionFilter {
    /// Set status filter
    #[must_use]
    pub const fn with_status(mut self, status: PublicationStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set keyword filter
    #[must_use]
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }
}

/// Listing query for regions
pub type RegionQuery = RepositoryQuery<RegionFilter>;

/// Port for region persistence operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RegionRepository: Send + Sync {
    /// Store a new region
    async fn insert(&self, region: &Region) -> Result<(), ApplicationError>;

    /// Get a region by ID
    async fn get(&self, id: &RegionId) -> Result<Option<Region>, ApplicationError>;

    /// Delete a region; places in it are detached, not deleted
    async fn delete(&self, id: &RegionId) -> Result<bool, ApplicationError>;

    /// List regions matching the query
    async fn find(&self, query: &RegionQuery) -> Result<Page<Region>, ApplicationError>;

    /// Every region matching the query's filter and bounding box, in its sort order
    ///
    /// The query's page is ignored. Rows are read in chunks of `batch_size`
    /// within one read transaction, so concurrent writes never duplicate or
    /// drop rows between chunks.
    async fn find_all(
        &self,
        query: &RegionQuery,
        batch_size: u32,
    ) -> Result<Vec<Region>, ApplicationError>;
}
