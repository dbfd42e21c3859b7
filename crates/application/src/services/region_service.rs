//! Region service

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use domain::entities::Region;
use domain::value_objects::{Coordinate, DisplayName, PublicationStatus, RegionId};
use domain::{BoundingBox, DomainError, ProximityFilter};
use tracing::{info, instrument};

use super::proximity_search::{ProximitySearch, Ranking};
use crate::{
    error::ApplicationError,
    ports::{
        CandidateRequest, CandidateSource, Page, PageRequest, RegionFilter, RegionQuery,
        RegionRepository, SortOrder,
    },
};

/// Data for a new region
#[derive(Debug, Clone)]
pub struct NewRegion {
    pub name: String,
    pub location: Coordinate,
    pub description: Option<String>,
    pub status: PublicationStatus,
}

/// A region listing request
#[derive(Debug, Clone, Default)]
pub struct RegionSearch {
    pub filter: RegionFilter,
    pub proximity: Option<ProximityFilter>,
    pub sort: SortOrder,
    pub page: PageRequest,
}

/// Service for managing and searching regions
pub struct RegionService<R: RegionRepository> {
    repository: Arc<R>,
    proximity_search: ProximitySearch,
}

impl<R: RegionRepository> fmt::Debug for RegionService<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegionService")
            .field("proximity_search", &self.proximity_search)
            .finish_non_exhaustive()
    }
}

impl<R: RegionRepository> Clone for RegionService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            proximity_search: self.proximity_search.clone(),
        }
    }
}

impl<R: RegionRepository> RegionService<R> {
    #[must_use]
    pub const fn new(repository: Arc<R>, proximity_search: ProximitySearch) -> Self {
        Self {
            repository,
            proximity_search,
        }
    }

    #[instrument(skip(self, new_region), fields(name = %new_region.name))]
    pub async fn create_region(&self, new_region: NewRegion) -> Result<Region, ApplicationError> {
        let mut region = Region::new(DisplayName::new(new_region.name)?, new_region.location)
            .with_status(new_region.status);
        if let Some(description) = new_region.description {
            region = region.with_description(description);
        }

        self.repository.insert(&region).await?;

        info!(id = %region.id, "Region created");
        Ok(region)
    }

    #[instrument(skip(self))]
    pub async fn get_region(&self, id: &RegionId) -> Result<Region, ApplicationError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Region", id.to_string()).into())
    }

    #[instrument(skip(self))]
    pub async fn delete_region(&self, id: &RegionId) -> Result<(), ApplicationError> {
        if self.repository.delete(id).await? {
            info!(%id, "Region deleted");
            Ok(())
        } else {
            Err(DomainError::not_found("Region", id.to_string()).into())
        }
    }

    /// List regions, optionally restricted to those whose center lies
    /// within a radius
    #[instrument(skip(self, search), fields(sort = %search.sort))]
    pub async fn search_regions(
        &self,
        search: RegionSearch,
    ) -> Result<Page<Region>, ApplicationError> {
        let (store_sort, ranking) = if search.sort.is_distance() {
            (SortOrder::NewestFirst, Ranking::Distance)
        } else {
            (search.sort, Ranking::StoreOrder)
        };

        let source = RegionCandidates {
            repository: self.repository.as_ref(),
            filter: &search.filter,
            sort: store_sort,
        };

        self.proximity_search
            .search(&source, search.proximity.as_ref(), ranking, search.page)
            .await
    }
}

struct RegionCandidates<'a, R> {
    repository: &'a R,
    filter: &'a RegionFilter,
    sort: SortOrder,
}

#[async_trait]
impl<R: RegionRepository> CandidateSource<Region> for RegionCandidates<'_, R> {
    async fn fetch(&self, request: &CandidateRequest) -> Result<Page<Region>, ApplicationError> {
        let query = RegionQuery::new(self.filter.clone())
            .with_bounding_box(request.bounding_box)
            .with_sort(self.sort)
            .with_page(request.page);
        self.repository.find(&query).await
    }

    async fn fetch_all(
        &self,
        bounding_box: &BoundingBox,
        batch_size: u32,
    ) -> Result<Vec<Region>, ApplicationError> {
        let query = RegionQuery::new(self.filter.clone())
            .with_bounding_box(Some(*bounding_box))
            .with_sort(self.sort);
        self.repository.find_all(&query, batch_size).await
    }
}
