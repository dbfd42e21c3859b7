//! Place service
//!
//! Place lifecycle and place listings, including proximity search over the
//! place catalogue.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use domain::entities::Place;
use domain::value_objects::{Coordinate, DisplayName, PlaceId, PublicationStatus, RegionId, UserId};
use domain::{BoundingBox, DomainError, ProximityFilter};
use tracing::{debug, info, instrument};

use super::proximity_search::{ProximitySearch, Ranking};
use crate::{
    error::ApplicationError,
    ports::{
        CandidateRequest, CandidateSource, Page, PageRequest, PlaceFilter, PlaceQuery,
        PlaceRepository, SortOrder,
    },
};

/// Data for a new place
#[derive(Debug, Clone)]
pub struct NewPlace {
    pub name: String,
    pub location: Coordinate,
    pub created_by: UserId,
    pub region_id: Option<RegionId>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: PublicationStatus,
}

impl NewPlace {
    /// A draft place with only the required fields set
    #[must_use]
    pub fn new(name: impl Into<String>, location: Coordinate, created_by: UserId) -> Self {
        Self {
            name: name.into(),
            location,
            created_by,
            region_id: None,
            description: None,
            category: None,
            status: PublicationStatus::Draft,
        }
    }
}

/// Partial update of a place; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct PlaceUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<Coordinate>,
    pub status: Option<PublicationStatus>,
}

/// A place listing request
#[derive(Debug, Clone, Default)]
pub struct PlaceSearch {
    pub filter: PlaceFilter,
    pub proximity: Option<ProximityFilter>,
    pub sort: SortOrder,
    pub page: PageRequest,
}

/// Service for managing and searching places
pub struct PlaceService<R: PlaceRepository> {
    repository: Arc<R>,
    proximity_search: ProximitySearch,
}

impl<R: PlaceRepository> fmt::Debug for PlaceService<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaceService")
            .field("proximity_search", &self.proximity_search)
            .finish_non_exhaustive()
    }
}

impl<R: PlaceRepository> Clone for PlaceService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            proximity_search: self.proximity_search.clone(),
        }
    }
}

impl<R: PlaceRepository> PlaceService<R> {
    /// Create a new place service
    #[must_use]
    pub const fn new(repository: Arc<R>, proximity_search: ProximitySearch) -> Self {
        Self {
            repository,
            proximity_search,
        }
    }

    /// Create and store a place
    #[instrument(skip(self, new_place), fields(name = %new_place.name))]
    pub async fn create_place(&self, new_place: NewPlace) -> Result<Place, ApplicationError> {
        let name = DisplayName::new(new_place.name)?;
        let mut place = Place::new(name, new_place.location, new_place.created_by)
            .with_status(new_place.status);

        if let Some(region_id) = new_place.region_id {
            place = place.with_region(region_id);
        }
        if let Some(description) = new_place.description {
            place = place.with_description(description);
        }
        if let Some(category) = new_place.category {
            place = place.with_category(category);
        }

        self.repository.insert(&place).await?;

        info!(id = %place.id, location = %place.location, "Place created");
        Ok(place)
    }

    /// Get a place by ID
    #[instrument(skip(self))]
    pub async fn get_place(&self, id: &PlaceId) -> Result<Place, ApplicationError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Place", id.to_string()).into())
    }

    /// Apply a partial update to a place
    #[instrument(skip(self, update))]
    pub async fn update_place(
        &self,
        id: &PlaceId,
        update: PlaceUpdate,
    ) -> Result<Place, ApplicationError> {
        let mut place = self.get_place(id).await?;

        if let Some(name) = update.name {
            place.name = DisplayName::new(name)?;
        }
        if let Some(description) = update.description {
            place.description = Some(description);
        }
        if let Some(category) = update.category {
            place.category = Some(category);
        }
        if let Some(location) = update.location {
            place.relocate(location);
        }
        if let Some(status) = update.status {
            place.set_status(status);
        }
        place.touch();

        if !self.repository.update(&place).await? {
            return Err(DomainError::not_found("Place", id.to_string()).into());
        }

        debug!(id = %place.id, status = %place.status, "Place updated");
        Ok(place)
    }

    /// Delete a place
    #[instrument(skip(self))]
    pub async fn delete_place(&self, id: &PlaceId) -> Result<(), ApplicationError> {
        if self.repository.delete(id).await? {
            info!(%id, "Place deleted");
            Ok(())
        } else {
            Err(DomainError::not_found("Place", id.to_string()).into())
        }
    }

    /// List places, optionally restricted to a radius around a point
    #[instrument(skip(self, search), fields(sort = %search.sort))]
    pub async fn search_places(&self, search: PlaceSearch) -> Result<Page<Place>, ApplicationError> {
        let (store_sort, ranking) = if search.sort.is_distance() {
            (SortOrder::NewestFirst, Ranking::Distance)
        } else {
            (search.sort, Ranking::StoreOrder)
        };

        let source = PlaceCandidates {
            repository: self.repository.as_ref(),
            filter: &search.filter,
            sort: store_sort,
        };

        self.proximity_search
            .search(&source, search.proximity.as_ref(), ranking, search.page)
            .await
    }
}

/// A place repository bound to one filter and sort order
struct PlaceCandidates<'a, R> {
    repository: &'a R,
    filter: &'a PlaceFilter,
    sort: SortOrder,
}

#[async_trait]
impl<R: PlaceRepository> CandidateSource<Place> for PlaceCandidates<'_, R> {
    async fn fetch(&self, request: &CandidateRequest) -> Result<Page<Place>, ApplicationError> {
        let query = PlaceQuery::new(self.filter.clone())
            .with_bounding_box(request.bounding_box)
            .with_sort(self.sort)
            .with_page(request.page);
        self.repository.find(&query).await
    }

    async fn fetch_all(
        &self,
        bounding_box: &BoundingBox,
        batch_size: u32,
    ) -> Result<Vec<Place>, ApplicationError> {
        let query = PlaceQuery::new(self.filter.clone())
            .with_bounding_box(Some(*bounding_box))
            .with_sort(self.sort);
        self.repository.find_all(&query, batch_size).await
    }
}
