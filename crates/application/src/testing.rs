//! Test fixtures shared by the service tests

#![allow(clippy::unwrap_used)]

use std::sync::Mutex;

use async_trait::async_trait;
use domain::entities::Place;
use domain::value_objects::{Coordinate, DisplayName, PublicationStatus, UserId};
use domain::{BoundingBox, Located};

use crate::error::ApplicationError;
use crate::ports::{CandidateRequest, CandidateSource, Page};

/// In-memory candidate source that behaves like a store
///
/// Applies the bounding box as a predicate over its rows (kept in store
/// order), then the page window, and reports the pre-window count.
/// Every request is recorded. Rows queued with [`insert_after_read`]
/// are written to the front of the store right after the next read,
/// like a concurrent insert under newest-first ordering.
///
/// [`insert_after_read`]: FakeCandidateSource::insert_after_read
#[derive(Debug)]
pub struct FakeCandidateSource<T> {
    rows: Mutex<Vec<T>>,
    pending: Mutex<Vec<T>>,
    requests: Mutex<Vec<CandidateRequest>>,
    full_reads: Mutex<Vec<(BoundingBox, u32)>>,
}

impl<T: Located + Clone> FakeCandidateSource<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            rows: Mutex::new(rows),
            pending: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
            full_reads: Mutex::new(Vec::new()),
        }
    }

    /// Window requests received through `fetch`
    pub fn requests(&self) -> Vec<CandidateRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// `(bounding_box, batch_size)` of every `fetch_all` call
    pub fn full_reads(&self) -> Vec<(BoundingBox, u32)> {
        self.full_reads.lock().unwrap().clone()
    }

    pub fn insert_after_read(&self, row: T) {
        self.pending.lock().unwrap().push(row);
    }

    fn matching(&self, bounding_box: Option<&BoundingBox>) -> Vec<T> {
        let rows = self.rows.lock().unwrap();
        let matching = rows
            .iter()
            .filter(|row| bounding_box.is_none_or(|bbox| bbox.contains(&row.location())))
            .cloned()
            .collect();

        drop(rows);
        self.apply_pending();
        matching
    }

    fn apply_pending(&self) {
        let pending = std::mem::take(&mut *self.pending.lock().unwrap());
        let mut rows = self.rows.lock().unwrap();
        for row in pending {
            rows.insert(0, row);
        }
    }
}

#[async_trait]
impl<T: Located + Clone + Send + Sync> CandidateSource<T> for FakeCandidateSource<T> {
    async fn fetch(&self, request: &CandidateRequest) -> Result<Page<T>, ApplicationError> {
        self.requests.lock().unwrap().push(*request);

        let matching = self.matching(request.bounding_box.as_ref());
        Ok(Page {
            total_count: matching.len() as u64,
            items: matching
                .into_iter()
                .skip(request.page.offset_usize())
                .take(request.page.limit_usize())
                .collect(),
        })
    }

    async fn fetch_all(
        &self,
        bounding_box: &BoundingBox,
        batch_size: u32,
    ) -> Result<Vec<T>, ApplicationError> {
        self.full_reads.lock().unwrap().push((*bounding_box, batch_size));
        Ok(self.matching(Some(bounding_box)))
    }
}

/// Candidate source whose store is unreachable
#[derive(Debug, Default)]
pub struct FailingCandidateSource;

#[async_trait]
impl<T: Send + 'static> CandidateSource<T> for FailingCandidateSource {
    async fn fetch(&self, _request: &CandidateRequest) -> Result<Page<T>, ApplicationError> {
        Err(ApplicationError::Repository("database is locked".to_string()))
    }

    async fn fetch_all(
        &self,
        _bounding_box: &BoundingBox,
        _batch_size: u32,
    ) -> Result<Vec<T>, ApplicationError> {
        Err(ApplicationError::Repository("database is locked".to_string()))
    }
}

/// A published place called `name` at `(lat, lng)`
pub fn place_at(name: &str, lat: f64, lng: f64) -> Place {
    Place::new(
        DisplayName::new(name).unwrap(),
        Coordinate::new(lat, lng).unwrap(),
        UserId::new(),
    )
    .with_status(PublicationStatus::Published)
}

/// A coordinate `meters` due north of `origin`
pub fn north_of(origin: Coordinate, meters: f64) -> Coordinate {
    let delta = (meters / domain::geo::EARTH_RADIUS_METERS).to_degrees();
    Coordinate::new_unchecked(origin.latitude() + delta, origin.longitude())
}

/// A coordinate `meters` due east of `origin` along its parallel
pub fn east_of(origin: Coordinate, meters: f64) -> Coordinate {
    let delta = (meters / (domain::geo::EARTH_RADIUS_METERS * origin.latitude().to_radians().cos()))
        .to_degrees();
    Coordinate::new_unchecked(origin.latitude(), origin.longitude() + delta)
}
