//! Proximity search
//!
//! Combines a coarse store-side bounding-box fetch with an exact in-memory
//! Haversine filter. Pagination is deferred until after the exact filter so
//! that pages are full and `total_count` reflects only results inside the
//! radius:
//!
//! 1. bounding box from the proximity filter
//! 2. all matching candidates, read from the store in one consistent pass
//! 3. exact distance filter
//! 4. optional ranking by distance (otherwise the store's order is kept)
//! 5. page window
//!
//! Without a proximity filter the search is a single pass-through fetch.

use std::fmt;

use domain::{Distance, Located, ProximityFilter};
use tracing::{debug, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{CandidateRequest, CandidateSource, Page, PageRequest},
};

/// Configuration for proximity search
#[derive(Debug, Clone)]
pub struct ProximitySearchConfig {
    /// Rows the store reads per chunk while collecting candidates (default: 500)
    pub candidate_batch_size: u32,
}

impl Default for ProximitySearchConfig {
    fn default() -> Self {
        Self {
            candidate_batch_size: 500,
        }
    }
}

/// How results are ordered after exact filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ranking {
    /// Keep the order the store returned (name, creation date, ...)
    #[default]
    StoreOrder,
    /// Nearest first; ties keep the store's order
    Distance,
}

/// The proximity search orchestrator
#[derive(Clone, Default)]
pub struct ProximitySearch {
    config: ProximitySearchConfig,
}

impl fmt::Debug for ProximitySearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProximitySearch")
            .field("candidate_batch_size", &self.config.candidate_batch_size)
            .finish()
    }
}

impl ProximitySearch {
    /// Create a new proximity search
    #[must_use]
    pub fn new(config: ProximitySearchConfig) -> Self {
        let mut config = config;
        if config.candidate_batch_size == 0 {
            warn!("candidate_batch_size of 0 is not usable, falling back to 1");
            config.candidate_batch_size = 1;
        }
        Self { config }
    }

    /// Run a search against `source`
    ///
    /// Store failures abort the search and are returned unchanged.
    /// `Ranking::Distance` requires a proximity filter.
    #[instrument(skip(self, source), fields(has_proximity = proximity.is_some()))]
    pub async fn search<T>(
        &self,
        source: &dyn CandidateSource<T>,
        proximity: Option<&ProximityFilter>,
        ranking: Ranking,
        page: PageRequest,
    ) -> Result<Page<T>, ApplicationError>
    where
        T: Located + Send,
    {
        let Some(filter) = proximity else {
            if ranking == Ranking::Distance {
                return Err(ApplicationError::InvalidRequest(
                    "Sorting by distance requires a proximity filter".to_string(),
                ));
            }
            return source.fetch(&CandidateRequest::page(page)).await;
        };

        let candidates = source
            .fetch_all(&filter.bounding_box(), self.config.candidate_batch_size)
            .await?;
        let fetched = candidates.len();

        let retained = exact_filter(candidates, filter, ranking);
        let total_count = retained.len() as u64;

        let items: Vec<T> = retained
            .into_iter()
            .skip(page.offset_usize())
            .take(page.limit_usize())
            .map(|(item, _)| item)
            .collect();

        debug!(
            fetched,
            retained = total_count,
            returned = items.len(),
            radius_km = filter.radius.kilometers(),
            "Proximity search complete"
        );

        Ok(Page { items, total_count })
    }
}

/// Keep the candidates within the radius, ordered by `ranking`
fn exact_filter<T: Located>(
    candidates: Vec<T>,
    filter: &ProximityFilter,
    ranking: Ranking,
) -> Vec<(T, Distance)> {
    let mut retained: Vec<(T, Distance)> = candidates
        .into_iter()
        .filter_map(|candidate| filter.measure(&candidate).map(|d| (candidate, d)))
        .collect();

    if ranking == Ranking::Distance {
        // sort_by is stable, so equidistant items keep the store's order
        retained.sort_by(|(_, a), (_, b)| a.meters().total_cmp(&b.meters()));
    }

    retained
}

#[cfg(test)]
mod tests {
    use domain::entities::Place;
    use domain::{Coordinate, SearchRadius};

    use super::*;
    use crate::testing::{FailingCandidateSource, FakeCandidateSource, east_of, north_of, place_at};

    fn center() -> Coordinate {
        Coordinate::new(35.0, 135.0).unwrap()
    }

    fn within(km: f64) -> ProximityFilter {
        ProximityFilter::new(center(), SearchRadius::from_kilometers(km).unwrap())
    }

    fn named(name: &str, location: Coordinate) -> Place {
        place_at(name, location.latitude(), location.longitude())
    }

    fn names(page: &Page<Place>) -> Vec<&str> {
        page.items.iter().map(|p| p.name.as_str()).collect()
    }

    fn search() -> ProximitySearch {
        ProximitySearch::new(ProximitySearchConfig::default())
    }

    /// Points inside the 5 km box but outside the 5 km circle
    fn box_corners() -> Vec<Place> {
        let bbox = within(5.0).bounding_box();
        vec![
            place_at("ne", bbox.max_lat - 1e-4, bbox.max_lng - 1e-4),
            place_at("nw", bbox.max_lat - 1e-4, bbox.min_lng + 1e-4),
            place_at("se", bbox.min_lat + 1e-4, bbox.max_lng - 1e-4),
            place_at("sw", bbox.min_lat + 1e-4, bbox.min_lng + 1e-4),
        ]
    }

    #[tokio::test]
    async fn without_proximity_delegates_unchanged() {
        let rows = vec![
            place_at("a", 35.0, 135.0),
            place_at("b", 10.0, 10.0),
            place_at("c", -40.0, 170.0),
        ];
        let source = FakeCandidateSource::new(rows);

        let page = search()
            .search(&source, None, Ranking::StoreOrder, PageRequest::new(1, 1))
            .await
            .unwrap();

        assert_eq!(names(&page), vec!["b"]);
        assert_eq!(page.total_count, 3);
        let requests = source.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].bounding_box.is_none());
        assert_eq!(requests[0].page, PageRequest::new(1, 1));
    }

    #[tokio::test]
    async fn box_hits_outside_radius_never_leak() {
        let source = FakeCandidateSource::new(box_corners());

        let page = search()
            .search(&source, Some(&within(5.0)), Ranking::StoreOrder, PageRequest::default())
            .await
            .unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 0);
        // The store did admit them
        assert_eq!(source.full_reads().len(), 1);
    }

    #[tokio::test]
    async fn every_result_is_inside_the_radius() {
        let filter = within(5.0);
        let mut rows = box_corners();
        rows.push(named("near", north_of(center(), 1_000.0)));
        rows.push(named("edge", east_of(center(), 4_900.0)));
        rows.push(named("far", north_of(center(), 20_000.0)));
        let source = FakeCandidateSource::new(rows);

        let page = search()
            .search(&source, Some(&filter), Ranking::StoreOrder, PageRequest::default())
            .await
            .unwrap();

        assert_eq!(names(&page), vec!["near", "edge"]);
        for place in &page.items {
            assert!(filter.distance_to(&place.location) <= filter.radius.as_distance());
        }
    }

    #[tokio::test]
    async fn total_count_reflects_post_filter_set() {
        // A full store page of 4 box hits, only 2 of which are in the circle
        let mut rows = box_corners();
        rows.insert(1, named("in-1", north_of(center(), 500.0)));
        rows.insert(3, named("in-2", north_of(center(), 1_500.0)));
        let source = FakeCandidateSource::new(rows);

        let page = search()
            .search(&source, Some(&within(5.0)), Ranking::StoreOrder, PageRequest::new(0, 4))
            .await
            .unwrap();

        assert_eq!(names(&page), vec!["in-1", "in-2"]);
        assert_eq!(page.total_count, 2);
    }

    #[tokio::test]
    async fn pagination_applies_after_filtering() {
        let mut rows = Vec::new();
        for i in 0..10 {
            rows.push(named(&format!("in-{i}"), north_of(center(), 100.0 * f64::from(i))));
            rows.extend(box_corners().into_iter().take(1));
        }
        let source = FakeCandidateSource::new(rows);

        let page = search()
            .search(&source, Some(&within(5.0)), Ranking::StoreOrder, PageRequest::new(3, 3))
            .await
            .unwrap();

        assert_eq!(names(&page), vec!["in-3", "in-4", "in-5"]);
        assert_eq!(page.total_count, 10);
    }

    #[tokio::test]
    async fn candidates_come_from_one_store_read() {
        let rows: Vec<Place> = (0..7)
            .map(|i| named(&format!("p{i}"), north_of(center(), 10.0 * f64::from(i))))
            .collect();
        let source = FakeCandidateSource::new(rows);
        let search = ProximitySearch::new(ProximitySearchConfig {
            candidate_batch_size: 3,
        });
        let filter = within(1.0);

        let page = search
            .search(&source, Some(&filter), Ranking::StoreOrder, PageRequest::new(0, 100))
            .await
            .unwrap();

        assert_eq!(page.total_count, 7);
        assert_eq!(names(&page), vec!["p0", "p1", "p2", "p3", "p4", "p5", "p6"]);
        assert_eq!(source.full_reads(), vec![(filter.bounding_box(), 3)]);
        assert!(source.requests().is_empty());
    }

    #[tokio::test]
    async fn insert_during_search_neither_duplicates_nor_shifts_rows() {
        let rows: Vec<Place> = (1..=4)
            .map(|i| named(&format!("p{i}"), north_of(center(), 100.0 * f64::from(i))))
            .collect();
        let source = FakeCandidateSource::new(rows);
        source.insert_after_read(named("p0", center()));
        let search = ProximitySearch::new(ProximitySearchConfig {
            candidate_batch_size: 2,
        });
        let filter = within(5.0);

        let during = search
            .search(&source, Some(&filter), Ranking::StoreOrder, PageRequest::default())
            .await
            .unwrap();
        let after = search
            .search(&source, Some(&filter), Ranking::StoreOrder, PageRequest::default())
            .await
            .unwrap();

        assert_eq!(names(&during), vec!["p1", "p2", "p3", "p4"]);
        assert_eq!(during.total_count, 4);
        assert_eq!(names(&after), vec!["p0", "p1", "p2", "p3", "p4"]);
        assert_eq!(after.total_count, 5);
    }

    #[tokio::test]
    async fn distance_ranking_sorts_nearest_first() {
        let rows = vec![
            named("3km", north_of(center(), 3_000.0)),
            named("1km", east_of(center(), 1_000.0)),
            named("2km", north_of(center(), 2_000.0)),
        ];
        let source = FakeCandidateSource::new(rows);

        let page = search()
            .search(&source, Some(&within(5.0)), Ranking::Distance, PageRequest::default())
            .await
            .unwrap();

        assert_eq!(names(&page), vec!["1km", "2km", "3km"]);
    }

    #[tokio::test]
    async fn store_order_is_kept_without_distance_ranking() {
        let rows = vec![
            named("zeta", north_of(center(), 100.0)),
            named("alpha", north_of(center(), 3_000.0)),
        ];
        let source = FakeCandidateSource::new(rows);

        let page = search()
            .search(&source, Some(&within(5.0)), Ranking::StoreOrder, PageRequest::default())
            .await
            .unwrap();

        assert_eq!(names(&page), vec!["zeta", "alpha"]);
    }

    #[tokio::test]
    async fn distance_ranking_without_filter_is_rejected() {
        let source = FakeCandidateSource::new(vec![place_at("a", 35.0, 135.0)]);

        let result = search()
            .search(&source, None, Ranking::Distance, PageRequest::default())
            .await;

        assert!(matches!(result, Err(ApplicationError::InvalidRequest(_))));
        assert!(source.requests().is_empty());
    }

    #[tokio::test]
    async fn repository_failure_aborts_search() {
        let source = FailingCandidateSource;

        let result: Result<Page<Place>, _> = search()
            .search(&source, Some(&within(5.0)), Ranking::StoreOrder, PageRequest::default())
            .await;

        assert!(matches!(result, Err(ApplicationError::Repository(_))));
    }

    #[tokio::test]
    async fn repeated_search_is_identical() {
        let mut rows = box_corners();
        for i in 0..5 {
            rows.push(named(&format!("p{i}"), east_of(center(), 700.0 * f64::from(i))));
        }
        let source = FakeCandidateSource::new(rows);
        let filter = within(5.0);

        let first = search()
            .search(&source, Some(&filter), Ranking::Distance, PageRequest::new(1, 3))
            .await
            .unwrap();
        let second = search()
            .search(&source, Some(&filter), Ranking::Distance, PageRequest::new(1, 3))
            .await
            .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn zero_batch_size_falls_back_to_one() {
        let search = ProximitySearch::new(ProximitySearchConfig {
            candidate_batch_size: 0,
        });
        assert_eq!(search.config.candidate_batch_size, 1);
    }
}
