//! Candidate fetching port for proximity search
//!
//! A candidate source is a repository already bound to one set of non-geo
//! filters and one sort order. Proximity search asks it for rows, optionally
//! restricted to a bounding box, and does the exact distance work itself.

use async_trait::async_trait;
use domain::BoundingBox;

use super::{Page, PageRequest};
use crate::error::ApplicationError;

/// What a proximity search asks its source for
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateRequest {
    /// Coarse location predicate; `None` means no geographic restriction
    pub bounding_box: Option<BoundingBox>,
    /// Window into the source's ordered results
    pub page: PageRequest,
}

impl CandidateRequest {
    /// Request without a location predicate
    #[must_use]
    pub const fn page(page: PageRequest) -> Self {
        Self {
            bounding_box: None,
            page,
        }
    }

    /// Request restricted to a bounding box
    #[must_use]
    pub const fn within(bounding_box: BoundingBox, page: PageRequest) -> Self {
        Self {
            bounding_box: Some(bounding_box),
            page,
        }
    }
}

/// Store-side fetch of located rows
///
/// Implementations must return rows in a deterministic order and report the
/// number of rows matching the whole predicate (before any exact distance
/// filter) as `total_count`.
#[async_trait]
pub trait CandidateSource<T>: Send + Sync {
    /// Fetch one window of candidates
    async fn fetch(&self, request: &CandidateRequest) -> Result<Page<T>, ApplicationError>;

    /// Fetch every candidate inside `bounding_box`, in store order
    ///
    /// The rows must come from a single read of the store: they may be read
    /// in chunks of `batch_size`, but writes committed while the chunks are
    /// read must not show up in the result. A row therefore appears at most
    /// once.
    async fn fetch_all(
        &self,
        bounding_box: &BoundingBox,
        batch_size: u32,
    ) -> Result<Vec<T>, ApplicationError>;
}
