//! Query types shared by the place and region repositories

use domain::BoundingBox;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::PageRequest;

/// Result ordering for place and region listings
///
/// Parsed from the `sort` request parameter. `Distance` ranks by exact
/// distance from a proximity filter's center; repositories receive it but
/// order by creation time, and the ranking is applied after exact filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Alphabetical by name
    NameAsc,
    /// Reverse alphabetical by name
    NameDesc,
    /// Most recently created first
    #[default]
    NewestFirst,
    /// Oldest first
    OldestFirst,
    /// Nearest to the search center first
    Distance,
}

impl SortOrder {
    /// Request parameter representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NameAsc => "name",
            Self::NameDesc => "-name",
            Self::NewestFirst => "-created_at",
            Self::OldestFirst => "created_at",
            Self::Distance => "distance",
        }
    }

    /// Whether this ordering is computed from distances rather than columns
    #[must_use]
    pub const fn is_distance(&self) -> bool {
        matches!(self, Self::Distance)
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "name" => Ok(Self::NameAsc),
            "-name" => Ok(Self::NameDesc),
            "-created_at" | "newest" => Ok(Self::NewestFirst),
            "created_at" | "oldest" => Ok(Self::OldestFirst),
            "distance" => Ok(Self::Distance),
            other => Err(format!("Unknown sort order: {other}")),
        }
    }
}

/// A repository listing query
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RepositoryQuery<F> {
    /// Non-geo filters
    pub filter: F,
    /// Coarse location predicate on the latitude/longitude columns
    pub bounding_box: Option<BoundingBox>,
    /// Ordering
    pub sort: SortOrder,
    /// Window into the ordered result
    pub page: PageRequest,
}

impl<F> RepositoryQuery<F> {
    /// Query with the given filter, default sort and first page
    #[must_use]
    pub fn new(filter: F) -> Self {
        Self {
            filter,
            bounding_box: None,
            sort: SortOrder::default(),
            page: PageRequest::default(),
        }
    }

    /// Set the bounding box
    #[must_use]
    pub const fn with_bounding_box(mut self, bounding_box: Option<BoundingBox>) -> Self {
        self.bounding_box = bounding_box;
        self
    }

    /// Set the sort order
    #[must_use]
    pub const fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Set the page
    #[must_use]
    pub const fn with_page(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }
}
