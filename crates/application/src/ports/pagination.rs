//! Offset pagination shared by every listing port

use serde::{Deserialize, Serialize};

/// An `offset`/`limit` window over an ordered result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Number of items to skip
    pub offset: u32,
    /// Maximum number of items to return
    pub limit: u32,
}

impl PageRequest {
    /// Default page size for client requests
    pub const DEFAULT_LIMIT: u32 = 20;
    /// Largest page size a client may request
    pub const MAX_LIMIT: u32 = 100;

    /// A client-facing page; `limit` is clamped into `[1, MAX_LIMIT]`
    #[must_use]
    pub fn new(offset: u32, limit: u32) -> Self {
        Self {
            offset,
            limit: limit.clamp(1, Self::MAX_LIMIT),
        }
    }

    /// An internal batch window, not subject to the client limit
    #[must_use]
    pub const fn batch(offset: u32, size: u32) -> Self {
        Self {
            offset,
            limit: size,
        }
    }

    /// First page of the given size
    #[must_use]
    pub fn first(limit: u32) -> Self {
        Self::new(0, limit)
    }

    /// Offset as a `usize` for slicing in-memory results
    #[must_use]
    pub const fn offset_usize(&self) -> usize {
        self.offset as usize
    }

    /// Limit as a `usize` for slicing in-memory results
    #[must_use]
    pub const fn limit_usize(&self) -> usize {
        self.limit as usize
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

/// One page of results plus the size of the whole matching set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items in this page, in result order
    pub items: Vec<T>,
    /// Number of matches across all pages
    pub total_count: u64,
}

impl<T> Page<T> {
    /// A page with no items and no matches
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }

    /// Transform every item, keeping the count
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
        }
    }
}
