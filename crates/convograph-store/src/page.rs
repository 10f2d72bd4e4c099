//! Pagination types for fetch-all-of-type reads

use serde::{Deserialize, Serialize};

/// A pagination window requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub offset: usize,
    pub limit: usize,
}

impl PageRequest {
    #[inline]
    #[must_use]
    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }

    /// First page with the default window size
    #[inline]
    #[must_use]
    pub fn first() -> Self {
        Self::new(0, Self::DEFAULT_LIMIT)
    }

    pub const DEFAULT_LIMIT: usize = 50;
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// One window of a fetch-all-of-type read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total matching entities in the store, not just this window
    pub total: usize,
    pub offset: usize,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, total: usize, offset: usize) -> Self {
        Self {
            items,
            total,
            offset,
        }
    }

    /// True if a further window would return more items
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.offset + self.items.len() < self.total
    }
}
