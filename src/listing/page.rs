//! Page window and pagination envelope types.

use serde::Serialize;

/// Bounded page window for a list query.
///
/// Construction clamps caller input rather than rejecting it: this is the
/// single enforcement point for the page/limit bounds, so upstream layers
/// may pass raw values through unchecked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Page number used when the caller supplies none.
    pub const DEFAULT_PAGE: u32 = 1;

    /// Page size used when the caller supplies none.
    pub const DEFAULT_LIMIT: u32 = 10;

    /// Largest permitted page size; larger requests are silently capped.
    pub const MAX_LIMIT: u32 = 100;

    /// Creates a page window from optional raw values.
    ///
    /// `page` defaults to 1 and is floor-clamped to `>= 1`; `limit`
    /// defaults to 10 and is clamped to `[1, 100]`.
    #[must_use]
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(Self::DEFAULT_PAGE).max(1),
            limit: limit
                .unwrap_or(Self::DEFAULT_LIMIT)
                .clamp(1, Self::MAX_LIMIT),
        }
    }

    /// Returns the 1-based page number.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// Returns the clamped page size.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }

    /// Returns the number of rows to skip before the window starts.
    #[must_use]
    pub fn offset(self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Pagination envelope returned by every list operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    items: Vec<T>,
    total: u64,
    page: u32,
    limit: u32,
    page_count: u64,
}

impl<T> Page<T> {
    /// Wraps one window of items with the envelope metadata.
    ///
    /// `page_count` is `ceil(total / limit)` floored to a minimum of 1, so
    /// an empty result set still reports a single page.
    #[must_use]
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        let page_count = total.div_ceil(u64::from(request.limit())).max(1);
        Self {
            items,
            total,
            page: request.page(),
            limit: request.limit(),
            page_count,
        }
    }

    /// Returns the items in this window.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the envelope, returning the items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Returns the total number of rows matching the filter.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Returns the 1-based page number of this window.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns the page size the window was computed with.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Returns the number of pages the filtered set spans.
    #[must_use]
    pub const fn page_count(&self) -> u64 {
        self.page_count
    }

    /// Maps the items while preserving the envelope metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            page_count: self.page_count,
        }
    }
}
