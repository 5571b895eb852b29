//! Page/limit handling for list endpoints.

use serde::Serialize;

/// Page used when the query value is missing or unusable.
pub const DEFAULT_PAGE: u32 = 1;

/// Limit used when the query value is missing or unusable.
pub const DEFAULT_LIMIT: u32 = 30;

/// Largest accepted limit.
pub const MAX_LIMIT: u32 = 100;

/// A normalized page request. Always `page >= 1` and `1 <= limit <= 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Normalizes raw query values. Unparsable input falls back to the
    /// defaults instead of failing the request.
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = page
            .and_then(|p| p.trim().parse::<i64>().ok())
            .filter(|p| *p > 0)
            .and_then(|p| u32::try_from(p).ok())
            .unwrap_or(DEFAULT_PAGE);

        let limit = limit
            .and_then(|l| l.trim().parse::<i64>().ok())
            .filter(|l| *l > 0 && *l <= i64::from(MAX_LIMIT))
            .and_then(|l| u32::try_from(l).ok())
            .unwrap_or(DEFAULT_LIMIT);

        Self { page, limit }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Rows to skip before this page.
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// One page of results plus the total count across all pages.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_items: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_items: i64) -> Self {
        Self { items, total_items }
    }

    /// `ceil(total_items / limit)`.
    pub fn total_pages(&self, request: &PageRequest) -> i64 {
        let limit = i64::from(request.limit());
        (self.total_items.max(0) + limit - 1) / limit
    }
}
