//! Pagination resolution
//!
//! Turns optional limit/size/page/offset arguments into a concrete window, and
//! derives the page metadata list views render from a total row count.

use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: i64 = 10;
pub const DEFAULT_PAGE: i64 = 1;

/// Caller-supplied pagination arguments, all optional
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationArgs {
    pub limit: Option<i64>,
    /// Alias for `limit`; wins when both are given
    pub size: Option<i64>,
    pub page: Option<i64>,
    /// Explicit offset; wins over the page-derived one
    pub offset: Option<i64>,
}

/// Resolved pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub limit: i64,
    pub page: i64,
    pub offset: i64,
}

/// How a caller treats `page < 1` before resolving.
///
/// The resolver itself never clamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageClampPolicy {
    /// Pass the page through untouched
    #[default]
    None,
    /// Raise any page below 1 to 1
    FloorAtOne,
}

impl PaginationArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_size(mut self, size: i64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Apply a caller-side page clamp policy
    pub fn with_clamp(mut self, policy: PageClampPolicy) -> Self {
        if policy == PageClampPolicy::FloorAtOne {
            self.page = self.page.map(|page| page.max(1));
        }
        self
    }

    /// Resolve to a concrete (limit, page, offset).
    ///
    /// `size` overrides `limit`, and an explicit `offset` overrides
    /// `(page - 1) * limit`. Zero or negative pages are not clamped.
    pub fn resolve(&self) -> Pagination {
        let mut limit = DEFAULT_LIMIT;
        if let Some(l) = self.limit {
            limit = l;
        }
        if let Some(size) = self.size {
            limit = size;
        }

        let page = self.page.unwrap_or(DEFAULT_PAGE);

        let mut offset = page.saturating_sub(1).saturating_mul(limit);
        if let Some(o) = self.offset {
            offset = o;
        }

        Pagination {
            limit,
            page,
            offset,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        PaginationArgs::default().resolve()
    }
}

impl Pagination {
    pub fn to_sql(&self) -> String {
        format!("LIMIT {} OFFSET {}", self.limit, self.offset)
    }
}

/// Page metadata for list views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub total_items: i64,
    pub total_pages: i64,
    pub page: i64,
    pub limit: i64,
    pub has_prev: bool,
    pub prev_page: i64,
    pub has_next: bool,
    pub next_page: i64,
    pub start_page: i64,
    pub end_page: i64,
    pub show_start_ellipsis: bool,
    pub show_end_ellipsis: bool,
}

impl PageInfo {
    /// Build page metadata with `window` page links on each side of the current page
    pub fn new(total_items: i64, pagination: &Pagination, window: i64) -> Self {
        let limit = pagination.limit;
        let page = pagination.page;

        // Ceiling division that cannot overflow for any limit
        let total_pages = if limit > 0 {
            let total = total_items.max(0);
            total / limit + i64::from(total % limit != 0)
        } else {
            0
        };

        let start_page = page.saturating_sub(window).max(1);
        let end_page = page.saturating_add(window).min(total_pages);

        Self {
            total_items,
            total_pages,
            page,
            limit,
            has_prev: page > 1,
            prev_page: page.saturating_sub(1),
            has_next: page < total_pages,
            next_page: page.saturating_add(1),
            start_page,
            end_page,
            show_start_ellipsis: start_page > 2,
            show_end_ellipsis: end_page < total_pages.saturating_sub(1),
        }
    }

    /// Page numbers to render as links
    pub fn window_pages(&self) -> Vec<i64> {
        (self.start_page..=self.end_page).collect()
    }
}
