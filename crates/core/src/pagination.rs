//! Page arithmetic shared by song listing and lyrics paging.
//!
//! Pages are 1-based. Non-positive inputs fall back to the defaults rather
//! than being rejected, and a page past the last one is an error instead of
//! an empty slice.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Page used when the caller omits `page` or sends a non-positive value.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the caller omits `page_size` or sends a non-positive value.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

// ---------------------------------------------------------------------------
// Normalisation
// ---------------------------------------------------------------------------

/// Coerce a requested page number: anything `<= 0` becomes [`DEFAULT_PAGE`].
pub fn normalize_page(page: i64) -> i64 {
    if page <= 0 {
        DEFAULT_PAGE
    } else {
        page
    }
}

/// Coerce a requested page size: anything `<= 0` becomes [`DEFAULT_PAGE_SIZE`].
pub fn normalize_page_size(page_size: i64) -> i64 {
    if page_size <= 0 {
        DEFAULT_PAGE_SIZE
    } else {
        page_size
    }
}

/// `ceil(total_items / page_size)`. `page_size` must be positive.
///
/// Computed without `total_items + page_size`, which overflows for page
/// sizes near `i64::MAX`.
pub fn total_pages(total_items: i64, page_size: i64) -> i64 {
    debug_assert!(page_size > 0);
    if total_items <= 0 {
        0
    } else {
        (total_items - 1) / page_size + 1
    }
}

// ---------------------------------------------------------------------------
// Page window
// ---------------------------------------------------------------------------

/// The resolved position of one page inside a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub page_size: i64,
    pub total_items: i64,
    pub total_pages: i64,
}

impl PageWindow {
    /// Number of rows to skip before this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }

    /// Maximum number of rows on this page.
    pub fn limit(&self) -> i64 {
        self.page_size
    }

    /// Half-open index range `[start, end)` of this page, clipped to the
    /// total item count. Used when slicing an in-memory sequence.
    pub fn bounds(&self) -> (usize, usize) {
        let start = self.offset();
        let end = start.saturating_add(self.page_size).min(self.total_items);
        (start as usize, end as usize)
    }
}

/// Resolve `page` / `page_size` against `total_items`.
///
/// Defaults are applied first. Fails with [`CoreError::PageNotFound`] when
/// the page lies past the last page, which includes every page of an empty
/// result set (zero items means zero pages).
pub fn paginate(total_items: i64, page: i64, page_size: i64) -> Result<PageWindow, CoreError> {
    let page = normalize_page(page);
    let page_size = normalize_page_size(page_size);
    let total_pages = total_pages(total_items, page_size);

    if page > total_pages {
        return Err(CoreError::PageNotFound { page, total_pages });
    }

    Ok(PageWindow {
        page,
        page_size,
        total_items,
        total_pages,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
