//! Page requests and paged results shared by every list view.

use serde::Serialize;

/// Rows per page on the staff table views.
pub const STAFF_PAGE_SIZE: u32 = 10;

/// Cards per page on the event grids (3x3).
pub const EVENT_GRID_PAGE_SIZE: u32 = 9;

/// Milestones per page on a participant's milestone view.
pub const MILESTONE_PAGE_SIZE: u32 = 12;

/// A request for one page of results. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Creates a request, clamping the page to at least 1.
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Builds a request from a raw `page` query value.
    ///
    /// Missing, unparsable, zero or negative values fall back to page 1.
    pub fn from_query(raw: Option<&str>, per_page: u32) -> Self {
        let page = raw
            .and_then(|s| s.trim().parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .map(|p| p.min(u32::MAX as i64) as u32)
            .unwrap_or(1);
        Self::new(page, per_page)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Rows to skip.
    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.per_page as u64
    }

    /// Rows to fetch.
    pub fn limit(&self) -> u64 {
        self.per_page as u64
    }
}

/// One page of results plus the totals needed to render page links.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: u32,
    pub per_page: u32,
    pub total_records: u64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Assembles a page from fetched rows and the total row count.
    pub fn new(items: Vec<T>, request: PageRequest, total_records: u64) -> Self {
        Self {
            items,
            current_page: request.page(),
            per_page: request.per_page(),
            total_records,
            total_pages: total_pages(total_records, request.per_page()),
        }
    }

    /// An empty first page, used when a listing fails to load.
    pub fn empty(per_page: u32) -> Self {
        Self::new(Vec::new(), PageRequest::new(1, per_page), 0)
    }

    /// Transforms the rows while keeping the totals.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            per_page: self.per_page,
            total_records: self.total_records,
            total_pages: self.total_pages,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// `ceil(total / per_page)`, never less than 1 so a page bar always renders.
pub fn total_pages(total_records: u64, per_page: u32) -> u32 {
    let per_page = per_page.max(1) as u64;
    let pages = total_records.div_ceil(per_page);
    pages.clamp(1, u32::MAX as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn from_query_falls_back_to_first_page() {
        assert_eq!(PageRequest::from_query(None, 10).page(), 1);
        assert_eq!(PageRequest::from_query(Some("abc"), 10).page(), 1);
        assert_eq!(PageRequest::from_query(Some("0"), 10).page(), 1);
        assert_eq!(PageRequest::from_query(Some("-3"), 10).page(), 1);
        assert_eq!(PageRequest::from_query(Some("4"), 10).page(), 4);
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(PageRequest::new(1, 10).offset(), 0);
        assert_eq!(PageRequest::new(3, 10).offset(), 20);
        assert_eq!(PageRequest::new(2, 9).offset(), 9);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 12), 3);
    }

    #[test]
    fn page_navigation_flags() {
        let page: Page<u8> = Page::new(vec![1, 2], PageRequest::new(2, 2), 5);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_previous());
        assert!(page.has_next());

        let last: Page<u8> = Page::new(vec![5], PageRequest::new(3, 2), 5);
        assert!(!last.has_next());
    }

    #[test]
    fn empty_page_has_single_page() {
        let page: Page<String> = Page::empty(10);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_records, 0);
    }

    proptest! {
        #[test]
        fn total_pages_covers_every_record(total in 0u64..100_000, per_page in 1u32..200) {
            let pages = total_pages(total, per_page) as u64;
            prop_assert!(pages * per_page as u64 >= total);
            prop_assert!(pages >= 1);
            if total > 0 {
                prop_assert!((pages - 1) * (per_page as u64) < total);
            }
        }

        #[test]
        fn offset_never_precedes_previous_page(page in 1u32..10_000, per_page in 1u32..200) {
            let req = PageRequest::new(page, per_page);
            prop_assert_eq!(req.offset() + req.limit(), page as u64 * per_page as u64);
        }
    }
}
