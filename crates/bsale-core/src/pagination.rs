//! Offset-based pagination over the proxy's `products.json` listing.
//!
//! The page size is fixed; the total page count is derived from the `count`
//! the upstream reports with every page.

/// Products requested per page.
pub const PAGE_SIZE: u32 = 25;

/// Zero-based page cursor plus the last total count reported upstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Paginator {
    page_index: u32,
    total_count: u64,
}

impl Paginator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts at `page_index` without a known total.
    #[must_use]
    pub fn at(page_index: u32) -> Self {
        Self {
            page_index,
            total_count: 0,
        }
    }

    #[must_use]
    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Records the item count from the latest page response.
    pub fn set_total_count(&mut self, total_count: u64) {
        self.total_count = total_count;
    }

    #[must_use]
    pub fn limit(&self) -> u32 {
        PAGE_SIZE
    }

    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page_index) * u64::from(PAGE_SIZE)
    }

    /// `ceil(total_count / PAGE_SIZE)`; zero when nothing is known.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        let pages = self.total_count.div_ceil(u64::from(PAGE_SIZE));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    fn last_index(&self) -> u32 {
        self.total_pages().saturating_sub(1)
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page_index < self.last_index()
    }

    /// Moves to page 0. Always counts as a transition.
    pub fn first(&mut self) {
        self.page_index = 0;
    }

    /// Moves back one page. Returns `false` (and does nothing) on page 0.
    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.page_index -= 1;
        true
    }

    /// Moves forward one page. Returns `false` (and does nothing) on the last page.
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.page_index += 1;
        true
    }

    /// Moves to the last page, or page 0 when the total is unknown or zero.
    pub fn last(&mut self) {
        self.page_index = self.last_index();
    }

    /// 1-based range of item positions covered by the current page, if any.
    #[must_use]
    pub fn item_range(&self) -> Option<(u64, u64)> {
        let start = self.offset() + 1;
        if start > self.total_count {
            return None;
        }
        let end = (self.offset() + u64::from(PAGE_SIZE)).min(self.total_count);
        Some((start, end))
    }
}
