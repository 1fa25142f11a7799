//! Page state.
//!
//! # Example
//!
//! ```rust
//! use keel_widgets::table::Paginator;
//!
//! let mut p = Paginator::new(10, vec![10, 25]);
//! p.set_row_count(56);
//! assert_eq!(p.page_count(), 6);
//! p.goto_page(99);
//! assert_eq!(p.page(), 5);
//! assert_eq!(p.slice_bounds(56), (50, 56));
//! assert_eq!(p.range_label(6), "51-56 of 56");
//! ```

/// Page index, page size and the row count they divide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    page: usize,
    page_size: usize,
    row_count: usize,
    page_size_options: Vec<usize>,
}

impl Paginator {
    /// First page of an empty set. A zero page size is raised to one.
    pub fn new(page_size: usize, page_size_options: Vec<usize>) -> Self {
        Self {
            page: 0,
            page_size: page_size.max(1),
            row_count: 0,
            page_size_options,
        }
    }

    /// Current page, zero-based.
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Rows per page.
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Rows being paged.
    pub const fn row_count(&self) -> usize {
        self.row_count
    }

    /// Sizes offered by the page-size control.
    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    /// `ceil(row_count / page_size)`.
    pub const fn page_count(&self) -> usize {
        self.row_count.div_ceil(self.page_size)
    }

    fn clamp(&self, page: usize) -> usize {
        page.min(self.page_count().saturating_sub(1))
    }

    /// Update the row count, pulling the page back into range.
    pub fn set_row_count(&mut self, row_count: usize) {
        self.row_count = row_count;
        self.page = self.clamp(self.page);
    }

    /// Go to page `n`, clamped. Returns whether the page changed.
    pub fn goto_page(&mut self, n: usize) -> bool {
        let next = self.clamp(n);
        let changed = next != self.page;
        self.page = next;
        changed
    }

    /// Next page, if any.
    pub fn next_page(&mut self) -> bool {
        self.goto_page(self.page + 1)
    }

    /// Previous page, if any.
    pub fn previous_page(&mut self) -> bool {
        self.goto_page(self.page.saturating_sub(1))
    }

    /// First page.
    pub fn first_page(&mut self) -> bool {
        self.goto_page(0)
    }

    /// Last page.
    pub fn last_page(&mut self) -> bool {
        self.goto_page(self.page_count().saturating_sub(1))
    }

    /// Back to the first page without clamping concerns.
    pub const fn reset(&mut self) {
        self.page = 0;
    }

    /// Change the page size (at least one) and go to the first page.
    /// Returns whether anything changed.
    pub fn set_page_size(&mut self, n: usize) -> bool {
        let n = n.max(1);
        let changed = n != self.page_size || self.page != 0;
        self.page_size = n;
        self.page = 0;
        changed
    }

    /// Step to the next (`forward`) or previous page-size option.
    pub fn cycle_page_size(&mut self, forward: bool) -> bool {
        let opts = &self.page_size_options;
        let next = if forward {
            opts.iter().copied().find(|&s| s > self.page_size)
        } else {
            opts.iter().copied().rev().find(|&s| s < self.page_size)
        };
        next.is_some_and(|n| self.set_page_size(n))
    }

    /// Whether the current page is the first.
    pub const fn on_first_page(&self) -> bool {
        self.page == 0
    }

    /// Whether the current page is the last (or there are no pages).
    pub const fn on_last_page(&self) -> bool {
        self.page + 1 >= self.page_count()
    }

    /// Start and end of the current page within `len` units.
    pub fn slice_bounds(&self, len: usize) -> (usize, usize) {
        let start = (self.page * self.page_size).min(len);
        let end = (start + self.page_size).min(len);
        (start, end)
    }

    /// `start-end of total` for a page showing `page_len` units.
    pub fn range_label(&self, page_len: usize) -> String {
        if self.row_count == 0 || page_len == 0 {
            return format!("0-0 of {}", self.row_count);
        }
        let start = self.page * self.page_size + 1;
        let end = (start + page_len - 1).min(self.row_count);
        format!("{start}-{end} of {}", self.row_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paged(rows: usize, size: usize) -> Paginator {
        let mut p = Paginator::new(size, vec![10, 25, 50, 100]);
        p.set_row_count(rows);
        p
    }

    #[test]
    fn test_navigation_clamps() {
        let mut p = paged(56, 10);
        assert!(p.on_first_page());
        assert!(!p.previous_page());
        assert!(p.next_page());
        assert_eq!(p.page(), 1);
        assert!(p.last_page());
        assert_eq!(p.page(), 5);
        assert!(p.on_last_page());
        assert!(!p.next_page());
        assert!(p.first_page());
        assert_eq!(p.page(), 0);
    }

    #[test]
    fn test_empty_set_has_no_pages() {
        let mut p = paged(0, 10);
        assert_eq!(p.page_count(), 0);
        assert!(!p.goto_page(3));
        assert_eq!(p.page(), 0);
        assert!(p.on_last_page());
        assert_eq!(p.range_label(0), "0-0 of 0");
    }

    #[test]
    fn test_shrinking_row_count_pulls_page_back() {
        let mut p = paged(56, 10);
        p.last_page();
        p.set_row_count(15);
        assert_eq!(p.page(), 1);
    }

    #[test]
    fn test_page_size_resets_page() {
        let mut p = paged(56, 10);
        p.next_page();
        assert!(p.set_page_size(0));
        assert_eq!(p.page_size(), 1);
        assert_eq!(p.page(), 0);
        assert_eq!(p.page_count(), 56);
    }

    #[test]
    fn test_cycle_page_size() {
        let mut p = paged(56, 10);
        assert!(p.cycle_page_size(true));
        assert_eq!(p.page_size(), 25);
        assert!(p.cycle_page_size(false));
        assert_eq!(p.page_size(), 10);
        assert!(!p.cycle_page_size(false));
    }

    #[test]
    fn test_labels() {
        let mut p = paged(56, 10);
        assert_eq!(p.range_label(10), "1-10 of 56");
        p.next_page();
        assert_eq!(p.range_label(10), "11-20 of 56");
        assert_eq!(paged(1, 10).range_label(1), "1-1 of 1");
    }
}
