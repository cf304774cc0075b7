use std::ops::Range;

/// Pagination state over a result collection
///
/// `current_page` is 1-based and always clamped to `[1, max(total_pages, 1)]`,
/// so an empty result set still reports page 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: u32,
    page_size: u32,
    total_items: usize,
}

impl Pagination {
    /// Create pagination state for an empty result set
    pub fn new(page_size: u32) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total_items: 0,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Number of pages needed for the current total
    pub fn total_pages(&self) -> u32 {
        self.total_items.div_ceil(self.page_size as usize) as u32
    }

    /// Replace the item total, keeping the current page where it remains valid
    pub fn set_total(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.current_page = self.clamp_page(self.current_page);
    }

    /// Install a new result total and jump back to the first page
    pub fn reset(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.current_page = 1;
    }

    /// Move to a page, clamping into `[1, max(total_pages, 1)]`
    ///
    /// Returns whether the current page actually changed; navigating to the
    /// page already shown is a no-op, not an error.
    pub fn go_to(&mut self, page: u32) -> bool {
        let clamped = self.clamp_page(page);
        if clamped == self.current_page {
            return false;
        }
        self.current_page = clamped;
        true
    }

    /// Index range of the visible slice within the result collection
    pub fn page_range(&self) -> Range<usize> {
        let size = self.page_size as usize;
        let start = ((self.current_page as usize) - 1) * size;
        let start = start.min(self.total_items);
        let end = (start + size).min(self.total_items);
        start..end
    }

    fn clamp_page(&self, page: u32) -> u32 {
        page.clamp(1, self.total_pages().max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        let mut pagination = Pagination::new(10);
        pagination.reset(25);

        assert_eq!(pagination.total_pages(), 3);

        pagination.reset(30);
        assert_eq!(pagination.total_pages(), 3);

        pagination.reset(31);
        assert_eq!(pagination.total_pages(), 4);
    }

    #[test]
    fn test_go_to_clamps_above() {
        let mut pagination = Pagination::new(10);
        pagination.reset(25);

        pagination.go_to(5);
        assert_eq!(pagination.current_page(), 3);
    }

    #[test]
    fn test_go_to_clamps_below() {
        let mut pagination = Pagination::new(10);
        pagination.reset(25);

        pagination.go_to(0);
        assert_eq!(pagination.current_page(), 1);
    }

    #[test]
    fn test_go_to_same_page_is_noop() {
        let mut pagination = Pagination::new(10);
        pagination.reset(25);

        assert!(pagination.go_to(2));
        assert!(!pagination.go_to(2));
        assert_eq!(pagination.current_page(), 2);
    }

    #[test]
    fn test_empty_total_still_legal() {
        let mut pagination = Pagination::new(10);

        assert_eq!(pagination.total_pages(), 0);
        assert!(!pagination.go_to(7));
        assert_eq!(pagination.current_page(), 1);
    }

    #[test]
    fn test_page_range_last_partial_page() {
        let mut pagination = Pagination::new(10);
        pagination.reset(25);
        pagination.go_to(3);

        assert_eq!(pagination.page_range(), 20..25);
    }

    #[test]
    fn test_set_total_reclamps_current_page() {
        let mut pagination = Pagination::new(10);
        pagination.reset(25);
        pagination.go_to(3);

        pagination.set_total(5);
        assert_eq!(pagination.current_page(), 1);
        assert_eq!(pagination.page_range(), 0..5);
    }

    #[test]
    fn test_page_size_floor() {
        let pagination = Pagination::new(0);
        assert_eq!(pagination.page_size(), 1);
    }
}
