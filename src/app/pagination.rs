//! Page bookkeeping for the catalog list

use crate::models::PaginationParams;

/// Maximum page numbers shown around the current page
const WINDOW: u64 = 5;

/// One slot in the page-number bar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageMarker {
    Page(u64),
    Ellipsis,
}

/// 1-based page position over a result set of known size
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: u64,
    pub items_per_page: u64,
    pub total_items: u64,
}

impl Pagination {
    pub fn new(items_per_page: u64) -> Self {
        Pagination {
            current_page: 1,
            items_per_page: items_per_page.max(1),
            total_items: 0,
        }
    }

    pub fn total_pages(&self) -> u64 {
        self.total_items.div_ceil(self.items_per_page)
    }

    pub fn offset(&self) -> u64 {
        (self.current_page - 1) * self.items_per_page
    }

    /// Parameters for the request that loads the current page
    pub fn params(&self) -> PaginationParams {
        PaginationParams::new(self.items_per_page, self.offset())
    }

    /// The bar is only worth drawing when there is more than one page
    pub fn is_visible(&self) -> bool {
        self.total_items > self.items_per_page
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Move to `page` if it is in range and different; returns whether it moved
    pub fn go_to(&mut self, page: u64) -> bool {
        if page == 0 || page > self.total_pages() || page == self.current_page {
            return false;
        }
        self.current_page = page;
        true
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.current_page + 1)
    }

    pub fn prev(&mut self) -> bool {
        self.go_to(self.current_page.saturating_sub(1))
    }

    pub fn first(&mut self) -> bool {
        self.go_to(1)
    }

    pub fn last(&mut self) -> bool {
        self.go_to(self.total_pages())
    }

    /// Pull the current page back inside the result set after `total_items`
    /// shrank; returns whether it moved
    pub fn clamp(&mut self) -> bool {
        let last = self.total_pages().max(1);
        if self.current_page <= last {
            return false;
        }
        self.current_page = last;
        true
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
        self.total_items = 0;
    }

    /// "Showing X to Y of Z results"
    pub fn summary(&self) -> String {
        if self.total_items == 0 {
            return String::from("No results");
        }
        let first = self.offset() + 1;
        let last = (self.offset() + self.items_per_page).min(self.total_items);
        format!("Showing {} to {} of {} results", first, last, self.total_items)
    }

    /// Page numbers around the current page, with the first and last page
    /// always reachable
    pub fn page_window(&self) -> Vec<PageMarker> {
        let total = self.total_pages();
        if total == 0 {
            return Vec::new();
        }

        let half = WINDOW / 2;
        let mut start = self.current_page.saturating_sub(half).max(1);
        let end = (start + WINDOW - 1).min(total);
        start = end.saturating_sub(WINDOW - 1).max(1);

        let mut markers = Vec::new();
        if start > 1 {
            markers.push(PageMarker::Page(1));
            if start > 2 {
                markers.push(PageMarker::Ellipsis);
            }
        }
        markers.extend((start..=end).map(PageMarker::Page));
        if end < total {
            if end < total - 1 {
                markers.push(PageMarker::Ellipsis);
            }
            markers.push(PageMarker::Page(total));
        }
        markers
    }
}
