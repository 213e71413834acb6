//! Client-side pagination over the current result set.

use std::num::NonZeroUsize;

use serde::Serialize;

/// Default items per page
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Default width of the page-number strip
pub const DEFAULT_MAX_PAGE_LINKS: usize = 9;

/// One slot of the page-number strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageLink {
    Page(usize),
    Ellipsis,
}

/// Active page index over a fixed page size.
///
/// Does not own the items; every query takes the current length so the
/// answer always matches the latest result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    /// Page number (1-indexed)
    current: usize,
    page_size: NonZeroUsize,
}

impl Paginator {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            current: 1,
            page_size,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }

    /// `max(1, ceil(len / page_size))`
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size.get()).max(1)
    }

    /// Move to `page` if it lies in `1..=total_pages`.
    ///
    /// Out-of-range requests leave the page unchanged and return `false`.
    pub fn go_to(&mut self, page: usize, len: usize) -> bool {
        if page < 1 || page > self.total_pages(len) {
            return false;
        }
        self.current = page;
        true
    }

    pub fn next(&mut self, len: usize) -> bool {
        self.go_to(self.current + 1, len)
    }

    pub fn prev(&mut self, len: usize) -> bool {
        match self.current.checked_sub(1) {
            Some(page) => self.go_to(page, len),
            None => false,
        }
    }

    pub fn has_next(&self, len: usize) -> bool {
        self.current < self.total_pages(len)
    }

    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    /// The window of `items` for the current page.
    pub fn visible_slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let size = self.page_size.get();
        let start = (self.current - 1).saturating_mul(size);
        if start >= items.len() {
            return &[];
        }
        let end = start.saturating_add(size).min(items.len());
        &items[start..end]
    }

    /// Page-number strip with ellipses once there are more than `max_visible` pages.
    ///
    /// The first and last pages are always present; pages within
    /// `max_visible / 2` of the current one fill the middle.
    pub fn page_links(&self, len: usize, max_visible: usize) -> Vec<PageLink> {
        let total = self.total_pages(len);
        if total <= max_visible {
            return (1..=total).map(PageLink::Page).collect();
        }

        let half = max_visible / 2;
        let current = self.current;
        let mut links = vec![PageLink::Page(1)];

        if current > half + 2 {
            links.push(PageLink::Ellipsis);
        }

        let start = current.saturating_sub(half).max(2);
        let end = (current + half).min(total - 1);
        links.extend((start..=end).map(PageLink::Page));

        if current + half + 1 < total {
            links.push(PageLink::Ellipsis);
        }

        links.push(PageLink::Page(total));
        links
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN))
    }
}
