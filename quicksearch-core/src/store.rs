//! Result Store: the latest accepted result set, its status, and page position.

use std::num::NonZeroUsize;

use serde::Serialize;
use tracing::{debug, warn};

use crate::controller::RequestState;
use crate::error::{SourceError, SourceResult, GENERIC_FAILURE_MESSAGE};
use crate::model::{ResultItem, Status};
use crate::paginator::{PageLink, Paginator, DEFAULT_MAX_PAGE_LINKS};

/// Snapshot handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchView {
    pub status: Status,
    /// Items on the current page
    pub items: Vec<ResultItem>,
    pub page: usize,
    /// Offset of `items[0]` in the whole result set
    pub first_index: usize,
    pub total_pages: usize,
    /// Length of the whole result set
    pub total_items: usize,
    pub page_links: Vec<PageLink>,
    pub has_prev: bool,
    pub has_next: bool,
}

impl SearchView {
    /// Page controls are only worth showing when there is somewhere to go
    pub fn has_multiple_pages(&self) -> bool {
        self.total_pages > 1
    }
}

impl Default for SearchView {
    fn default() -> Self {
        Self {
            status: Status::Idle,
            items: Vec::new(),
            page: 1,
            first_index: 0,
            total_pages: 1,
            total_items: 0,
            page_links: vec![PageLink::Page(1)],
            has_prev: false,
            has_next: false,
        }
    }
}

/// Owns the result set and the paginator over it.
///
/// Every mutation that replaces the result set resets the page to 1.
#[derive(Debug)]
pub struct ResultStore {
    items: Vec<ResultItem>,
    status: Status,
    pager: Paginator,
    max_page_links: usize,
}

impl ResultStore {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            items: Vec::new(),
            status: Status::Idle,
            pager: Paginator::new(page_size),
            max_page_links: DEFAULT_MAX_PAGE_LINKS,
        }
    }

    pub fn with_max_page_links(mut self, max_page_links: usize) -> Self {
        self.max_page_links = max_page_links;
        self
    }

    /// Items and status as one read
    pub fn snapshot(&self) -> (&[ResultItem], &Status) {
        (&self.items, &self.status)
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn items(&self) -> &[ResultItem] {
        &self.items
    }

    /// Replace the whole result set. Status becomes `Populated`, or `Empty` for zero items.
    pub fn replace(&mut self, items: Vec<ResultItem>) {
        self.status = if items.is_empty() {
            Status::Empty
        } else {
            Status::Populated
        };
        self.items = items;
        self.pager.reset();
    }

    /// Clear the result set and show `message`.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.items = Vec::new();
        self.status = Status::Error(message.into());
        self.pager.reset();
    }

    /// Mark a request as in flight. The previous items stay visible.
    pub fn begin_loading(&mut self) {
        self.status = Status::Loading;
    }

    /// Drop everything and return to `Idle`.
    pub fn clear(&mut self) {
        self.items = Vec::new();
        self.status = Status::Idle;
        self.pager.reset();
    }

    /// Write a source outcome into the store.
    ///
    /// Callers must only pass outcomes of the live request; a cancelled
    /// outcome reaching this point means the source gave up on its own and
    /// is reported like a transport failure.
    pub fn apply(&mut self, outcome: SourceResult<Vec<ResultItem>>) -> RequestState {
        match outcome {
            Ok(items) => {
                debug!(count = items.len(), "result set replaced");
                self.replace(items);
                RequestState::Resolved
            }
            Err(SourceError::Domain { message }) => {
                debug!(%message, "source reported no results");
                self.set_error(message);
                RequestState::Resolved
            }
            Err(SourceError::Transport { reason }) => {
                warn!(%reason, "search request failed");
                self.set_error(GENERIC_FAILURE_MESSAGE);
                RequestState::Failed
            }
            Err(SourceError::Cancelled) => {
                warn!("live request reported cancellation");
                self.set_error(GENERIC_FAILURE_MESSAGE);
                RequestState::Failed
            }
        }
    }

    pub fn page(&self) -> usize {
        self.pager.current()
    }

    pub fn total_pages(&self) -> usize {
        self.pager.total_pages(self.items.len())
    }

    /// Items on the current page, computed from the current result set
    pub fn visible_slice(&self) -> &[ResultItem] {
        self.pager.visible_slice(&self.items)
    }

    /// Returns `false` and leaves the page unchanged when `page` is out of range.
    pub fn go_to(&mut self, page: usize) -> bool {
        self.pager.go_to(page, self.items.len())
    }

    pub fn next_page(&mut self) -> bool {
        self.pager.next(self.items.len())
    }

    pub fn prev_page(&mut self) -> bool {
        self.pager.prev(self.items.len())
    }

    pub fn view(&self) -> SearchView {
        let len = self.items.len();
        SearchView {
            status: self.status.clone(),
            items: self.visible_slice().to_vec(),
            page: self.pager.current(),
            first_index: (self.pager.current() - 1) * self.pager.page_size(),
            total_pages: self.pager.total_pages(len),
            total_items: len,
            page_links: self.pager.page_links(len, self.max_page_links),
            has_prev: self.pager.has_prev(),
            has_next: self.pager.has_next(len),
        }
    }
}
