//! Paginated, filterable issue list for one repository.
//!
//! The feed is a plain state machine: it hands out [`PageRequest`]s and takes
//! their results back through [`IssueFeed::apply`]. It never performs I/O.
//!
//! ```text
//! Idle ──start──▶ LoadingFirstPage ──apply──▶ Ready
//! Ready ──set_filter──▶ LoadingFirstPage      (items cleared, page 1)
//! Ready ──load_more──▶ LoadingNextPage ──apply──▶ Ready (items appended)
//! ```
//!
//! Every request carries a generation number. Starting a new first page
//! (initial load or filter change) bumps the generation, so a response that
//! arrives for an older request no longer matches the request in flight and
//! is dropped instead of mixing pages from different filters.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::model::{ISSUES_PER_PAGE, Issue, IssueFilter};
use crate::remote::ApiError;

/// Generations are unique across feeds, so a response addressed to a feed
/// from an earlier screen visit can never match a newer one.
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    Idle,
    LoadingFirstPage,
    LoadingNextPage,
    Ready,
}

/// One page fetch. Doubles as the fencing token checked in [`IssueFeed::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub generation: u64,
    pub repo: String,
    pub filter: IssueFilter,
    pub page: u32,
}

/// What [`IssueFeed::apply`] did with a response
#[derive(Debug)]
pub enum Applied {
    /// First page: items replaced by this many issues
    Replaced(usize),
    /// Later page: this many issues appended
    Appended(usize),
    /// The fetch failed; items and page are unchanged
    Failed(ApiError),
    /// Response for a superseded request; ignored
    Stale,
}

#[derive(Debug)]
pub struct IssueFeed {
    repo: String,
    filter: IssueFilter,
    /// Last page merged into `items` (1 before anything is loaded)
    page: u32,
    /// Whether page 1 of the current filter has been merged
    loaded: bool,
    items: Vec<Issue>,
    has_more: bool,
    status: FeedStatus,
    generation: u64,
    in_flight: Option<PageRequest>,
}

impl IssueFeed {
    pub fn new(repo: impl Into<String>) -> Self {
        IssueFeed {
            repo: repo.into(),
            filter: IssueFilter::default(),
            page: 1,
            loaded: false,
            items: Vec::new(),
            has_more: true,
            status: FeedStatus::Idle,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn filter(&self) -> IssueFilter {
        self.filter
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn items(&self) -> &[Issue] {
        &self.items
    }

    /// Whether the last fetched page was full. A full last page is
    /// indistinguishable from a non-last one, so this can overshoot by one
    /// (empty) page at exact multiples of the page size.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn status(&self) -> FeedStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(
            self.status,
            FeedStatus::LoadingFirstPage | FeedStatus::LoadingNextPage
        )
    }

    pub fn in_flight(&self) -> Option<&PageRequest> {
        self.in_flight.as_ref()
    }

    /// "Load more" is enabled only when idle between fetches and the last page was full
    pub fn can_load_more(&self) -> bool {
        self.status == FeedStatus::Ready && self.has_more
    }

    /// Load the first page of the current filter, discarding anything accumulated
    pub fn start(&mut self) -> PageRequest {
        self.begin_first_page()
    }

    /// Switch filter. Selecting the already-active filter does nothing once
    /// the feed has started.
    pub fn set_filter(&mut self, filter: IssueFilter) -> Option<PageRequest> {
        if filter == self.filter && self.status != FeedStatus::Idle {
            return None;
        }
        self.filter = filter;
        Some(self.begin_first_page())
    }

    /// Request the next page. After a failed first page this retries page 1.
    pub fn load_more(&mut self) -> Option<PageRequest> {
        if !self.can_load_more() {
            return None;
        }
        let (page, status) = if self.loaded {
            (self.page + 1, FeedStatus::LoadingNextPage)
        } else {
            (1, FeedStatus::LoadingFirstPage)
        };
        let request = self.request(page);
        self.status = status;
        self.in_flight = Some(request.clone());
        Some(request)
    }

    /// Merge the result of `request`. Only the request currently in flight is
    /// accepted; anything else is reported as [`Applied::Stale`].
    pub fn apply(&mut self, request: &PageRequest, result: Result<Vec<Issue>, ApiError>) -> Applied {
        if self.in_flight.as_ref() != Some(request) {
            return Applied::Stale;
        }
        self.in_flight = None;
        self.status = FeedStatus::Ready;

        let issues = match result {
            Ok(issues) => issues,
            Err(e) => return Applied::Failed(e),
        };

        self.has_more = issues.len() >= ISSUES_PER_PAGE;
        self.page = request.page;
        let count = issues.len();
        if request.page == 1 {
            self.items = issues;
            self.loaded = true;
            Applied::Replaced(count)
        } else {
            self.items.extend(issues);
            Applied::Appended(count)
        }
    }

    fn begin_first_page(&mut self) -> PageRequest {
        self.generation = next_generation();
        self.items.clear();
        self.page = 1;
        self.loaded = false;
        self.has_more = true;
        self.status = FeedStatus::LoadingFirstPage;
        let request = self.request(1);
        self.in_flight = Some(request.clone());
        request
    }

    fn request(&self, page: u32) -> PageRequest {
        PageRequest {
            generation: self.generation,
            repo: self.repo.clone(),
            filter: self.filter,
            page,
        }
    }
}
