//! Filter state and fetch coordination shared by the collection screens.
//!
//! Every list screen is an instance of the same pattern: a filter state
//! (page, page size, sort, search, entity filters) drives a server-side
//! query returning one page of rows plus a total count. `FilterState` owns
//! the parameter normalization and merge rules; `CollectionState` adds the
//! fetch lifecycle for stateful consumers, where only the most recently
//! issued request is allowed to update the visible rows.

use serde::{Deserialize, Serialize};

use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, normalize_page_size, total_pages};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    /// Parses the `dir` query parameter.
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "asc" | "ascending" => Some(Self::Ascending),
            "desc" | "descending" => Some(Self::Descending),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// Combined pagination/sort/search/filter parameters for one screen.
///
/// `S` is the screen's sort-column enum, `F` its entity-filter struct.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterState<S, F> {
    page: usize,
    per_page: usize,
    pub sort: Option<(S, SortDirection)>,
    pub search: Option<String>,
    pub filters: F,
}

/// One user gesture against a collection view.
#[derive(Clone, Debug)]
pub enum FilterChange<S, F> {
    Page(usize),
    PageSize(usize),
    Sort(S, SortDirection),
    Search(Option<String>),
    Filters(F),
}

fn normalize_search(search: Option<String>) -> Option<String> {
    search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl<S, F> FilterState<S, F> {
    pub fn new(filters: F) -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_ITEMS_PER_PAGE,
            sort: None,
            search: None,
            filters,
        }
    }

    /// Seeds the state from request query parameters.
    pub fn from_params(
        page: Option<usize>,
        per_page: Option<usize>,
        search: Option<String>,
        sort: Option<(S, SortDirection)>,
        filters: F,
    ) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: normalize_page_size(per_page),
            sort,
            search: normalize_search(search),
            filters,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Merges one gesture into the state.
    ///
    /// Changing the result order or content (sort, search, filters, page
    /// size) invalidates the user's position and resets to page 1; a plain
    /// page move touches nothing else.
    pub fn apply(&mut self, change: FilterChange<S, F>) {
        match change {
            FilterChange::Page(page) => self.page = page.max(1),
            FilterChange::PageSize(per_page) => {
                self.per_page = normalize_page_size(Some(per_page));
                self.page = 1;
            }
            FilterChange::Sort(column, direction) => {
                self.sort = Some((column, direction));
                self.page = 1;
            }
            FilterChange::Search(search) => {
                self.search = normalize_search(search);
                self.page = 1;
            }
            FilterChange::Filters(filters) => {
                self.filters = filters;
                self.page = 1;
            }
        }
    }

    /// Pulls the page back into `[1, total_pages]` once a fetch has
    /// reported the real row count. Returns whether the page moved, in
    /// which case the caller re-fetches with the clamped state.
    pub fn clamp_to(&mut self, total: usize) -> bool {
        let clamped = self.page.clamp(1, total_pages(total, self.per_page));
        let moved = clamped != self.page;
        self.page = clamped;
        moved
    }
}

/// Fetch lifecycle of a collection screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No fetch has resolved yet.
    Idle,
    Loading,
    Success,
    Error,
}

/// Snapshot of the filter state a fetch was issued with, tagged so stale
/// responses can be recognized at resolution time.
#[derive(Clone, Debug)]
pub struct FetchRequest<S, F> {
    seq: u64,
    pub state: FilterState<S, F>,
}

/// Screen-instance state: the latest filter state, the rows of the last
/// successful fetch, and the in-flight bookkeeping that enforces
/// last-request-wins.
#[derive(Debug)]
pub struct CollectionState<T, S, F> {
    filter: FilterState<S, F>,
    phase: Phase,
    seq: u64,
    rows: Vec<T>,
    total: usize,
    error: Option<String>,
    loaded: bool,
}

impl<T, S: Clone, F: Clone> CollectionState<T, S, F> {
    pub fn new(filter: FilterState<S, F>) -> Self {
        Self {
            filter,
            phase: Phase::Idle,
            seq: 0,
            rows: Vec::new(),
            total: 0,
            error: None,
            loaded: false,
        }
    }

    fn issue(&mut self) -> FetchRequest<S, F> {
        self.seq += 1;
        self.phase = Phase::Loading;
        FetchRequest {
            seq: self.seq,
            state: self.filter.clone(),
        }
    }

    /// Merges a gesture and issues the fetch it triggers.
    pub fn apply(&mut self, change: FilterChange<S, F>) -> FetchRequest<S, F> {
        self.filter.apply(change);
        self.issue()
    }

    /// Re-issues a fetch with the current filter state.
    pub fn refresh(&mut self) -> FetchRequest<S, F> {
        self.issue()
    }

    /// Applies a successful response. A response to anything but the most
    /// recently issued request is discarded and `false` is returned.
    pub fn resolve_rows(&mut self, request: FetchRequest<S, F>, rows: Vec<T>, total: usize) -> bool {
        if request.seq != self.seq {
            return false;
        }
        self.filter.clamp_to(total);
        self.rows = rows;
        self.total = total;
        self.error = None;
        self.loaded = true;
        self.phase = Phase::Success;
        true
    }

    /// Applies a failed response. The rows of the last successful fetch
    /// stay visible; only the message and phase change. Stale errors are
    /// discarded like stale successes.
    pub fn resolve_error(&mut self, request: FetchRequest<S, F>, message: impl Into<String>) -> bool {
        if request.seq != self.seq {
            return false;
        }
        self.error = Some(message.into());
        self.phase = Phase::Error;
        true
    }

    pub fn filter(&self) -> &FilterState<S, F> {
        &self.filter
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn page_count(&self) -> usize {
        total_pages(self.total, self.filter.per_page)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// A fetch has completed and reported zero rows: the view renders an
    /// explicit empty state, distinct from the never-loaded `Idle` body.
    pub fn is_empty(&self) -> bool {
        self.loaded && self.total == 0
    }

    /// Navigation controls stay visible but disabled while a fetch is in
    /// flight, so a screen cannot issue duplicate requests.
    pub fn controls_enabled(&self) -> bool {
        self.phase != Phase::Loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum By {
        Name,
        CreatedAt,
    }

    #[derive(Clone, Debug, Default, PartialEq)]
    struct NoFilters;

    fn state() -> CollectionState<&'static str, By, NoFilters> {
        CollectionState::new(FilterState::new(NoFilters))
    }

    #[test]
    fn search_resets_page_but_keeps_sort() {
        let mut filter: FilterState<By, NoFilters> =
            FilterState::from_params(Some(4), Some(10), None, None, NoFilters);
        filter.apply(FilterChange::Sort(By::Name, SortDirection::Ascending));
        filter.apply(FilterChange::Page(3));
        assert_eq!(filter.page(), 3);

        filter.apply(FilterChange::Search(Some("  alice ".into())));
        assert_eq!(filter.page(), 1);
        assert_eq!(filter.search.as_deref(), Some("alice"));
        assert_eq!(filter.sort, Some((By::Name, SortDirection::Ascending)));
    }

    #[test]
    fn page_size_change_resets_page_only() {
        let mut filter: FilterState<By, NoFilters> =
            FilterState::from_params(Some(3), Some(10), Some("x".into()), None, NoFilters);
        filter.apply(FilterChange::PageSize(20));
        assert_eq!(filter.page(), 1);
        assert_eq!(filter.per_page(), 20);
        assert_eq!(filter.search.as_deref(), Some("x"));
    }

    #[test]
    fn page_move_keeps_everything_else() {
        let mut filter: FilterState<By, NoFilters> =
            FilterState::from_params(None, Some(10), Some("x".into()), None, NoFilters);
        filter.apply(FilterChange::Page(5));
        assert_eq!(filter.page(), 5);
        assert_eq!(filter.per_page(), 10);
        assert_eq!(filter.search.as_deref(), Some("x"));
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut view = state();
        let first = view.apply(FilterChange::Search(Some("a".into())));
        let second = view.apply(FilterChange::Search(Some("ab".into())));

        // Out-of-order resolution: the newer request resolves first.
        assert!(view.resolve_rows(second, vec!["ab-row"], 1));
        assert!(!view.resolve_rows(first, vec!["a-row"], 40));

        assert_eq!(view.rows(), ["ab-row"]);
        assert_eq!(view.total(), 1);
        assert_eq!(view.phase(), Phase::Success);
    }

    #[test]
    fn error_keeps_last_good_rows() {
        let mut view = state();
        let req = view.refresh();
        assert!(view.resolve_rows(req, vec!["row"], 1));

        let req = view.refresh();
        assert!(!view.controls_enabled());
        assert!(view.resolve_error(req, "connection reset"));

        assert_eq!(view.phase(), Phase::Error);
        assert_eq!(view.rows(), ["row"]);
        assert_eq!(view.error(), Some("connection reset"));
    }

    #[test]
    fn zero_total_is_empty_state_not_error() {
        let mut view = state();
        let req = view.refresh();
        assert!(view.resolve_rows(req, vec![], 0));
        assert!(view.is_empty());
        assert_eq!(view.phase(), Phase::Success);
        assert_eq!(view.page_count(), 1);
    }

    #[test]
    fn success_clamps_out_of_range_page() {
        let mut view = state();
        let req = view.apply(FilterChange::Page(9));
        assert_eq!(req.state.page(), 9);
        // 47 rows at 20 per page: only 3 pages exist.
        assert!(view.resolve_rows(req, vec![], 47));
        assert_eq!(view.filter().page(), 3);
    }
}
