//! Contract tests for the collection-view engine: page clamping, filter
//! reset rules, last-request-wins resolution, and empty/error rendering
//! states.

use netdesk::collection::{CollectionState, FilterChange, FilterState, Phase, SortDirection};
use netdesk::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated, clamp_page, total_pages};

type TestState = CollectionState<u32, &'static str, Option<&'static str>>;

fn view() -> TestState {
    CollectionState::new(FilterState::new(None))
}

#[test]
fn page_always_clamps_into_valid_range() {
    for (page, total, per_page) in [
        (0, 47, 10),
        (1, 47, 10),
        (5, 47, 10),
        (6, 47, 10),
        (99, 47, 10),
        (3, 0, 20),
        (1, 1, 50),
    ] {
        let clamped = clamp_page(page, total, per_page);
        assert!(clamped >= 1);
        assert!(clamped <= total_pages(total, per_page).max(1));
    }
}

#[test]
fn content_changes_reset_page_but_page_moves_do_not() {
    let mut filter: FilterState<&str, Option<&str>> =
        FilterState::from_params(Some(4), Some(10), None, None, None);

    filter.apply(FilterChange::Page(4));
    assert_eq!(filter.page(), 4);

    filter.apply(FilterChange::Search(Some("fiber".into())));
    assert_eq!(filter.page(), 1, "search resets the page");

    filter.apply(FilterChange::Page(3));
    filter.apply(FilterChange::Sort("name", SortDirection::Descending));
    assert_eq!(filter.page(), 1, "sort resets the page");

    filter.apply(FilterChange::Page(3));
    filter.apply(FilterChange::Filters(Some("active")));
    assert_eq!(filter.page(), 1, "entity filter resets the page");

    filter.apply(FilterChange::Page(3));
    assert_eq!(filter.search.as_deref(), Some("fiber"));
    assert_eq!(filter.filters, Some("active"));
    assert_eq!(filter.page(), 3, "page moves leave everything else alone");
}

#[test]
fn page_size_toggle_resets_to_first_page() {
    let mut filter: FilterState<&str, Option<&str>> =
        FilterState::from_params(Some(3), Some(10), None, None, None);
    assert_eq!(filter.page(), 3);

    filter.apply(FilterChange::PageSize(20));
    assert_eq!(filter.page(), 1);
    assert_eq!(filter.per_page(), 20);
}

#[test]
fn off_menu_page_sizes_fall_back_to_default() {
    let filter: FilterState<&str, Option<&str>> =
        FilterState::from_params(None, Some(1000), None, None, None);
    assert_eq!(filter.per_page(), DEFAULT_ITEMS_PER_PAGE);
}

#[test]
fn later_request_wins_regardless_of_resolution_order() {
    let mut view = view();

    let first = view.apply(FilterChange::Search(Some("a".into())));
    let second = view.apply(FilterChange::Search(Some("ab".into())));

    // The newer response lands first; the older one must be discarded.
    assert!(view.resolve_rows(second, vec![2], 1));
    assert!(!view.resolve_rows(first, vec![1], 99));
    assert_eq!(view.rows(), [2]);
    assert_eq!(view.total(), 1);

    // Same discipline when the stale response is an error.
    let first = view.refresh();
    let second = view.refresh();
    assert!(view.resolve_rows(second, vec![3], 1));
    assert!(!view.resolve_error(first, "timeout"));
    assert_eq!(view.phase(), Phase::Success);
    assert!(view.error().is_none());
}

#[test]
fn zero_total_renders_empty_state_not_error() {
    let mut view = view();
    let request = view.refresh();
    assert!(view.resolve_rows(request, vec![], 0));

    assert_eq!(view.phase(), Phase::Success);
    assert!(view.is_empty());
    assert_eq!(view.page_count(), 1);

    let paged: Paginated<u32> = Paginated::new(vec![], 1, DEFAULT_ITEMS_PER_PAGE, 0);
    assert_eq!(paged.total_pages, 1);
    assert_eq!(paged.pages, vec![Some(1)]);
}

#[test]
fn forty_seven_rows_at_ten_per_page() {
    assert_eq!(total_pages(47, 10), 5);

    let last_page: Paginated<u32> = Paginated::new((41..=47).collect(), 5, 10, 47);
    assert_eq!(last_page.total, 47);
    assert!(!last_page.has_next, "Next is disabled on the last page");
    assert!(last_page.has_prev);
}

#[test]
fn failed_refresh_keeps_last_good_rows_visible() {
    let mut view = view();

    let request = view.refresh();
    assert!(view.resolve_rows(request, vec![7, 8], 2));

    let request = view.refresh();
    assert_eq!(view.phase(), Phase::Loading);
    assert!(!view.controls_enabled(), "controls disabled while in flight");
    assert!(view.resolve_error(request, "connection reset"));

    assert_eq!(view.phase(), Phase::Error);
    assert_eq!(view.rows(), [7, 8], "stale-but-valid rows stay visible");
    assert_eq!(view.error(), Some("connection reset"));

    // The next gesture goes straight back to Loading.
    view.apply(FilterChange::Page(1));
    assert_eq!(view.phase(), Phase::Loading);
}

#[test]
fn resolved_page_is_clamped_to_reported_total() {
    let mut view = view();

    let request = view.apply(FilterChange::Page(9));
    assert_eq!(request.state.page(), 9);

    // 47 rows at the default 20 per page leaves 3 pages.
    assert!(view.resolve_rows(request, vec![], 47));
    assert_eq!(view.filter().page(), 3);
}
