//! Page arithmetic and the template-facing page model shared by every
//! collection screen.

use serde::Serialize;

/// Page sizes the page-size selector offers.
pub const PAGE_SIZE_OPTIONS: [usize; 5] = [10, 20, 30, 40, 50];

/// Page size used when the request does not carry one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// Maps a requested page size onto the fixed option set.
///
/// Anything outside [`PAGE_SIZE_OPTIONS`] falls back to the default rather
/// than being honoured verbatim.
pub fn normalize_page_size(requested: Option<usize>) -> usize {
    match requested {
        Some(n) if PAGE_SIZE_OPTIONS.contains(&n) => n,
        _ => DEFAULT_ITEMS_PER_PAGE,
    }
}

/// Number of pages needed for `total` rows, floored at 1 so an empty
/// collection still renders as "page 1 of 1".
pub fn total_pages(total: usize, per_page: usize) -> usize {
    total.div_ceil(per_page.max(1)).max(1)
}

/// Clamps a 1-based page index into `[1, total_pages]`.
pub fn clamp_page(page: usize, total: usize, per_page: usize) -> usize {
    page.clamp(1, total_pages(total, per_page))
}

/// Windowed page-number strip: edge pages, a window around the current
/// page, `None` for the gaps in between.
fn page_window(
    last_page: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// One page of a collection, ready for the template layer.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    /// 1-based current page.
    pub page: usize,
    pub per_page: usize,
    /// Total rows across all pages.
    pub total: usize,
    pub total_pages: usize,
    /// Windowed page strip; `None` marks an ellipsis.
    pub pages: Vec<Option<usize>>,
    pub has_prev: bool,
    pub has_next: bool,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: usize, per_page: usize, total: usize) -> Self {
        let total_pages = total_pages(total, per_page);
        let page = page.clamp(1, total_pages);

        Self {
            items,
            page,
            per_page,
            total,
            total_pages,
            pages: page_window(total_pages, page, 2, 2, 4, 2),
            has_prev: page > 1,
            has_next: page < total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_floors_at_one() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(47, 10), 5);
    }

    #[test]
    fn clamp_page_bounds() {
        assert_eq!(clamp_page(0, 47, 10), 1);
        assert_eq!(clamp_page(3, 47, 10), 3);
        assert_eq!(clamp_page(9, 47, 10), 5);
        assert_eq!(clamp_page(7, 0, 10), 1);
    }

    #[test]
    fn normalize_page_size_rejects_off_menu_values() {
        assert_eq!(normalize_page_size(Some(30)), 30);
        assert_eq!(normalize_page_size(Some(7)), DEFAULT_ITEMS_PER_PAGE);
        assert_eq!(normalize_page_size(Some(0)), DEFAULT_ITEMS_PER_PAGE);
        assert_eq!(normalize_page_size(None), DEFAULT_ITEMS_PER_PAGE);
    }

    #[test]
    fn last_page_disables_next() {
        let paged: Paginated<u32> = Paginated::new(vec![1, 2, 3, 4, 5, 6, 7], 5, 10, 47);
        assert_eq!(paged.total_pages, 5);
        assert!(paged.has_prev);
        assert!(!paged.has_next);
    }

    #[test]
    fn empty_collection_still_renders_one_page() {
        let paged: Paginated<u32> = Paginated::new(vec![], 1, 20, 0);
        assert_eq!(paged.total_pages, 1);
        assert!(!paged.has_prev);
        assert!(!paged.has_next);
        assert_eq!(paged.pages, vec![Some(1)]);
    }

    #[test]
    fn page_window_collapses_middle() {
        let pages = page_window(20, 10, 2, 2, 4, 2);
        assert_eq!(pages.first(), Some(&Some(1)));
        assert_eq!(pages.last(), Some(&Some(20)));
        assert_eq!(pages.iter().filter(|p| p.is_none()).count(), 2);
        assert!(pages.contains(&Some(10)));
    }
}
