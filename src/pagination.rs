use serde::Serialize;

/// Page sizes offered by the list views.
pub const PER_PAGE_OPTIONS: [usize; 5] = [10, 20, 30, 40, 50];
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Returns `per_page` when it is one of [`PER_PAGE_OPTIONS`], the default otherwise.
pub fn normalize_per_page(per_page: Option<usize>) -> usize {
    per_page
        .filter(|value| PER_PAGE_OPTIONS.contains(value))
        .unwrap_or(DEFAULT_ITEMS_PER_PAGE)
}

/// Clamps a requested page to `1..`.
pub fn normalize_page(page: Option<usize>) -> usize {
    page.unwrap_or(1).max(1)
}

/// Number of pages needed for `total` items; zero when there are no items.
pub fn total_pages(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}

/// One contiguous slice of a sorted, filtered result set.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct PageResult<T> {
    pub records: Vec<T>,
    pub total_count: usize,
}

impl<T> PageResult<T> {
    pub fn new(records: Vec<T>, total_count: usize) -> Self {
        Self {
            records,
            total_count,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), 0)
    }
}

/// Page numbers to show in a pager, `None` marking a gap.
pub fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let current_page = current_page.clamp(1, last_page);
    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = current_page
        .saturating_add(right_current)
        .saturating_add(1)
        .min(last_page + 1);

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_page_outside_allowed_set_falls_back() {
        assert_eq!(normalize_per_page(Some(30)), 30);
        assert_eq!(normalize_per_page(Some(25)), DEFAULT_ITEMS_PER_PAGE);
        assert_eq!(normalize_per_page(Some(0)), DEFAULT_ITEMS_PER_PAGE);
        assert_eq!(normalize_per_page(None), DEFAULT_ITEMS_PER_PAGE);
    }

    #[test]
    fn page_is_clamped_to_one() {
        assert_eq!(normalize_page(None), 1);
        assert_eq!(normalize_page(Some(0)), 1);
        assert_eq!(normalize_page(Some(5)), 5);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(23, 10), 3);
        assert_eq!(total_pages(20, 10), 2);
        assert_eq!(total_pages(0, 10), 0);
    }

    #[test]
    fn pages_window_with_gaps() {
        assert_eq!(
            get_pages(20, 10, 2, 2, 4, 2),
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                Some(13),
                Some(14),
                None,
                Some(19),
                Some(20)
            ]
        );
        assert_eq!(get_pages(3, 1, 2, 2, 4, 2), vec![Some(1), Some(2), Some(3)]);
        assert!(get_pages(0, 1, 2, 2, 4, 2).is_empty());
    }

    #[test]
    fn pages_for_current_beyond_last() {
        assert_eq!(
            get_pages(3, usize::MAX, 2, 2, 4, 2),
            vec![Some(1), Some(2), Some(3)]
        );
        assert_eq!(
            get_pages(3, 9, 2, 2, 4, 2),
            vec![Some(1), Some(2), Some(3)]
        );
    }
}
