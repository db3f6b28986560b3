//! Server-side rendering model for paginated list tables.
//!
//! [`render_table`] is a pure function of the loaded page, the normalized list
//! state and the column definitions. Every interactive element carries the
//! query string it navigates to, built with [`merge_query`].

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::listing::SortDirection;
use crate::pagination::{
    PER_PAGE_OPTIONS, PageResult, get_pages, normalize_page, normalize_per_page, total_pages,
};
use crate::query_string::{ListState, PAGE_PARAM, PER_PAGE_PARAM, SORT_PARAM, SortParam, merge_query};

pub mod columns;
pub mod fetch;

/// Definition of one table column.
pub struct Column<T> {
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
    pub render: fn(&T) -> String,
}

impl<T> Column<T> {
    pub fn new(key: &'static str, label: &'static str, render: fn(&T) -> String) -> Self {
        Self {
            key,
            label,
            sortable: false,
            render,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: &'static str,
    pub label: &'static str,
    /// Direction the column is currently sorted in.
    pub sort: Option<SortDirection>,
    /// Query string applied when the header is clicked.
    pub href: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TableRow {
    pub href: Option<String>,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PagerLink {
    pub page: usize,
    pub href: String,
    pub disabled: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageLink {
    pub page: usize,
    pub href: String,
    pub current: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Pager {
    pub page: usize,
    pub per_page: usize,
    /// Never below one so an empty table still reads "page 1 of 1".
    pub total_pages: usize,
    pub total_count: usize,
    pub first: PagerLink,
    pub prev: PagerLink,
    pub next: PagerLink,
    pub last: PagerLink,
    /// Windowed page numbers; `None` marks a gap.
    pub pages: Vec<Option<PageLink>>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PerPageOption {
    pub value: usize,
    pub href: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TableView {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<TableRow>,
    pub pager: Pager,
    pub per_page_options: Vec<PerPageOption>,
    /// Active filters, echoed into the filter inputs.
    pub filters: BTreeMap<String, String>,
    /// Active sort as `<field>.<direction>`, kept by the filter forms.
    pub sort: Option<String>,
    /// Query string of the rendered state.
    pub query: String,
}

/// Sort that results from clicking the header of `column`.
///
/// A column cycles unsorted → ascending → descending → unsorted. Clicking a
/// column other than the sorted one starts that column at ascending.
pub fn next_sort(current: Option<&SortParam>, column: &str) -> Option<SortParam> {
    match current {
        Some(sort) if sort.field == column => match sort.direction {
            SortDirection::Asc => Some(SortParam::new(column, SortDirection::Desc)),
            SortDirection::Desc => None,
        },
        _ => Some(SortParam::new(column, SortDirection::Asc)),
    }
}

fn page_href(query: &str, page: usize) -> String {
    merge_query(query, &[(PAGE_PARAM, Some(page.to_string()))])
}

fn pager_link(query: &str, page: usize, disabled: bool) -> PagerLink {
    PagerLink {
        page,
        href: page_href(query, page),
        disabled,
    }
}

fn build_pager(query: &str, page: usize, per_page: usize, total_count: usize) -> Pager {
    let last = total_pages(total_count, per_page).max(1);
    let at_start = page <= 1;
    let at_end = page >= last;

    let pages = get_pages(last, page, 2, 2, 4, 2)
        .into_iter()
        .map(|entry| {
            entry.map(|number| PageLink {
                page: number,
                href: page_href(query, number),
                current: number == page,
            })
        })
        .collect();

    Pager {
        page,
        per_page,
        total_pages: last,
        total_count,
        first: pager_link(query, 1, at_start),
        prev: pager_link(query, page.saturating_sub(1).clamp(1, last), at_start),
        next: pager_link(query, page.saturating_add(1).min(last), at_end),
        last: pager_link(query, last, at_end),
        pages,
    }
}

/// Builds the table view for one loaded page.
///
/// `state` is expected to be the normalized state returned by the list
/// service; missing `page`/`per_page` values fall back to their defaults.
pub fn render_table<T>(
    page: &PageResult<T>,
    state: &ListState,
    columns: &[Column<T>],
    row_href: Option<fn(&T) -> String>,
) -> TableView {
    let current_page = normalize_page(state.page);
    let per_page = normalize_per_page(state.per_page);
    let query = state.encode();

    let headers = columns
        .iter()
        .map(|column| {
            let sort = state
                .sort
                .as_ref()
                .filter(|sort| sort.field == column.key)
                .map(|sort| sort.direction);
            let href = column.sortable.then(|| {
                let next = next_sort(state.sort.as_ref(), column.key);
                merge_query(
                    &query,
                    &[
                        (SORT_PARAM, next.map(|sort| sort.to_string())),
                        (PAGE_PARAM, None),
                    ],
                )
            });
            HeaderCell {
                key: column.key,
                label: column.label,
                sort,
                href,
            }
        })
        .collect();

    let rows = page
        .records
        .iter()
        .map(|record| TableRow {
            href: row_href.map(|href| href(record)),
            cells: columns.iter().map(|column| (column.render)(record)).collect(),
        })
        .collect();

    let per_page_options = PER_PAGE_OPTIONS
        .iter()
        .map(|&value| PerPageOption {
            value,
            href: merge_query(
                &query,
                &[
                    (PER_PAGE_PARAM, Some(value.to_string())),
                    (PAGE_PARAM, None),
                ],
            ),
            selected: value == per_page,
        })
        .collect();

    TableView {
        headers,
        rows,
        pager: build_pager(&query, current_page, per_page, page.total_count),
        per_page_options,
        filters: state.filters.clone(),
        sort: state.sort.as_ref().map(ToString::to_string),
        query,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Row {
        id: usize,
        name: &'static str,
    }

    fn columns() -> Vec<Column<Row>> {
        vec![
            Column::new("name", "Name", |row: &Row| row.name.to_string()).sortable(),
            Column::new("id", "Id", |row: &Row| row.id.to_string()),
        ]
    }

    fn page_of(count: usize, total: usize) -> PageResult<Row> {
        PageResult::new(
            (0..count).map(|id| Row { id, name: "Row" }).collect(),
            total,
        )
    }

    fn state(page: usize, per_page: usize, sort: Option<&str>) -> ListState {
        ListState {
            page: Some(page),
            per_page: Some(per_page),
            sort: sort.and_then(|s| s.parse().ok()),
            filters: BTreeMap::new(),
        }
    }

    #[test]
    fn header_click_cycles_sort() {
        let first = next_sort(None, "name");
        assert_eq!(first.as_ref().map(ToString::to_string).as_deref(), Some("name.asc"));

        let second = next_sort(first.as_ref(), "name");
        assert_eq!(second.as_ref().map(ToString::to_string).as_deref(), Some("name.desc"));

        let third = next_sort(second.as_ref(), "name");
        assert_eq!(third, None);
    }

    #[test]
    fn clicking_another_column_replaces_the_sort() {
        let current = SortParam::new("name", SortDirection::Desc);
        assert_eq!(
            next_sort(Some(&current), "title"),
            Some(SortParam::new("title", SortDirection::Asc))
        );
    }

    #[test]
    fn header_links_carry_next_sort_and_reset_page() {
        let view = render_table(&page_of(10, 23), &state(2, 10, Some("name.asc")), &columns(), None);

        let name = &view.headers[0];
        assert_eq!(name.sort, Some(SortDirection::Asc));
        assert_eq!(name.href.as_deref(), Some("per_page=10&sort=name.desc"));

        let id = &view.headers[1];
        assert_eq!(id.sort, None);
        assert_eq!(id.href, None);

        let view = render_table(&page_of(10, 23), &state(1, 10, Some("name.desc")), &columns(), None);
        assert_eq!(view.headers[0].href.as_deref(), Some("per_page=10"));
    }

    #[test]
    fn active_sort_is_exposed_for_filter_forms() {
        let view = render_table(&page_of(10, 23), &state(2, 10, Some("name.desc")), &columns(), None);
        assert_eq!(view.sort.as_deref(), Some("name.desc"));

        let view = render_table(&page_of(10, 23), &state(2, 10, None), &columns(), None);
        assert_eq!(view.sort, None);
    }

    #[test]
    fn pager_at_last_page_of_23_records() {
        let view = render_table(&page_of(3, 23), &state(3, 10, None), &columns(), None);
        let pager = &view.pager;

        assert_eq!(pager.total_pages, 3);
        assert_eq!(pager.last.page, 3);
        assert!(pager.next.disabled);
        assert!(pager.last.disabled);
        assert!(!pager.prev.disabled);
        assert_eq!(pager.prev.page, 2);
        assert_eq!(pager.prev.href, "page=2&per_page=10");
        assert_eq!(view.rows.len(), 3);
    }

    #[test]
    fn pager_at_first_page_disables_back_controls() {
        let view = render_table(&page_of(10, 23), &state(1, 10, None), &columns(), None);
        let pager = &view.pager;

        assert!(pager.first.disabled);
        assert!(pager.prev.disabled);
        assert!(!pager.next.disabled);
        assert_eq!(pager.next.page, 2);
        assert_eq!(pager.last.page, 3);
        assert_eq!(
            pager
                .pages
                .iter()
                .map(|p| p.as_ref().map(|l| (l.page, l.current)))
                .collect::<Vec<_>>(),
            vec![Some((1, true)), Some((2, false)), Some((3, false))]
        );
    }

    #[test]
    fn pager_for_page_far_past_the_end() {
        let view = render_table(&page_of(0, 23), &state(usize::MAX, 10, None), &columns(), None);
        let pager = &view.pager;

        assert_eq!(pager.page, usize::MAX);
        assert!(pager.next.disabled && pager.last.disabled);
        assert_eq!(pager.next.page, 3);
        assert_eq!(pager.prev.page, 3);
        assert_eq!(pager.pages.len(), 3);
        assert!(pager.pages.iter().flatten().all(|link| !link.current));
    }

    #[test]
    fn empty_result_is_single_disabled_page() {
        let view = render_table(&page_of(0, 0), &state(1, 10, None), &columns(), None);
        let pager = &view.pager;

        assert_eq!(pager.total_pages, 1);
        assert!(pager.first.disabled && pager.prev.disabled);
        assert!(pager.next.disabled && pager.last.disabled);
        assert!(view.rows.is_empty());
    }

    #[test]
    fn per_page_links_reset_to_first_page() {
        let view = render_table(&page_of(10, 120), &state(5, 20, Some("name.asc")), &columns(), None);

        let forty = view
            .per_page_options
            .iter()
            .find(|option| option.value == 40)
            .unwrap();
        assert_eq!(forty.href, "per_page=40&sort=name.asc");
        assert!(!forty.selected);
        assert!(
            view.per_page_options
                .iter()
                .any(|option| option.value == 20 && option.selected)
        );
    }

    #[test]
    fn rows_render_cells_in_column_order() {
        let page = PageResult::new(
            vec![Row { id: 7, name: "Ada" }],
            1,
        );
        let view = render_table(
            &page,
            &state(1, 10, None),
            &columns(),
            Some(|row: &Row| format!("/rows/{}", row.id)),
        );

        assert_eq!(view.rows[0].cells, vec!["Ada".to_string(), "7".to_string()]);
        assert_eq!(view.rows[0].href.as_deref(), Some("/rows/7"));
    }
}
