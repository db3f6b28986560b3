//! DTOs exposed by the JSON API endpoints.

use serde::Serialize;

use crate::dto::listing::ListPage;

/// Body of the `/api/v1/*` list endpoints.
#[derive(Debug, Serialize, PartialEq)]
pub struct ListResponse<T> {
    pub records: Vec<T>,
    pub total_count: usize,
    pub page: usize,
    pub per_page: usize,
}

impl<T> From<ListPage<T>> for ListResponse<T> {
    fn from(list: ListPage<T>) -> Self {
        let page = list.page();
        let per_page = list.per_page();
        Self {
            records: list.result.records,
            total_count: list.result.total_count,
            page,
            per_page,
        }
    }
}
