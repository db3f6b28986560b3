use serde::Serialize;

use crate::pagination::{PageResult, normalize_page, normalize_per_page};
use crate::query_string::ListState;
use crate::table::{Column, TableView, render_table};

/// One loaded page of a list view together with the normalized state that
/// produced it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ListPage<T> {
    pub result: PageResult<T>,
    pub state: ListState,
}

impl<T> ListPage<T> {
    pub fn page(&self) -> usize {
        normalize_page(self.state.page)
    }

    pub fn per_page(&self) -> usize {
        normalize_per_page(self.state.per_page)
    }

    pub fn to_table(&self, columns: &[Column<T>], row_href: Option<fn(&T) -> String>) -> TableView {
        render_table(&self.result, &self.state, columns, row_href)
    }
}
