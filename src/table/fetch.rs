//! Loading state of a list view.
//!
//! Every state change issues a new [`RequestToken`]. Only the response for the
//! most recent token is applied, so a slow response for an older state can
//! never overwrite a newer one.

use serde::Serialize;

use crate::pagination::PageResult;
use crate::query_string::ListState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    Idle,
    Loading,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

#[derive(Debug)]
pub struct ListViewState<T> {
    status: FetchStatus,
    latest: u64,
    state: ListState,
    page: Option<PageResult<T>>,
}

impl<T> ListViewState<T> {
    pub fn new(state: ListState) -> Self {
        Self {
            status: FetchStatus::Idle,
            latest: 0,
            state,
            page: None,
        }
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Last successfully loaded page. Kept while a newer request is loading
    /// or after it failed.
    pub fn page(&self) -> Option<&PageResult<T>> {
        self.page.as_ref()
    }

    /// Starts loading `state`, superseding any request still in flight.
    pub fn begin(&mut self, state: ListState) -> RequestToken {
        self.latest += 1;
        self.state = state;
        self.status = FetchStatus::Loading;
        RequestToken(self.latest)
    }

    /// Applies the outcome of the request identified by `token`.
    ///
    /// Returns `false` when the response is stale and was discarded.
    pub fn complete<E>(&mut self, token: RequestToken, result: Result<PageResult<T>, E>) -> bool {
        if token.0 != self.latest || self.status != FetchStatus::Loading {
            return false;
        }
        match result {
            Ok(page) => {
                self.page = Some(page);
                self.status = FetchStatus::Idle;
            }
            Err(_) => self.status = FetchStatus::Error,
        }
        true
    }
}
