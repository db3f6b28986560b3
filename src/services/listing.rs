//! Normalization of list requests and the read side of the list views.

use std::collections::BTreeMap;

use crate::domain::listing::ListColumn;
use crate::domain::types::CompanyId;
use crate::dto::listing::ListPage;
use crate::pagination::{PageResult, normalize_page, normalize_per_page};
use crate::query_string::ListState;
use crate::repository::ListQuery;
use crate::repository::errors::RepositoryResult;
use crate::services::{ServiceError, ServiceResult};

/// Turns a decoded [`ListState`] into a tenant-scoped [`ListQuery`].
///
/// Returns the query and the state it actually represents: page clamped,
/// per-page normalized, and unknown or empty filters and unsortable fields
/// dropped. Links rendered from the returned state never carry ignored keys.
pub fn build_list_query<C: ListColumn>(
    company_id: CompanyId,
    state: &ListState,
) -> (ListQuery<C>, ListState) {
    let page = normalize_page(state.page);
    let per_page = normalize_per_page(state.per_page);

    let mut query = ListQuery::new(company_id).paginate(page, per_page);
    let mut filters = BTreeMap::new();

    for (key, value) in &state.filters {
        let Some(column) = C::from_key(key).filter(|column| column.is_filterable()) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        query = query.filter(column, value.clone());
        filters.insert(key.clone(), value.clone());
    }

    let mut sort = None;
    if let Some(requested) = &state.sort {
        if let Some(column) = C::from_key(&requested.field).filter(|column| column.is_sortable()) {
            query = query.sort(column, requested.direction);
            sort = Some(requested.clone());
        }
    }

    let normalized = ListState {
        page: Some(page),
        per_page: Some(per_page),
        sort,
        filters,
    };

    (query, normalized)
}

/// Runs `fetch` for the normalized `state`.
///
/// Any backing-store error is logged and reported as
/// [`ServiceError::Internal`]; no partial page is returned.
pub fn load_page<C, T, F>(
    company_id: CompanyId,
    state: &ListState,
    fetch: F,
) -> ServiceResult<ListPage<T>>
where
    C: ListColumn,
    F: FnOnce(&ListQuery<C>) -> RepositoryResult<(usize, Vec<T>)>,
{
    let (query, state) = build_list_query::<C>(company_id, state);

    let (total, records) = fetch(&query).map_err(|err| {
        log::error!("Failed to load list page: {err}");
        ServiceError::Internal
    })?;

    Ok(ListPage {
        result: PageResult::new(records, total),
        state,
    })
}
