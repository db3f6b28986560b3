use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::sqlite::SqliteConnection;

use crate::db::DbPool;
use crate::domain::{
    allocation::{Allocation, AllocationWithResource, NewAllocation},
    audit::{AuditEntry, NewAuditEntry},
    client::{Client, ClientColumn, NewClient, UpdateClient},
    listing::{ListColumn, SortDirection},
    project::{NewProject, Project, ProjectColumn, UpdateProject},
    resource::{NewResource, Resource, ResourceColumn, UpdateResource},
    types::{AllocationId, ClientId, CompanyId, ProjectId, ResourceId},
};
use crate::repository::errors::RepositoryResult;

/// Appends `$column` in `$direction` to the ordering of a boxed query.
macro_rules! then_order {
    ($query:expr, $column:expr, $direction:expr) => {
        match $direction {
            SortDirection::Asc => $query.then_order_by($column.asc()),
            SortDirection::Desc => $query.then_order_by($column.desc()),
        }
    };
}

/// Restricts a boxed query to rows whose `$column` starts with the filter prefix.
macro_rules! prefix_filter {
    ($query:expr, $column:expr, $filter:expr) => {{
        let (lower, upper) = $filter.range();
        let query = $query.filter($column.ge(lower));
        match upper {
            Some(upper) => query.filter($column.lt(upper)),
            None => query,
        }
    }};
}

pub mod allocation;
pub mod audit;
pub mod client;
pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod project;
pub mod resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Rows to skip; pages below one are treated as the first page.
    ///
    /// `None` when the offset does not fit into a SQL `OFFSET`; such a page
    /// lies past any stored result set.
    pub fn offset(&self) -> Option<i64> {
        (self.page.max(1) - 1)
            .checked_mul(self.per_page)
            .and_then(|offset| i64::try_from(offset).ok())
    }
}

/// Case-sensitive prefix match on one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter<C> {
    pub column: C,
    pub prefix: String,
}

impl<C> Filter<C> {
    /// Half-open range covering every value that starts with `prefix` under
    /// binary collation.
    ///
    /// The upper bound is the prefix with its last character incremented,
    /// after dropping trailing U+10FFFF characters. A prefix made only of
    /// U+10FFFF has no upper bound.
    pub fn range(&self) -> (String, Option<String>) {
        let mut upper = self.prefix.clone();
        while let Some(last) = upper.pop() {
            if let Some(next) = next_char(last) {
                upper.push(next);
                return (self.prefix.clone(), Some(upper));
            }
        }
        (self.prefix.clone(), None)
    }
}

fn next_char(c: char) -> Option<char> {
    match c {
        char::MAX => None,
        '\u{D7FF}' => Some('\u{E000}'),
        _ => char::from_u32(c as u32 + 1),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<C> {
    pub column: C,
    pub direction: SortDirection,
}

/// Tenant-scoped page request for one of the list views.
///
/// Without an explicit sort the repository orders by creation time
/// descending. Every ordering is completed with the primary key so pages are
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery<C> {
    pub company_id: CompanyId,
    pub filters: Vec<Filter<C>>,
    pub sort: Option<Sort<C>>,
    pub pagination: Option<Pagination>,
}

impl<C: ListColumn> ListQuery<C> {
    pub fn new(company_id: CompanyId) -> Self {
        Self {
            company_id,
            filters: Vec::new(),
            sort: None,
            pagination: None,
        }
    }

    /// Adds a prefix filter, replacing any previous filter on the same column.
    /// Empty prefixes and non-filterable columns are ignored.
    pub fn filter(mut self, column: C, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        if prefix.is_empty() || !column.is_filterable() {
            return self;
        }
        self.filters.retain(|existing| existing.column != column);
        self.filters.push(Filter { column, prefix });
        self
    }

    pub fn sort(mut self, column: C, direction: SortDirection) -> Self {
        if column.is_sortable() {
            self.sort = Some(Sort { column, direction });
        }
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub type ResourceListQuery = ListQuery<ResourceColumn>;
pub type ClientListQuery = ListQuery<ClientColumn>;
pub type ProjectListQuery = ListQuery<ProjectColumn>;

pub trait ResourceReader {
    fn get_resource_by_id(
        &self,
        id: ResourceId,
        company_id: CompanyId,
    ) -> RepositoryResult<Option<Resource>>;
    fn list_resources(&self, query: &ResourceListQuery) -> RepositoryResult<(usize, Vec<Resource>)>;
}

pub trait ResourceWriter {
    fn create_resource(&self, new_resource: &NewResource) -> RepositoryResult<Resource>;
    fn update_resource(
        &self,
        id: ResourceId,
        company_id: CompanyId,
        updates: &UpdateResource,
    ) -> RepositoryResult<Resource>;
}

pub trait ClientReader {
    fn get_client_by_id(&self, id: ClientId, company_id: CompanyId)
    -> RepositoryResult<Option<Client>>;
    fn list_clients(&self, query: &ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)>;
}

pub trait ClientWriter {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
    fn update_client(
        &self,
        id: ClientId,
        company_id: CompanyId,
        updates: &UpdateClient,
    ) -> RepositoryResult<Client>;
}

pub trait ProjectReader {
    fn get_project_by_id(
        &self,
        id: ProjectId,
        company_id: CompanyId,
    ) -> RepositoryResult<Option<Project>>;
    fn list_projects(&self, query: &ProjectListQuery) -> RepositoryResult<(usize, Vec<Project>)>;
}

pub trait ProjectWriter {
    fn create_project(&self, new_project: &NewProject) -> RepositoryResult<Project>;
    fn update_project(
        &self,
        id: ProjectId,
        company_id: CompanyId,
        updates: &UpdateProject,
    ) -> RepositoryResult<Project>;
}

pub trait AllocationReader {
    fn list_project_allocations(
        &self,
        project_id: ProjectId,
        company_id: CompanyId,
    ) -> RepositoryResult<Vec<AllocationWithResource>>;
}

pub trait AllocationWriter {
    fn create_allocation(&self, new_allocation: &NewAllocation) -> RepositoryResult<Allocation>;
    fn delete_allocation(&self, id: AllocationId, company_id: CompanyId) -> RepositoryResult<()>;
}

pub trait AuditReader {
    fn list_recent_audit_entries(
        &self,
        company_id: CompanyId,
        limit: usize,
    ) -> RepositoryResult<Vec<AuditEntry>>;
}

pub trait AuditWriter {
    fn create_audit_entry(&self, entry: &NewAuditEntry) -> RepositoryResult<()>;
}

/// Diesel-backed repository shared by every route.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<PooledConnection<ConnectionManager<SqliteConnection>>> {
        Ok(self.pool.get()?)
    }
}
