//! Services backing the projects list, the project page and allocations.

use std::collections::BTreeMap;

use crate::domain::audit::AuditAction;
use crate::domain::client::ClientColumn;
use crate::domain::listing::SortDirection;
use crate::domain::project::{Project, ProjectColumn};
use crate::domain::resource::ResourceColumn;
use crate::domain::types::{AllocationId, ClientId, CompanyId, ProjectId};
use crate::dto::listing::ListPage;
use crate::dto::projects::ProjectPageData;
use crate::forms::allocation::{AllocationForm, AllocationPayload};
use crate::forms::project::{ProjectForm, ProjectPayload};
use crate::models::auth::AuthenticatedUser;
use crate::query_string::ListState;
use crate::repository::{
    AllocationReader, AllocationWriter, AuditWriter, ClientListQuery, ClientReader,
    ProjectReader, ProjectWriter, ResourceListQuery, ResourceReader,
};
use crate::services::listing::load_page;
use crate::services::{
    AuditTarget, ServiceError, ServiceResult, audited, ensure_role, user_company,
};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

const ENTITY: &str = "project";
const ALLOCATION_ENTITY: &str = "allocation";

pub fn list_projects<R>(
    repo: &R,
    user: &AuthenticatedUser,
    state: &ListState,
) -> ServiceResult<ListPage<Project>>
where
    R: ProjectReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    let company_id = user_company(user)?;

    load_page::<ProjectColumn, _, _>(company_id, state, |query| repo.list_projects(query))
}

fn field_error(field: &str, message: &str) -> ServiceError {
    ServiceError::Validation(BTreeMap::from([(
        field.to_string(),
        vec![message.to_string()],
    )]))
}

fn ensure_client<R>(repo: &R, client_id: ClientId, company_id: CompanyId) -> ServiceResult<()>
where
    R: ClientReader + ?Sized,
{
    match repo.get_client_by_id(client_id, company_id)? {
        Some(_) => Ok(()),
        None => Err(field_error("client_id", "unknown client")),
    }
}

fn load_project<R>(repo: &R, project_id: i32, company_id: CompanyId) -> ServiceResult<Project>
where
    R: ProjectReader + ?Sized,
{
    let project_id = ProjectId::new(project_id).map_err(|_| ServiceError::NotFound)?;
    repo.get_project_by_id(project_id, company_id)?
        .ok_or(ServiceError::NotFound)
}

/// Loads a project with its client, allocations and the choices for the
/// edit and allocation forms.
pub fn show_project<R>(
    repo: &R,
    user: &AuthenticatedUser,
    project_id: i32,
) -> ServiceResult<ProjectPageData>
where
    R: ProjectReader + ClientReader + ResourceReader + AllocationReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    let company_id = user_company(user)?;

    let project = load_project(repo, project_id, company_id)?;
    let client = repo.get_client_by_id(project.client_id, company_id)?;
    let allocations = repo.list_project_allocations(project.id, company_id)?;
    let booked_percent = allocations
        .iter()
        .map(|entry| entry.allocation.percent.get())
        .sum();

    let (_, resources) = repo.list_resources(
        &ResourceListQuery::new(company_id).sort(ResourceColumn::Name, SortDirection::Asc),
    )?;
    let (_, clients) = repo.list_clients(
        &ClientListQuery::new(company_id).sort(ClientColumn::Name, SortDirection::Asc),
    )?;

    Ok(ProjectPageData {
        project,
        client,
        allocations,
        booked_percent,
        resources,
        clients,
    })
}

/// Creates a project for a client of the user's company.
pub fn add_project<R>(repo: &R, user: &AuthenticatedUser, form: ProjectForm) -> ServiceResult<Project>
where
    R: ClientReader + ProjectWriter + AuditWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    let company_id = user_company(user)?;

    let payload = ProjectPayload::try_from(form)?;
    ensure_client(repo, payload.client_id, company_id)?;
    let new_project = payload.into_new(company_id);

    audited(
        repo,
        user,
        AuditTarget {
            company_id,
            action: AuditAction::Create,
            entity: ENTITY,
            entity_id: None,
        },
        repo.create_project(&new_project),
        |project| project.id.get(),
    )
}

pub fn update_project<R>(
    repo: &R,
    user: &AuthenticatedUser,
    project_id: i32,
    form: ProjectForm,
) -> ServiceResult<Project>
where
    R: ClientReader + ProjectWriter + AuditWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    let company_id = user_company(user)?;
    let project_id = ProjectId::new(project_id).map_err(|_| ServiceError::NotFound)?;

    let payload = ProjectPayload::try_from(form)?;
    ensure_client(repo, payload.client_id, company_id)?;
    let updates = payload.into_update();

    audited(
        repo,
        user,
        AuditTarget {
            company_id,
            action: AuditAction::Update,
            entity: ENTITY,
            entity_id: Some(project_id.get()),
        },
        repo.update_project(project_id, company_id, &updates),
        |project| project.id.get(),
    )
}

/// Books a resource of the user's company onto one of its projects.
pub fn add_allocation<R>(
    repo: &R,
    user: &AuthenticatedUser,
    project_id: i32,
    form: AllocationForm,
) -> ServiceResult<()>
where
    R: ProjectReader + ResourceReader + AllocationWriter + AuditWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    let company_id = user_company(user)?;

    let payload = AllocationPayload::try_from(form)?;
    let project = load_project(repo, project_id, company_id)?;
    if repo
        .get_resource_by_id(payload.resource_id, company_id)?
        .is_none()
    {
        return Err(field_error("resource_id", "unknown resource"));
    }
    let new_allocation = payload.into_new(company_id, project.id);

    audited(
        repo,
        user,
        AuditTarget {
            company_id,
            action: AuditAction::Create,
            entity: ALLOCATION_ENTITY,
            entity_id: None,
        },
        repo.create_allocation(&new_allocation),
        |allocation| allocation.id.get(),
    )
    .map(|_| ())
}

/// Removes an allocation that belongs to the given project.
pub fn remove_allocation<R>(
    repo: &R,
    user: &AuthenticatedUser,
    project_id: i32,
    allocation_id: i32,
) -> ServiceResult<()>
where
    R: ProjectReader + AllocationReader + AllocationWriter + AuditWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    let company_id = user_company(user)?;

    let project = load_project(repo, project_id, company_id)?;
    let allocation_id = AllocationId::new(allocation_id).map_err(|_| ServiceError::NotFound)?;
    let belongs_to_project = repo
        .list_project_allocations(project.id, company_id)?
        .iter()
        .any(|entry| entry.allocation.id == allocation_id);
    if !belongs_to_project {
        return Err(ServiceError::NotFound);
    }

    audited(
        repo,
        user,
        AuditTarget {
            company_id,
            action: AuditAction::Delete,
            entity: ALLOCATION_ENTITY,
            entity_id: Some(allocation_id.get()),
        },
        repo.delete_allocation(allocation_id, company_id),
        |_| allocation_id.get(),
    )
}
