//! Services backing the resources list and its write flows.

use crate::domain::audit::AuditAction;
use crate::domain::resource::{Resource, ResourceColumn};
use crate::domain::types::ResourceId;
use crate::dto::listing::ListPage;
use crate::forms::resource::{ResourceForm, ResourcePayload};
use crate::models::auth::AuthenticatedUser;
use crate::query_string::ListState;
use crate::repository::{AuditWriter, ResourceReader, ResourceWriter};
use crate::services::listing::load_page;
use crate::services::{
    AuditTarget, ServiceError, ServiceResult, audited, ensure_role, user_company,
};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

const ENTITY: &str = "resource";

/// Loads one page of the company's resources.
pub fn list_resources<R>(
    repo: &R,
    user: &AuthenticatedUser,
    state: &ListState,
) -> ServiceResult<ListPage<Resource>>
where
    R: ResourceReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    let company_id = user_company(user)?;

    load_page::<ResourceColumn, _, _>(company_id, state, |query| repo.list_resources(query))
}

/// Validates the form and creates a resource in the user's company.
pub fn add_resource<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ResourceForm,
) -> ServiceResult<Resource>
where
    R: ResourceWriter + AuditWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    let company_id = user_company(user)?;

    let payload = ResourcePayload::try_from(form).map_err(|err| {
        log::warn!("Rejected resource form: {err}");
        err
    })?;
    let new_resource = payload.into_new(company_id);

    audited(
        repo,
        user,
        AuditTarget {
            company_id,
            action: AuditAction::Create,
            entity: ENTITY,
            entity_id: None,
        },
        repo.create_resource(&new_resource),
        |resource| resource.id.get(),
    )
}

/// Validates the form and updates a resource of the user's company.
pub fn update_resource<R>(
    repo: &R,
    user: &AuthenticatedUser,
    resource_id: i32,
    form: ResourceForm,
) -> ServiceResult<Resource>
where
    R: ResourceWriter + AuditWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    let company_id = user_company(user)?;
    let resource_id = ResourceId::new(resource_id).map_err(|_| ServiceError::NotFound)?;

    let payload = ResourcePayload::try_from(form).map_err(|err| {
        log::warn!("Rejected resource form: {err}");
        err
    })?;
    let updates = payload.into_update();

    audited(
        repo,
        user,
        AuditTarget {
            company_id,
            action: AuditAction::Update,
            entity: ENTITY,
            entity_id: Some(resource_id.get()),
        },
        repo.update_resource(resource_id, company_id, &updates),
        |resource| resource.id.get(),
    )
}
