//! Services backing the clients list and its write flows.

use crate::domain::audit::AuditAction;
use crate::domain::client::{Client, ClientColumn};
use crate::domain::types::ClientId;
use crate::dto::listing::ListPage;
use crate::forms::client::{ClientForm, ClientPayload};
use crate::models::auth::AuthenticatedUser;
use crate::query_string::ListState;
use crate::repository::{AuditWriter, ClientReader, ClientWriter};
use crate::services::listing::load_page;
use crate::services::{
    AuditTarget, ServiceError, ServiceResult, audited, ensure_role, user_company,
};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

const ENTITY: &str = "client";

pub fn list_clients<R>(
    repo: &R,
    user: &AuthenticatedUser,
    state: &ListState,
) -> ServiceResult<ListPage<Client>>
where
    R: ClientReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    let company_id = user_company(user)?;

    load_page::<ClientColumn, _, _>(company_id, state, |query| repo.list_clients(query))
}

pub fn add_client<R>(repo: &R, user: &AuthenticatedUser, form: ClientForm) -> ServiceResult<Client>
where
    R: ClientWriter + AuditWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    let company_id = user_company(user)?;

    let new_client = ClientPayload::try_from(form)?.into_new(company_id);

    audited(
        repo,
        user,
        AuditTarget {
            company_id,
            action: AuditAction::Create,
            entity: ENTITY,
            entity_id: None,
        },
        repo.create_client(&new_client),
        |client| client.id.get(),
    )
}

pub fn update_client<R>(
    repo: &R,
    user: &AuthenticatedUser,
    client_id: i32,
    form: ClientForm,
) -> ServiceResult<Client>
where
    R: ClientWriter + AuditWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;
    let company_id = user_company(user)?;
    let client_id = ClientId::new(client_id).map_err(|_| ServiceError::NotFound)?;

    let updates = ClientPayload::try_from(form)?.into_update();

    audited(
        repo,
        user,
        AuditTarget {
            company_id,
            action: AuditAction::Update,
            entity: ENTITY,
            entity_id: Some(client_id.get()),
        },
        repo.update_client(client_id, company_id, &updates),
        |client| client.id.get(),
    )
}
