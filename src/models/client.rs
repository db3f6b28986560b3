use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::client::{
    Client as DomainClient, NewClient as DomainNewClient, UpdateClient as DomainUpdateClient,
};
use crate::domain::types::{
    ClientId, ClientName, CompanyId, EmailAddress, NonEmptyString, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::clients)]
/// Diesel model for [`crate::domain::client::Client`].
pub struct Client {
    pub id: i32,
    pub company_id: i32,
    pub name: String,
    pub email: Option<String>,
    /// Empty string when the industry is unknown.
    pub industry: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
/// Insertable form of [`Client`].
pub struct NewClient<'a> {
    pub company_id: i32,
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub industry: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating a [`Client`] record.
pub struct UpdateClient<'a> {
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub industry: &'a str,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Client> for DomainClient {
    type Error = TypeConstraintError;

    fn try_from(client: Client) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ClientId::new(client.id)?,
            company_id: CompanyId::new(client.company_id)?,
            name: ClientName::new(client.name)?,
            email: client.email.map(EmailAddress::new).transpose()?,
            industry: NonEmptyString::new(client.industry).ok(),
            created_at: client.created_at,
            updated_at: client.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewClient> for NewClient<'a> {
    fn from(client: &'a DomainNewClient) -> Self {
        Self {
            company_id: client.company_id.get(),
            name: client.name.as_str(),
            email: client.email.as_ref().map(EmailAddress::as_str),
            industry: client
                .industry
                .as_ref()
                .map(NonEmptyString::as_str)
                .unwrap_or_default(),
        }
    }
}

impl<'a> UpdateClient<'a> {
    pub fn new(client: &'a DomainUpdateClient, updated_at: NaiveDateTime) -> Self {
        Self {
            name: client.name.as_str(),
            email: client.email.as_ref().map(EmailAddress::as_str),
            industry: client
                .industry
                .as_ref()
                .map(NonEmptyString::as_str)
                .unwrap_or_default(),
            updated_at,
        }
    }
}
