use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::listing::ListColumn;
use crate::domain::types::{ClientId, ClientName, CompanyId, EmailAddress, NonEmptyString};

/// Customer organisation that commissions projects.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub company_id: CompanyId,
    pub name: ClientName,
    pub email: Option<EmailAddress>,
    pub industry: Option<NonEmptyString>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewClient {
    pub company_id: CompanyId,
    pub name: ClientName,
    pub email: Option<EmailAddress>,
    pub industry: Option<NonEmptyString>,
}

impl NewClient {
    #[must_use]
    pub fn new(
        company_id: CompanyId,
        name: ClientName,
        email: Option<EmailAddress>,
        industry: Option<NonEmptyString>,
    ) -> Self {
        Self {
            company_id,
            name,
            email,
            industry,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateClient {
    pub name: ClientName,
    pub email: Option<EmailAddress>,
    pub industry: Option<NonEmptyString>,
}

impl UpdateClient {
    #[must_use]
    pub fn new(
        name: ClientName,
        email: Option<EmailAddress>,
        industry: Option<NonEmptyString>,
    ) -> Self {
        Self {
            name,
            email,
            industry,
        }
    }
}

/// Columns of the clients list view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientColumn {
    Name,
    Industry,
    CreatedAt,
}

impl ListColumn for ClientColumn {
    const ALL: &'static [Self] = &[
        ClientColumn::Name,
        ClientColumn::Industry,
        ClientColumn::CreatedAt,
    ];

    fn key(self) -> &'static str {
        match self {
            ClientColumn::Name => "name",
            ClientColumn::Industry => "industry",
            ClientColumn::CreatedAt => "created_at",
        }
    }

    fn is_filterable(self) -> bool {
        !matches!(self, ClientColumn::CreatedAt)
    }
}
