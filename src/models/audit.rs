use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::audit::{AuditEntry as DomainAuditEntry, NewAuditEntry as DomainNewAuditEntry};
use crate::domain::types::{CompanyId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::audit_log)]
pub struct AuditEntry {
    pub id: i32,
    pub company_id: i32,
    pub actor: String,
    pub action: String,
    pub entity: String,
    pub entity_id: Option<i32>,
    pub outcome: String,
    pub details: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::audit_log)]
pub struct NewAuditEntry<'a> {
    pub company_id: i32,
    pub actor: &'a str,
    pub action: &'a str,
    pub entity: &'a str,
    pub entity_id: Option<i32>,
    pub outcome: &'a str,
    pub details: &'a str,
}

impl TryFrom<AuditEntry> for DomainAuditEntry {
    type Error = TypeConstraintError;

    fn try_from(entry: AuditEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entry.id,
            company_id: CompanyId::new(entry.company_id)?,
            actor: entry.actor,
            action: entry.action,
            entity: entry.entity,
            entity_id: entry.entity_id,
            outcome: entry.outcome,
            details: entry.details,
            created_at: entry.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewAuditEntry> for NewAuditEntry<'a> {
    fn from(entry: &'a DomainNewAuditEntry) -> Self {
        Self {
            company_id: entry.company_id.get(),
            actor: entry.actor.as_str(),
            action: entry.action.as_str(),
            entity: entry.entity,
            entity_id: entry.entity_id,
            outcome: entry.outcome.as_str(),
            details: entry.details.as_str(),
        }
    }
}
