//! Audit trail of write operations.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::CompanyId;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

impl AuditAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            AuditAction::Create => "create",
            AuditAction::Update => "update",
            AuditAction::Delete => "delete",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuditOutcome {
    Success,
    Failure,
}

impl AuditOutcome {
    pub const fn as_str(self) -> &'static str {
        match self {
            AuditOutcome::Success => "success",
            AuditOutcome::Failure => "failure",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuditEntry {
    pub id: i32,
    pub company_id: CompanyId,
    pub actor: String,
    pub action: String,
    pub entity: String,
    pub entity_id: Option<i32>,
    pub outcome: String,
    pub details: String,
    pub created_at: NaiveDateTime,
}

/// Audit record describing one attempted write.
#[derive(Clone, Debug, PartialEq)]
pub struct NewAuditEntry {
    pub company_id: CompanyId,
    pub actor: String,
    pub action: AuditAction,
    pub entity: &'static str,
    pub entity_id: Option<i32>,
    pub outcome: AuditOutcome,
    pub details: String,
}

impl NewAuditEntry {
    #[must_use]
    pub fn success(
        company_id: CompanyId,
        actor: impl Into<String>,
        action: AuditAction,
        entity: &'static str,
        entity_id: i32,
    ) -> Self {
        Self {
            company_id,
            actor: actor.into(),
            action,
            entity,
            entity_id: Some(entity_id),
            outcome: AuditOutcome::Success,
            details: String::new(),
        }
    }

    #[must_use]
    pub fn failure(
        company_id: CompanyId,
        actor: impl Into<String>,
        action: AuditAction,
        entity: &'static str,
        entity_id: Option<i32>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            company_id,
            actor: actor.into(),
            action,
            entity,
            entity_id,
            outcome: AuditOutcome::Failure,
            details: details.into(),
        }
    }
}
