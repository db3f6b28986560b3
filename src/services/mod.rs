//! Business workflows invoked by the HTTP routes.
//!
//! Services take a repository through the reader/writer traits, check the
//! caller's role and tenant, and return domain values or DTOs.

use crate::domain::audit::{AuditAction, NewAuditEntry};
use crate::domain::types::CompanyId;
use crate::models::auth::AuthenticatedUser;
use crate::repository::AuditWriter;
use crate::repository::errors::RepositoryResult;

pub mod api;
pub mod clients;
pub mod errors;
pub mod listing;
pub mod projects;
pub mod resources;

pub use errors::{ServiceError, ServiceResult};

/// Fails with [`ServiceError::Unauthorized`] unless `user` holds `role`.
pub fn ensure_role(user: &AuthenticatedUser, role: &str) -> ServiceResult<()> {
    if user.has_role(role) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Tenant of `user`; a token without a valid company is treated as unauthorized.
pub fn user_company(user: &AuthenticatedUser) -> ServiceResult<CompanyId> {
    user.company().map_err(|err| {
        log::warn!("User {} has no valid company: {err}", user.sub);
        ServiceError::Unauthorized
    })
}

/// Target of an audited write.
pub(crate) struct AuditTarget {
    pub company_id: CompanyId,
    pub action: AuditAction,
    pub entity: &'static str,
    pub entity_id: Option<i32>,
}

/// Records the outcome of a write in the audit log and converts the result.
///
/// Failing to write the audit entry is logged and otherwise ignored.
pub(crate) fn audited<R, T>(
    repo: &R,
    user: &AuthenticatedUser,
    target: AuditTarget,
    result: RepositoryResult<T>,
    id_of: impl Fn(&T) -> i32,
) -> ServiceResult<T>
where
    R: AuditWriter + ?Sized,
{
    let entry = match &result {
        Ok(value) => NewAuditEntry::success(
            target.company_id,
            &user.email,
            target.action,
            target.entity,
            id_of(value),
        ),
        Err(err) => NewAuditEntry::failure(
            target.company_id,
            &user.email,
            target.action,
            target.entity,
            target.entity_id,
            err.to_string(),
        ),
    };

    if let Err(err) = repo.create_audit_entry(&entry) {
        log::error!("Failed to write audit entry: {err}");
    }

    result.map_err(|err| {
        log::error!(
            "Failed to {} {}: {err}",
            target.action.as_str(),
            target.entity
        );
        ServiceError::from(err)
    })
}

#[cfg(all(test, feature = "test-mocks"))]
pub(crate) mod test_support {
    use crate::models::auth::AuthenticatedUser;
    use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

    pub fn admin_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "admin@example.com".to_string(),
            name: "Admin".to_string(),
            company_id: 42,
            roles: vec![
                SERVICE_ACCESS_ROLE.to_string(),
                SERVICE_ADMIN_ROLE.to_string(),
            ],
            exp: 0,
        }
    }

    pub fn viewer_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "2".to_string(),
            email: "viewer@example.com".to_string(),
            name: "Viewer".to_string(),
            company_id: 42,
            roles: vec![SERVICE_ACCESS_ROLE.to_string()],
            exp: 0,
        }
    }

    pub fn outsider_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "3".to_string(),
            email: "outsider@example.com".to_string(),
            name: "Outsider".to_string(),
            company_id: 42,
            roles: vec!["reporting".to_string()],
            exp: 0,
        }
    }
}
