use diesel::prelude::*;

use crate::domain::audit::{AuditEntry, NewAuditEntry};
use crate::domain::types::CompanyId;
use crate::models::audit::{AuditEntry as DbAuditEntry, NewAuditEntry as DbNewAuditEntry};
use crate::repository::errors::RepositoryResult;
use crate::repository::{AuditReader, AuditWriter, DieselRepository};

impl AuditWriter for DieselRepository {
    fn create_audit_entry(&self, entry: &NewAuditEntry) -> RepositoryResult<()> {
        use crate::schema::audit_log;

        let mut conn = self.conn()?;
        let insertable: DbNewAuditEntry = entry.into();

        diesel::insert_into(audit_log::table)
            .values(&insertable)
            .execute(&mut conn)?;

        Ok(())
    }
}

impl AuditReader for DieselRepository {
    fn list_recent_audit_entries(
        &self,
        company_id: CompanyId,
        limit: usize,
    ) -> RepositoryResult<Vec<AuditEntry>> {
        use crate::schema::audit_log;

        let mut conn = self.conn()?;

        let entries = audit_log::table
            .filter(audit_log::company_id.eq(company_id.get()))
            .order((audit_log::created_at.desc(), audit_log::id.desc()))
            .limit(limit as i64)
            .load::<DbAuditEntry>(&mut conn)?
            .into_iter()
            .map(AuditEntry::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }
}
