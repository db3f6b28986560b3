use diesel::prelude::*;

use crate::domain::allocation::{Allocation, AllocationWithResource, NewAllocation};
use crate::domain::resource::Resource;
use crate::domain::types::{AllocationId, CompanyId, ProjectId};
use crate::models::allocation::{Allocation as DbAllocation, NewAllocation as DbNewAllocation};
use crate::models::resource::Resource as DbResource;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{AllocationReader, AllocationWriter, DieselRepository};

impl AllocationReader for DieselRepository {
    fn list_project_allocations(
        &self,
        project_id: ProjectId,
        company_id: CompanyId,
    ) -> RepositoryResult<Vec<AllocationWithResource>> {
        use crate::schema::{allocations, resources};

        let mut conn = self.conn()?;

        let rows = allocations::table
            .inner_join(resources::table)
            .filter(allocations::project_id.eq(project_id.get()))
            .filter(allocations::company_id.eq(company_id.get()))
            .filter(resources::company_id.eq(company_id.get()))
            .order((allocations::start_date.asc(), allocations::id.asc()))
            .select((DbAllocation::as_select(), DbResource::as_select()))
            .load::<(DbAllocation, DbResource)>(&mut conn)?;

        rows.into_iter()
            .map(|(allocation, resource)| -> RepositoryResult<AllocationWithResource> {
                Ok(AllocationWithResource {
                    allocation: Allocation::try_from(allocation)?,
                    resource: Resource::try_from(resource)?,
                })
            })
            .collect()
    }
}

impl AllocationWriter for DieselRepository {
    fn create_allocation(&self, new_allocation: &NewAllocation) -> RepositoryResult<Allocation> {
        use crate::schema::allocations;

        let mut conn = self.conn()?;
        let insertable: DbNewAllocation = new_allocation.into();

        let created = diesel::insert_into(allocations::table)
            .values(&insertable)
            .get_result::<DbAllocation>(&mut conn)?;

        Ok(Allocation::try_from(created)?)
    }

    fn delete_allocation(&self, id: AllocationId, company_id: CompanyId) -> RepositoryResult<()> {
        use crate::schema::allocations;

        let mut conn = self.conn()?;

        let deleted = diesel::delete(
            allocations::table
                .filter(allocations::id.eq(id.get()))
                .filter(allocations::company_id.eq(company_id.get())),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
