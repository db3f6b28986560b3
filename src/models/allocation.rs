use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::allocation::{
    Allocation as DomainAllocation, NewAllocation as DomainNewAllocation,
};
use crate::domain::project::DateSpan;
use crate::domain::types::{
    AllocationId, AllocationPercent, CompanyId, ProjectId, ResourceId, TypeConstraintError,
};
use crate::models::project::Project;
use crate::models::resource::Resource;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Resource, foreign_key = resource_id))]
#[diesel(belongs_to(Project, foreign_key = project_id))]
#[diesel(table_name = crate::schema::allocations)]
pub struct Allocation {
    pub id: i32,
    pub company_id: i32,
    pub resource_id: i32,
    pub project_id: i32,
    pub percent: i32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::allocations)]
pub struct NewAllocation {
    pub company_id: i32,
    pub resource_id: i32,
    pub project_id: i32,
    pub percent: i32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl TryFrom<Allocation> for DomainAllocation {
    type Error = TypeConstraintError;

    fn try_from(allocation: Allocation) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AllocationId::new(allocation.id)?,
            company_id: CompanyId::new(allocation.company_id)?,
            resource_id: ResourceId::new(allocation.resource_id)?,
            project_id: ProjectId::new(allocation.project_id)?,
            percent: AllocationPercent::new(allocation.percent)?,
            span: DateSpan::new(allocation.start_date, allocation.end_date)?,
            created_at: allocation.created_at,
            updated_at: allocation.updated_at,
        })
    }
}

impl From<&DomainNewAllocation> for NewAllocation {
    fn from(allocation: &DomainNewAllocation) -> Self {
        Self {
            company_id: allocation.company_id.get(),
            resource_id: allocation.resource_id.get(),
            project_id: allocation.project_id.get(),
            percent: allocation.percent.get(),
            start_date: allocation.span.start,
            end_date: allocation.span.end,
        }
    }
}
