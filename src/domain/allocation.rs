use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::project::DateSpan;
use crate::domain::resource::Resource;
use crate::domain::types::{AllocationId, AllocationPercent, CompanyId, ProjectId, ResourceId};

/// Booking of a resource's capacity on a project for a date span.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Allocation {
    pub id: AllocationId,
    pub company_id: CompanyId,
    pub resource_id: ResourceId,
    pub project_id: ProjectId,
    pub percent: AllocationPercent,
    pub span: DateSpan,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewAllocation {
    pub company_id: CompanyId,
    pub resource_id: ResourceId,
    pub project_id: ProjectId,
    pub percent: AllocationPercent,
    pub span: DateSpan,
}

/// Allocation joined with the resource it books.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct AllocationWithResource {
    pub allocation: Allocation,
    pub resource: Resource,
}
