use serde::Deserialize;
use validator::Validate;

use crate::domain::allocation::NewAllocation;
use crate::domain::project::DateSpan;
use crate::domain::types::{AllocationPercent, CompanyId, ProjectId, ResourceId};
use crate::forms::{FormError, parse_date, parse_optional_date};

#[derive(Debug, Clone, Deserialize, Validate)]
/// Form data for booking a resource onto a project.
pub struct AllocationForm {
    pub resource_id: i32,
    #[validate(range(min = 1, max = 100))]
    pub percent: i32,
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AllocationPayload {
    pub resource_id: ResourceId,
    pub percent: AllocationPercent,
    pub span: DateSpan,
}

impl AllocationPayload {
    pub fn into_new(self, company_id: CompanyId, project_id: ProjectId) -> NewAllocation {
        NewAllocation {
            company_id,
            resource_id: self.resource_id,
            project_id,
            percent: self.percent,
            span: self.span,
        }
    }
}

impl TryFrom<AllocationForm> for AllocationPayload {
    type Error = FormError;

    fn try_from(form: AllocationForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let start = parse_date("start_date", &form.start_date)?;
        let end = parse_optional_date("end_date", &form.end_date)?;

        Ok(Self {
            resource_id: ResourceId::new(form.resource_id)
                .map_err(|err| FormError::field("resource_id", err))?,
            percent: AllocationPercent::new(form.percent)
                .map_err(|err| FormError::field("percent", err))?,
            span: DateSpan::new(start, end).map_err(|err| FormError::field("end_date", err))?,
        })
    }
}
