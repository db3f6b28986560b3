use serde::Deserialize;
use validator::Validate;

use crate::domain::project::{DateSpan, NewProject, UpdateProject};
use crate::domain::types::{
    ClientId, CompanyId, ProjectDescription, ProjectName, ProjectStatus,
};
use crate::forms::{FormError, parse_date, parse_optional_date};

#[derive(Debug, Clone, Deserialize, Validate)]
/// Form data for adding or editing a project.
pub struct ProjectForm {
    pub client_id: i32,
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    pub status: String,
    #[serde(default)]
    #[validate(length(max = 4000))]
    pub description: String,
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectPayload {
    pub client_id: ClientId,
    pub name: ProjectName,
    pub status: ProjectStatus,
    pub description: Option<ProjectDescription>,
    pub span: DateSpan,
}

impl ProjectPayload {
    pub fn into_new(self, company_id: CompanyId) -> NewProject {
        NewProject::new(
            company_id,
            self.client_id,
            self.name,
            self.status,
            self.description,
            self.span,
        )
    }

    pub fn into_update(self) -> UpdateProject {
        UpdateProject {
            client_id: self.client_id,
            name: self.name,
            status: self.status,
            description: self.description,
            span: self.span,
        }
    }
}

impl TryFrom<ProjectForm> for ProjectPayload {
    type Error = FormError;

    fn try_from(form: ProjectForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let start = parse_date("start_date", &form.start_date)?;
        let end = parse_optional_date("end_date", &form.end_date)?;

        Ok(Self {
            client_id: ClientId::new(form.client_id)
                .map_err(|err| FormError::field("client_id", err))?,
            name: ProjectName::new(form.name).map_err(|err| FormError::field("name", err))?,
            status: form
                .status
                .parse()
                .map_err(|err| FormError::field("status", err))?,
            description: ProjectDescription::new(form.description).ok(),
            span: DateSpan::new(start, end).map_err(|err| FormError::field("end_date", err))?,
        })
    }
}
