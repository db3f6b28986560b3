use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::project::{
    DateSpan, NewProject as DomainNewProject, Project as DomainProject,
    UpdateProject as DomainUpdateProject,
};
use crate::domain::types::{
    ClientId, CompanyId, ProjectDescription, ProjectId, ProjectName, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::projects)]
/// Diesel model for [`crate::domain::project::Project`].
pub struct Project {
    pub id: i32,
    pub company_id: i32,
    pub client_id: i32,
    pub name: String,
    pub status: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::projects)]
pub struct NewProject<'a> {
    pub company_id: i32,
    pub client_id: i32,
    pub name: &'a str,
    pub status: &'a str,
    pub description: Option<&'a str>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::projects)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateProject<'a> {
    pub client_id: i32,
    pub name: &'a str,
    pub status: &'a str,
    pub description: Option<&'a str>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Project> for DomainProject {
    type Error = TypeConstraintError;

    fn try_from(project: Project) -> Result<Self, Self::Error> {
        let span = DateSpan::new(project.start_date, project.end_date)?;
        Ok(Self {
            id: ProjectId::new(project.id)?,
            company_id: CompanyId::new(project.company_id)?,
            client_id: ClientId::new(project.client_id)?,
            name: ProjectName::new(project.name)?,
            status: project.status.parse()?,
            description: project
                .description
                .and_then(|text| ProjectDescription::new(text).ok()),
            start_date: span.start,
            end_date: span.end,
            created_at: project.created_at,
            updated_at: project.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewProject> for NewProject<'a> {
    fn from(project: &'a DomainNewProject) -> Self {
        Self {
            company_id: project.company_id.get(),
            client_id: project.client_id.get(),
            name: project.name.as_str(),
            status: project.status.as_str(),
            description: project.description.as_ref().map(ProjectDescription::as_str),
            start_date: project.span.start,
            end_date: project.span.end,
        }
    }
}

impl<'a> UpdateProject<'a> {
    pub fn new(project: &'a DomainUpdateProject, updated_at: NaiveDateTime) -> Self {
        Self {
            client_id: project.client_id.get(),
            name: project.name.as_str(),
            status: project.status.as_str(),
            description: project.description.as_ref().map(ProjectDescription::as_str),
            start_date: project.span.start,
            end_date: project.span.end,
            updated_at,
        }
    }
}
