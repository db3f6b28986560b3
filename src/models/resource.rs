use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::resource::{
    NewResource as DomainNewResource, Resource as DomainResource,
    UpdateResource as DomainUpdateResource,
};
use crate::domain::types::{
    CompanyId, EmailAddress, JobTitle, ResourceId, ResourceName, SkillName, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::resources)]
/// Diesel model for [`crate::domain::resource::Resource`].
pub struct Resource {
    pub id: i32,
    pub company_id: i32,
    pub name: String,
    pub email: String,
    pub title: String,
    pub kind: String,
    /// JSON array of skill names.
    pub skills: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::resources)]
/// Insertable form of [`Resource`].
pub struct NewResource<'a> {
    pub company_id: i32,
    pub name: &'a str,
    pub email: &'a str,
    pub title: &'a str,
    pub kind: &'a str,
    pub skills: String,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::resources)]
/// Data used when updating a [`Resource`] record.
pub struct UpdateResource<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub title: &'a str,
    pub kind: &'a str,
    pub skills: String,
    pub updated_at: NaiveDateTime,
}

fn skills_to_json(skills: &[SkillName]) -> String {
    let names: Vec<&str> = skills.iter().map(SkillName::as_str).collect();
    serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
}

fn skills_from_json(raw: &str) -> Vec<SkillName> {
    serde_json::from_str::<Vec<String>>(raw)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|skill| SkillName::new(skill).ok())
        .collect()
}

impl TryFrom<Resource> for DomainResource {
    type Error = TypeConstraintError;

    fn try_from(resource: Resource) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ResourceId::new(resource.id)?,
            company_id: CompanyId::new(resource.company_id)?,
            name: ResourceName::new(resource.name)?,
            email: EmailAddress::new(resource.email)?,
            title: JobTitle::new(resource.title)?,
            kind: resource.kind.parse()?,
            skills: skills_from_json(&resource.skills),
            created_at: resource.created_at,
            updated_at: resource.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewResource> for NewResource<'a> {
    fn from(resource: &'a DomainNewResource) -> Self {
        Self {
            company_id: resource.company_id.get(),
            name: resource.name.as_str(),
            email: resource.email.as_str(),
            title: resource.title.as_str(),
            kind: resource.kind.as_str(),
            skills: skills_to_json(&resource.skills),
        }
    }
}

impl<'a> UpdateResource<'a> {
    pub fn new(resource: &'a DomainUpdateResource, updated_at: NaiveDateTime) -> Self {
        Self {
            name: resource.name.as_str(),
            email: resource.email.as_str(),
            title: resource.title.as_str(),
            kind: resource.kind.as_str(),
            skills: skills_to_json(&resource.skills),
            updated_at,
        }
    }
}
