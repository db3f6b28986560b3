use serde::Deserialize;
use validator::Validate;

use crate::domain::resource::{NewResource, UpdateResource};
use crate::domain::types::{
    CompanyId, EmailAddress, JobTitle, ResourceKind, ResourceName, SkillName,
};
use crate::forms::FormError;

#[derive(Debug, Clone, Deserialize, Validate)]
/// Form data for adding or editing a resource.
pub struct ResourceForm {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub title: String,
    /// `employee` or `contractor`.
    pub kind: String,
    /// Comma or newline separated skill names.
    #[serde(default)]
    pub skills: String,
}

/// Validated resource fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourcePayload {
    pub name: ResourceName,
    pub email: EmailAddress,
    pub title: JobTitle,
    pub kind: ResourceKind,
    pub skills: Vec<SkillName>,
}

impl ResourcePayload {
    pub fn into_new(self, company_id: CompanyId) -> NewResource {
        NewResource::new(
            company_id,
            self.name,
            self.email,
            self.title,
            self.kind,
            self.skills,
        )
    }

    pub fn into_update(self) -> UpdateResource {
        UpdateResource::new(self.name, self.email, self.title, self.kind, self.skills)
    }
}

fn parse_skills(raw: &str) -> Result<Vec<SkillName>, FormError> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(|skill| SkillName::new(skill).map_err(|err| FormError::field("skills", err)))
        .collect()
}

impl TryFrom<ResourceForm> for ResourcePayload {
    type Error = FormError;

    fn try_from(form: ResourceForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            name: ResourceName::new(form.name).map_err(|err| FormError::field("name", err))?,
            email: EmailAddress::new(form.email).map_err(|err| FormError::field("email", err))?,
            title: JobTitle::new(form.title).map_err(|err| FormError::field("title", err))?,
            kind: form
                .kind
                .parse()
                .map_err(|err| FormError::field("kind", err))?,
            skills: parse_skills(&form.skills)?,
        })
    }
}
