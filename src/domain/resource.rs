use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::listing::ListColumn;
use crate::domain::types::{
    CompanyId, EmailAddress, JobTitle, ResourceId, ResourceKind, ResourceName, SkillName,
};

/// Employee or contractor that can be allocated to projects.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Resource {
    pub id: ResourceId,
    pub company_id: CompanyId,
    pub name: ResourceName,
    pub email: EmailAddress,
    pub title: JobTitle,
    pub kind: ResourceKind,
    pub skills: Vec<SkillName>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewResource {
    pub company_id: CompanyId,
    pub name: ResourceName,
    pub email: EmailAddress,
    pub title: JobTitle,
    pub kind: ResourceKind,
    pub skills: Vec<SkillName>,
}

impl NewResource {
    #[must_use]
    pub fn new(
        company_id: CompanyId,
        name: ResourceName,
        email: EmailAddress,
        title: JobTitle,
        kind: ResourceKind,
        skills: Vec<SkillName>,
    ) -> Self {
        Self {
            company_id,
            name,
            email,
            title,
            kind,
            skills: dedup_skills(skills),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateResource {
    pub name: ResourceName,
    pub email: EmailAddress,
    pub title: JobTitle,
    pub kind: ResourceKind,
    pub skills: Vec<SkillName>,
}

impl UpdateResource {
    #[must_use]
    pub fn new(
        name: ResourceName,
        email: EmailAddress,
        title: JobTitle,
        kind: ResourceKind,
        skills: Vec<SkillName>,
    ) -> Self {
        Self {
            name,
            email,
            title,
            kind,
            skills: dedup_skills(skills),
        }
    }
}

/// Drops repeated skills, comparing case-insensitively and keeping the first spelling.
pub fn dedup_skills(skills: Vec<SkillName>) -> Vec<SkillName> {
    let mut seen = HashSet::new();
    skills
        .into_iter()
        .filter(|skill| seen.insert(skill.as_str().to_lowercase()))
        .collect()
}

/// Columns of the resources list view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceColumn {
    Name,
    Email,
    Title,
    CreatedAt,
}

impl ListColumn for ResourceColumn {
    const ALL: &'static [Self] = &[
        ResourceColumn::Name,
        ResourceColumn::Email,
        ResourceColumn::Title,
        ResourceColumn::CreatedAt,
    ];

    fn key(self) -> &'static str {
        match self {
            ResourceColumn::Name => "name",
            ResourceColumn::Email => "email",
            ResourceColumn::Title => "title",
            ResourceColumn::CreatedAt => "created_at",
        }
    }

    fn is_filterable(self) -> bool {
        !matches!(self, ResourceColumn::CreatedAt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skills_are_deduplicated_case_insensitively() {
        let skills = ["Rust", "SQL", "rust", "Kubernetes", "sql"]
            .into_iter()
            .map(|s| SkillName::new(s).unwrap())
            .collect();

        let names: Vec<String> = dedup_skills(skills)
            .into_iter()
            .map(SkillName::into_inner)
            .collect();

        assert_eq!(names, vec!["Rust", "SQL", "Kubernetes"]);
    }

    #[test]
    fn column_keys_resolve() {
        assert_eq!(
            ResourceColumn::from_key("title"),
            Some(ResourceColumn::Title)
        );
        assert_eq!(ResourceColumn::from_key("salary"), None);
        assert!(!ResourceColumn::CreatedAt.is_filterable());
    }
}
