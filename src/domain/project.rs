use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::listing::ListColumn;
use crate::domain::types::{
    ClientId, CompanyId, ProjectDescription, ProjectId, ProjectName, ProjectStatus,
    TypeConstraintError,
};

/// Engagement delivered for a client.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: ProjectId,
    pub company_id: CompanyId,
    pub client_id: ClientId,
    pub name: ProjectName,
    pub status: ProjectStatus,
    pub description: Option<ProjectDescription>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Inclusive date span with an optional open end.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl DateSpan {
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> Result<Self, TypeConstraintError> {
        match end {
            Some(end) if end < start => Err(TypeConstraintError::InvalidDateRange),
            _ => Ok(Self { start, end }),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewProject {
    pub company_id: CompanyId,
    pub client_id: ClientId,
    pub name: ProjectName,
    pub status: ProjectStatus,
    pub description: Option<ProjectDescription>,
    pub span: DateSpan,
}

impl NewProject {
    #[must_use]
    pub fn new(
        company_id: CompanyId,
        client_id: ClientId,
        name: ProjectName,
        status: ProjectStatus,
        description: Option<ProjectDescription>,
        span: DateSpan,
    ) -> Self {
        Self {
            company_id,
            client_id,
            name,
            status,
            description,
            span,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateProject {
    pub client_id: ClientId,
    pub name: ProjectName,
    pub status: ProjectStatus,
    pub description: Option<ProjectDescription>,
    pub span: DateSpan,
}

/// Columns of the projects list view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectColumn {
    Name,
    Status,
    StartDate,
    CreatedAt,
}

impl ListColumn for ProjectColumn {
    const ALL: &'static [Self] = &[
        ProjectColumn::Name,
        ProjectColumn::Status,
        ProjectColumn::StartDate,
        ProjectColumn::CreatedAt,
    ];

    fn key(self) -> &'static str {
        match self {
            ProjectColumn::Name => "name",
            ProjectColumn::Status => "status",
            ProjectColumn::StartDate => "start_date",
            ProjectColumn::CreatedAt => "created_at",
        }
    }

    fn is_filterable(self) -> bool {
        matches!(self, ProjectColumn::Name | ProjectColumn::Status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn date_span_rejects_end_before_start() {
        assert!(DateSpan::new(date(2025, 1, 1), None).is_ok());
        assert!(DateSpan::new(date(2025, 1, 1), Some(date(2025, 1, 1))).is_ok());
        assert_eq!(
            DateSpan::new(date(2025, 2, 1), Some(date(2025, 1, 31))),
            Err(TypeConstraintError::InvalidDateRange)
        );
    }
}
