//! Column sets for the staffing list views.

use crate::domain::client::Client;
use crate::domain::project::Project;
use crate::domain::resource::Resource;
use crate::table::Column;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn resource_columns() -> Vec<Column<Resource>> {
    vec![
        Column::new("name", "Name", |r: &Resource| r.name.to_string()).sortable(),
        Column::new("email", "Email", |r: &Resource| r.email.to_string()).sortable(),
        Column::new("title", "Title", |r: &Resource| r.title.to_string()).sortable(),
        Column::new("kind", "Kind", |r: &Resource| r.kind.to_string()),
        Column::new("skills", "Skills", |r: &Resource| {
            r.skills
                .iter()
                .map(|skill| skill.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        }),
        Column::new("created_at", "Added", |r: &Resource| {
            r.created_at.format(DATE_FORMAT).to_string()
        })
        .sortable(),
    ]
}

pub fn client_columns() -> Vec<Column<Client>> {
    vec![
        Column::new("name", "Name", |c: &Client| c.name.to_string()).sortable(),
        Column::new("email", "Email", |c: &Client| {
            c.email.as_ref().map(ToString::to_string).unwrap_or_default()
        }),
        Column::new("industry", "Industry", |c: &Client| {
            c.industry.as_ref().map(ToString::to_string).unwrap_or_default()
        })
        .sortable(),
        Column::new("created_at", "Added", |c: &Client| {
            c.created_at.format(DATE_FORMAT).to_string()
        })
        .sortable(),
    ]
}

pub fn project_columns() -> Vec<Column<Project>> {
    vec![
        Column::new("name", "Name", |p: &Project| p.name.to_string()).sortable(),
        Column::new("status", "Status", |p: &Project| p.status.to_string()).sortable(),
        Column::new("start_date", "Start", |p: &Project| {
            p.start_date.format(DATE_FORMAT).to_string()
        })
        .sortable(),
        Column::new("end_date", "End", |p: &Project| {
            p.end_date
                .map(|date| date.format(DATE_FORMAT).to_string())
                .unwrap_or_default()
        }),
        Column::new("created_at", "Added", |p: &Project| {
            p.created_at.format(DATE_FORMAT).to_string()
        })
        .sortable(),
    ]
}

pub fn project_href(project: &Project) -> String {
    format!("/projects/{}", project.id)
}
