use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::listing::SortDirection;
use crate::domain::project::{NewProject, Project, ProjectColumn, UpdateProject};
use crate::domain::types::{CompanyId, ProjectId};
use crate::models::project::{
    NewProject as DbNewProject, Project as DbProject, UpdateProject as DbUpdateProject,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, ProjectListQuery, ProjectReader, ProjectWriter};

impl ProjectReader for DieselRepository {
    fn get_project_by_id(
        &self,
        id: ProjectId,
        company_id: CompanyId,
    ) -> RepositoryResult<Option<Project>> {
        use crate::schema::projects;

        let mut conn = self.conn()?;
        let project = projects::table
            .filter(projects::id.eq(id.get()))
            .filter(projects::company_id.eq(company_id.get()))
            .first::<DbProject>(&mut conn)
            .optional()?;

        Ok(project.map(Project::try_from).transpose()?)
    }

    fn list_projects(&self, query: &ProjectListQuery) -> RepositoryResult<(usize, Vec<Project>)> {
        use crate::schema::projects;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = projects::table
                .filter(projects::company_id.eq(query.company_id.get()))
                .into_boxed::<Sqlite>();

            for filter in &query.filters {
                items = match filter.column {
                    ProjectColumn::Name => prefix_filter!(items, projects::name, filter),
                    ProjectColumn::Status => prefix_filter!(items, projects::status, filter),
                    ProjectColumn::StartDate | ProjectColumn::CreatedAt => items,
                };
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        let direction = match &query.sort {
            Some(sort) => {
                items = match sort.column {
                    ProjectColumn::Name => then_order!(items, projects::name, sort.direction),
                    ProjectColumn::Status => then_order!(items, projects::status, sort.direction),
                    ProjectColumn::StartDate => {
                        then_order!(items, projects::start_date, sort.direction)
                    }
                    ProjectColumn::CreatedAt => {
                        then_order!(items, projects::created_at, sort.direction)
                    }
                };
                sort.direction
            }
            None => {
                items = items.then_order_by(projects::created_at.desc());
                SortDirection::Desc
            }
        };
        items = then_order!(items, projects::id, direction);

        if let Some(pagination) = &query.pagination {
            let Some(offset) = pagination.offset().filter(|offset| *offset < total as i64) else {
                return Ok((total, Vec::new()));
            };
            items = items.offset(offset).limit(pagination.per_page as i64);
        }

        let projects = items
            .load::<DbProject>(&mut conn)?
            .into_iter()
            .map(Project::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, projects))
    }
}

impl ProjectWriter for DieselRepository {
    fn create_project(&self, new_project: &NewProject) -> RepositoryResult<Project> {
        use crate::schema::projects;

        let mut conn = self.conn()?;
        let insertable: DbNewProject = new_project.into();

        let created = diesel::insert_into(projects::table)
            .values(&insertable)
            .get_result::<DbProject>(&mut conn)?;

        Ok(Project::try_from(created)?)
    }

    fn update_project(
        &self,
        id: ProjectId,
        company_id: CompanyId,
        updates: &UpdateProject,
    ) -> RepositoryResult<Project> {
        use crate::schema::projects;

        let mut conn = self.conn()?;
        let changeset = DbUpdateProject::new(updates, Utc::now().naive_utc());

        let updated = diesel::update(
            projects::table
                .filter(projects::id.eq(id.get()))
                .filter(projects::company_id.eq(company_id.get())),
        )
        .set(&changeset)
        .get_result::<DbProject>(&mut conn)?;

        Ok(Project::try_from(updated)?)
    }
}
