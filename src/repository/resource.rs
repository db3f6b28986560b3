use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::listing::SortDirection;
use crate::domain::resource::{NewResource, Resource, ResourceColumn, UpdateResource};
use crate::domain::types::{CompanyId, ResourceId};
use crate::models::resource::{
    NewResource as DbNewResource, Resource as DbResource, UpdateResource as DbUpdateResource,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, ResourceListQuery, ResourceReader, ResourceWriter};

impl ResourceReader for DieselRepository {
    fn get_resource_by_id(
        &self,
        id: ResourceId,
        company_id: CompanyId,
    ) -> RepositoryResult<Option<Resource>> {
        use crate::schema::resources;

        let mut conn = self.conn()?;
        let resource = resources::table
            .filter(resources::id.eq(id.get()))
            .filter(resources::company_id.eq(company_id.get()))
            .first::<DbResource>(&mut conn)
            .optional()?;

        Ok(resource.map(Resource::try_from).transpose()?)
    }

    fn list_resources(&self, query: &ResourceListQuery) -> RepositoryResult<(usize, Vec<Resource>)> {
        use crate::schema::resources;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = resources::table
                .filter(resources::company_id.eq(query.company_id.get()))
                .into_boxed::<Sqlite>();

            for filter in &query.filters {
                items = match filter.column {
                    ResourceColumn::Name => prefix_filter!(items, resources::name, filter),
                    ResourceColumn::Email => prefix_filter!(items, resources::email, filter),
                    ResourceColumn::Title => prefix_filter!(items, resources::title, filter),
                    ResourceColumn::CreatedAt => items,
                };
            }
            items
        };

        // Count the filtered set before pagination is applied.
        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        let direction = match &query.sort {
            Some(sort) => {
                items = match sort.column {
                    ResourceColumn::Name => then_order!(items, resources::name, sort.direction),
                    ResourceColumn::Email => then_order!(items, resources::email, sort.direction),
                    ResourceColumn::Title => then_order!(items, resources::title, sort.direction),
                    ResourceColumn::CreatedAt => {
                        then_order!(items, resources::created_at, sort.direction)
                    }
                };
                sort.direction
            }
            None => {
                items = items.then_order_by(resources::created_at.desc());
                SortDirection::Desc
            }
        };
        items = then_order!(items, resources::id, direction);

        if let Some(pagination) = &query.pagination {
            let Some(offset) = pagination.offset().filter(|offset| *offset < total as i64) else {
                return Ok((total, Vec::new()));
            };
            items = items.offset(offset).limit(pagination.per_page as i64);
        }

        let resources = items
            .load::<DbResource>(&mut conn)?
            .into_iter()
            .map(Resource::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, resources))
    }
}

impl ResourceWriter for DieselRepository {
    fn create_resource(&self, new_resource: &NewResource) -> RepositoryResult<Resource> {
        use crate::schema::resources;

        let mut conn = self.conn()?;
        let insertable: DbNewResource = new_resource.into();

        let created = diesel::insert_into(resources::table)
            .values(&insertable)
            .get_result::<DbResource>(&mut conn)?;

        Ok(Resource::try_from(created)?)
    }

    fn update_resource(
        &self,
        id: ResourceId,
        company_id: CompanyId,
        updates: &UpdateResource,
    ) -> RepositoryResult<Resource> {
        use crate::schema::resources;

        let mut conn = self.conn()?;
        let changeset = DbUpdateResource::new(updates, Utc::now().naive_utc());

        let updated = diesel::update(
            resources::table
                .filter(resources::id.eq(id.get()))
                .filter(resources::company_id.eq(company_id.get())),
        )
        .set(&changeset)
        .get_result::<DbResource>(&mut conn)?;

        Ok(Resource::try_from(updated)?)
    }
}
