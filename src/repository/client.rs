use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::client::{Client, ClientColumn, NewClient, UpdateClient};
use crate::domain::listing::SortDirection;
use crate::domain::types::{ClientId, CompanyId};
use crate::models::client::{
    Client as DbClient, NewClient as DbNewClient, UpdateClient as DbUpdateClient,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{ClientListQuery, ClientReader, ClientWriter, DieselRepository};

impl ClientReader for DieselRepository {
    fn get_client_by_id(
        &self,
        id: ClientId,
        company_id: CompanyId,
    ) -> RepositoryResult<Option<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let client = clients::table
            .filter(clients::id.eq(id.get()))
            .filter(clients::company_id.eq(company_id.get()))
            .first::<DbClient>(&mut conn)
            .optional()?;

        Ok(client.map(Client::try_from).transpose()?)
    }

    fn list_clients(&self, query: &ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)> {
        use crate::schema::clients;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = clients::table
                .filter(clients::company_id.eq(query.company_id.get()))
                .into_boxed::<Sqlite>();

            for filter in &query.filters {
                items = match filter.column {
                    ClientColumn::Name => prefix_filter!(items, clients::name, filter),
                    ClientColumn::Industry => prefix_filter!(items, clients::industry, filter),
                    ClientColumn::CreatedAt => items,
                };
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        let direction = match &query.sort {
            Some(sort) => {
                items = match sort.column {
                    ClientColumn::Name => then_order!(items, clients::name, sort.direction),
                    ClientColumn::Industry => {
                        then_order!(items, clients::industry, sort.direction)
                    }
                    ClientColumn::CreatedAt => {
                        then_order!(items, clients::created_at, sort.direction)
                    }
                };
                sort.direction
            }
            None => {
                items = items.then_order_by(clients::created_at.desc());
                SortDirection::Desc
            }
        };
        items = then_order!(items, clients::id, direction);

        if let Some(pagination) = &query.pagination {
            let Some(offset) = pagination.offset().filter(|offset| *offset < total as i64) else {
                return Ok((total, Vec::new()));
            };
            items = items.offset(offset).limit(pagination.per_page as i64);
        }

        let clients = items
            .load::<DbClient>(&mut conn)?
            .into_iter()
            .map(Client::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, clients))
    }
}

impl ClientWriter for DieselRepository {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let insertable: DbNewClient = new_client.into();

        let created = diesel::insert_into(clients::table)
            .values(&insertable)
            .get_result::<DbClient>(&mut conn)?;

        Ok(Client::try_from(created)?)
    }

    fn update_client(
        &self,
        id: ClientId,
        company_id: CompanyId,
        updates: &UpdateClient,
    ) -> RepositoryResult<Client> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let changeset = DbUpdateClient::new(updates, Utc::now().naive_utc());

        let updated = diesel::update(
            clients::table
                .filter(clients::id.eq(id.get()))
                .filter(clients::company_id.eq(company_id.get())),
        )
        .set(&changeset)
        .get_result::<DbClient>(&mut conn)?;

        Ok(Client::try_from(updated)?)
    }
}
