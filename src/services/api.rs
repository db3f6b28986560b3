//! Services behind the `/api/v1` list endpoints.
//!
//! They share the list workflows of the HTML views and only reshape the
//! result into [`ListResponse`].

use crate::domain::client::Client;
use crate::domain::project::Project;
use crate::domain::resource::Resource;
use crate::dto::api::ListResponse;
use crate::models::auth::AuthenticatedUser;
use crate::query_string::ListState;
use crate::repository::{ClientReader, ProjectReader, ResourceReader};
use crate::services::{ServiceResult, clients, projects, resources};

pub fn list_resources<R>(
    repo: &R,
    user: &AuthenticatedUser,
    state: &ListState,
) -> ServiceResult<ListResponse<Resource>>
where
    R: ResourceReader + ?Sized,
{
    resources::list_resources(repo, user, state).map(ListResponse::from)
}

pub fn list_clients<R>(
    repo: &R,
    user: &AuthenticatedUser,
    state: &ListState,
) -> ServiceResult<ListResponse<Client>>
where
    R: ClientReader + ?Sized,
{
    clients::list_clients(repo, user, state).map(ListResponse::from)
}

pub fn list_projects<R>(
    repo: &R,
    user: &AuthenticatedUser,
    state: &ListState,
) -> ServiceResult<ListResponse<Project>>
where
    R: ProjectReader + ?Sized,
{
    projects::list_projects(repo, user, state).map(ListResponse::from)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::viewer_user;

    #[test]
    fn response_echoes_normalized_paging() {
        let mut repo = MockRepository::new();
        repo.expect_list_projects()
            .returning(|_| Ok((23, Vec::new())));

        let state = ListState::decode("page=0&per_page=7");
        let response = list_projects(&repo, &viewer_user(), &state).unwrap();

        assert_eq!(response.page, 1);
        assert_eq!(response.per_page, 10);
        assert_eq!(response.total_count, 23);
        assert!(response.records.is_empty());
    }
}
