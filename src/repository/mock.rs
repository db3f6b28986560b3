//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::allocation::{Allocation, AllocationWithResource, NewAllocation};
use crate::domain::audit::{AuditEntry, NewAuditEntry};
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::project::{NewProject, Project, UpdateProject};
use crate::domain::resource::{NewResource, Resource, UpdateResource};
use crate::domain::types::{AllocationId, ClientId, CompanyId, ProjectId, ResourceId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AllocationReader, AllocationWriter, AuditReader, AuditWriter, ClientListQuery, ClientReader,
    ClientWriter, ProjectListQuery, ProjectReader, ProjectWriter, ResourceListQuery,
    ResourceReader, ResourceWriter,
};

mock! {
    pub Repository {}

    impl ResourceReader for Repository {
        fn get_resource_by_id(
            &self,
            id: ResourceId,
            company_id: CompanyId,
        ) -> RepositoryResult<Option<Resource>>;
        fn list_resources(
            &self,
            query: &ResourceListQuery,
        ) -> RepositoryResult<(usize, Vec<Resource>)>;
    }

    impl ResourceWriter for Repository {
        fn create_resource(&self, new_resource: &NewResource) -> RepositoryResult<Resource>;
        fn update_resource(
            &self,
            id: ResourceId,
            company_id: CompanyId,
            updates: &UpdateResource,
        ) -> RepositoryResult<Resource>;
    }

    impl ClientReader for Repository {
        fn get_client_by_id(
            &self,
            id: ClientId,
            company_id: CompanyId,
        ) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self, query: &ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)>;
    }

    impl ClientWriter for Repository {
        fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
        fn update_client(
            &self,
            id: ClientId,
            company_id: CompanyId,
            updates: &UpdateClient,
        ) -> RepositoryResult<Client>;
    }

    impl ProjectReader for Repository {
        fn get_project_by_id(
            &self,
            id: ProjectId,
            company_id: CompanyId,
        ) -> RepositoryResult<Option<Project>>;
        fn list_projects(&self, query: &ProjectListQuery) -> RepositoryResult<(usize, Vec<Project>)>;
    }

    impl ProjectWriter for Repository {
        fn create_project(&self, new_project: &NewProject) -> RepositoryResult<Project>;
        fn update_project(
            &self,
            id: ProjectId,
            company_id: CompanyId,
            updates: &UpdateProject,
        ) -> RepositoryResult<Project>;
    }

    impl AllocationReader for Repository {
        fn list_project_allocations(
            &self,
            project_id: ProjectId,
            company_id: CompanyId,
        ) -> RepositoryResult<Vec<AllocationWithResource>>;
    }

    impl AllocationWriter for Repository {
        fn create_allocation(&self, new_allocation: &NewAllocation) -> RepositoryResult<Allocation>;
        fn delete_allocation(&self, id: AllocationId, company_id: CompanyId) -> RepositoryResult<()>;
    }

    impl AuditReader for Repository {
        fn list_recent_audit_entries(
            &self,
            company_id: CompanyId,
            limit: usize,
        ) -> RepositoryResult<Vec<AuditEntry>>;
    }

    impl AuditWriter for Repository {
        fn create_audit_entry(&self, entry: &NewAuditEntry) -> RepositoryResult<()>;
    }
}
