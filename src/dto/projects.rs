//! DTOs shaped for the project detail template.

use serde::Serialize;

use crate::domain::allocation::AllocationWithResource;
use crate::domain::client::Client;
use crate::domain::project::Project;
use crate::domain::resource::Resource;

/// Aggregated data required to render the project details page.
#[derive(Debug, Serialize)]
pub struct ProjectPageData {
    pub project: Project,
    pub client: Option<Client>,
    pub allocations: Vec<AllocationWithResource>,
    /// Total booked percent across the current allocations.
    pub booked_percent: i32,
    /// Choices for the allocation form.
    pub resources: Vec<Resource>,
    /// Choices for the edit form.
    pub clients: Vec<Client>,
}
