use std::collections::HashSet;

use chrono::NaiveDate;
use pushkind_staffing::domain::allocation::NewAllocation;
use pushkind_staffing::domain::audit::{AuditAction, NewAuditEntry};
use pushkind_staffing::domain::client::{ClientColumn, NewClient, UpdateClient};
use pushkind_staffing::domain::listing::SortDirection;
use pushkind_staffing::domain::project::{DateSpan, NewProject, ProjectColumn};
use pushkind_staffing::domain::resource::{NewResource, Resource, ResourceColumn, UpdateResource};
use pushkind_staffing::domain::types::{
    AllocationPercent, ClientName, CompanyId, EmailAddress, JobTitle, NonEmptyString,
    ProjectName, ProjectStatus, ResourceId, ResourceKind, ResourceName, SkillName,
};
use pushkind_staffing::query_string::ListState;
use pushkind_staffing::repository::errors::RepositoryError;
use pushkind_staffing::repository::{
    AllocationReader, AllocationWriter, AuditReader, AuditWriter, ClientListQuery, ClientReader,
    ClientWriter, DieselRepository, ProjectListQuery, ProjectReader, ProjectWriter,
    ResourceListQuery, ResourceReader, ResourceWriter,
};
use pushkind_staffing::services::listing::load_page;

mod common;

const NAMES: [&str; 12] = [
    "Alice", "Alan", "Albert", "Bob", "Bea", "Carl", "alice", "Álvaro", "Al", "Dora", "Alba", "Ed",
];
const TITLES: [&str; 3] = ["Engineer", "Designer", "Engineering Manager"];

fn company(id: i32) -> CompanyId {
    CompanyId::new(id).unwrap()
}

fn new_resource(company_id: i32, index: usize, name: &str) -> NewResource {
    NewResource::new(
        company(company_id),
        ResourceName::new(name).unwrap(),
        EmailAddress::new(format!("r{index}@c{company_id}.example.com")).unwrap(),
        JobTitle::new(TITLES[index % TITLES.len()]).unwrap(),
        if index % 2 == 0 {
            ResourceKind::Employee
        } else {
            ResourceKind::Contractor
        },
        vec![SkillName::new("Rust").unwrap()],
    )
}

/// Two tenants with interleaved inserts; returns the repository.
fn seeded_repo(test_db: &common::TestDb) -> DieselRepository {
    let repo = DieselRepository::new(test_db.pool());
    for (index, name) in NAMES.iter().enumerate() {
        repo.create_resource(&new_resource(1, index, name)).unwrap();
        repo.create_resource(&new_resource(2, index, name)).unwrap();
    }
    repo
}

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day).unwrap()
}

fn ids(resources: &[Resource]) -> Vec<i32> {
    resources.iter().map(|r| r.id.get()).collect()
}

#[test]
fn test_resource_crud() {
    let test_db = common::TestDb::new("test_resource_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let created = repo
        .create_resource(&new_resource(1, 0, "Grace Hopper"))
        .unwrap();
    assert_eq!(created.name.as_str(), "Grace Hopper");
    assert_eq!(created.skills.len(), 1);

    let fetched = repo
        .get_resource_by_id(created.id, company(1))
        .unwrap()
        .unwrap();
    assert_eq!(fetched, created);

    let updates = UpdateResource::new(
        ResourceName::new("Grace B. Hopper").unwrap(),
        created.email.clone(),
        JobTitle::new("Rear Admiral").unwrap(),
        ResourceKind::Contractor,
        vec![
            SkillName::new("COBOL").unwrap(),
            SkillName::new("cobol").unwrap(),
            SkillName::new("Compilers").unwrap(),
        ],
    );
    let updated = repo.update_resource(created.id, company(1), &updates).unwrap();
    assert_eq!(updated.title.as_str(), "Rear Admiral");
    assert_eq!(updated.kind, ResourceKind::Contractor);
    let skills: Vec<_> = updated.skills.iter().map(|s| s.as_str()).collect();
    assert_eq!(skills, vec!["COBOL", "Compilers"]);
}

#[test]
fn test_other_company_cannot_read_or_update() {
    let test_db = common::TestDb::new("test_other_company.db");
    let repo = DieselRepository::new(test_db.pool());

    let created = repo.create_resource(&new_resource(1, 0, "Ada")).unwrap();

    assert!(repo.get_resource_by_id(created.id, company(2)).unwrap().is_none());

    let updates = UpdateResource::new(
        ResourceName::new("Mallory").unwrap(),
        created.email.clone(),
        created.title.clone(),
        created.kind,
        Vec::new(),
    );
    assert!(matches!(
        repo.update_resource(created.id, company(2), &updates),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_duplicate_email_is_constraint_violation() {
    let test_db = common::TestDb::new("test_duplicate_email.db");
    let repo = DieselRepository::new(test_db.pool());

    repo.create_resource(&new_resource(1, 0, "Ada")).unwrap();
    let duplicate = repo.create_resource(&new_resource(1, 0, "Ada Again"));

    assert!(matches!(
        duplicate,
        Err(RepositoryError::ConstraintViolation(_))
    ));
    // Same email in another company is fine.
    assert!(repo.create_resource(&new_resource(2, 0, "Ada")).is_ok());
}

#[test]
fn test_tenant_isolation_across_filters_sorts_and_pages() {
    let test_db = common::TestDb::new("test_tenant_isolation.db");
    let repo = seeded_repo(&test_db);

    let sorts = [
        None,
        Some((ResourceColumn::Name, SortDirection::Asc)),
        Some((ResourceColumn::Email, SortDirection::Desc)),
        Some((ResourceColumn::Title, SortDirection::Asc)),
        Some((ResourceColumn::CreatedAt, SortDirection::Desc)),
    ];
    let filters = [
        None,
        Some((ResourceColumn::Name, "Al")),
        Some((ResourceColumn::Title, "Engineer")),
        Some((ResourceColumn::Email, "r1")),
    ];

    for tenant in [1, 2] {
        for sort in sorts {
            for filter in filters {
                for page in 1..=3 {
                    let mut query = ResourceListQuery::new(company(tenant)).paginate(page, 5);
                    if let Some((column, direction)) = sort {
                        query = query.sort(column, direction);
                    }
                    if let Some((column, prefix)) = filter {
                        query = query.filter(column, prefix);
                    }

                    let (_, items) = repo.list_resources(&query).unwrap();
                    assert!(
                        items.iter().all(|r| r.company_id == company(tenant)),
                        "tenant {tenant} leaked records for {query:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_prefix_filter_is_case_sensitive_prefix() {
    let test_db = common::TestDb::new("test_prefix_filter.db");
    let repo = seeded_repo(&test_db);

    let (total, items) = repo
        .list_resources(&ResourceListQuery::new(company(1)).filter(ResourceColumn::Name, "Al"))
        .unwrap();

    let mut names: Vec<_> = items.iter().map(|r| r.name.as_str().to_string()).collect();
    names.sort();
    assert_eq!(total, 5);
    assert_eq!(names, vec!["Al", "Alan", "Alba", "Albert", "Alice"]);
    assert!(names.iter().all(|name| name.starts_with("Al")));

    let (total, items) = repo
        .list_resources(
            &ResourceListQuery::new(company(1)).filter(ResourceColumn::Title, "Engineer"),
        )
        .unwrap();
    assert_eq!(total, 8);
    assert!(items.iter().all(|r| r.title.as_str().starts_with("Engineer")));

    let (total, _) = repo
        .list_resources(&ResourceListQuery::new(company(1)).filter(ResourceColumn::Name, "Zed"))
        .unwrap();
    assert_eq!(total, 0);
}

#[test]
fn test_prefix_filter_matches_values_continuing_with_max_char() {
    let test_db = common::TestDb::new("test_prefix_max_char.db");
    let repo = DieselRepository::new(test_db.pool());
    for (index, name) in ["Al\u{10FFFF}ex", "Al", "Am", "\u{10FFFF}\u{10FFFF}z"]
        .iter()
        .enumerate()
    {
        repo.create_resource(&new_resource(1, index, name)).unwrap();
    }

    let (total, items) = repo
        .list_resources(&ResourceListQuery::new(company(1)).filter(ResourceColumn::Name, "Al"))
        .unwrap();
    let mut names: Vec<_> = items.iter().map(|r| r.name.as_str().to_string()).collect();
    names.sort();
    assert_eq!(total, 2);
    assert_eq!(names, vec!["Al".to_string(), "Al\u{10FFFF}ex".to_string()]);

    let (total, items) = repo
        .list_resources(
            &ResourceListQuery::new(company(1)).filter(ResourceColumn::Name, "\u{10FFFF}"),
        )
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].name.as_str(), "\u{10FFFF}\u{10FFFF}z");
}

#[test]
fn test_combined_filters_intersect() {
    let test_db = common::TestDb::new("test_combined_filters.db");
    let repo = seeded_repo(&test_db);

    let (total, items) = repo
        .list_resources(
            &ResourceListQuery::new(company(1))
                .filter(ResourceColumn::Name, "Al")
                .filter(ResourceColumn::Title, "Engineer"),
        )
        .unwrap();

    assert_eq!(total, items.len());
    assert!(items.iter().all(|r| {
        r.name.as_str().starts_with("Al") && r.title.as_str().starts_with("Engineer")
    }));
}

#[test]
fn test_pagination_is_stable_without_gaps_or_duplicates() {
    let test_db = common::TestDb::new("test_stable_pagination.db");
    let repo = seeded_repo(&test_db);

    let sorts = [
        None,
        Some((ResourceColumn::Title, SortDirection::Asc)),
        Some((ResourceColumn::Title, SortDirection::Desc)),
        Some((ResourceColumn::CreatedAt, SortDirection::Asc)),
    ];

    for sort in sorts {
        let mut seen = Vec::new();
        let mut total = 0;
        for page in 1..=4 {
            let mut query = ResourceListQuery::new(company(1)).paginate(page, 5);
            if let Some((column, direction)) = sort {
                query = query.sort(column, direction);
            }
            let (count, items) = repo.list_resources(&query).unwrap();
            assert!(items.len() <= 5);
            total = count;
            seen.extend(ids(&items));
        }

        let unique: HashSet<_> = seen.iter().copied().collect();
        assert_eq!(seen.len(), total, "gap or overlap for {sort:?}");
        assert_eq!(unique.len(), total, "duplicate rows for {sort:?}");
    }
}

#[test]
fn test_default_order_is_newest_first() {
    let test_db = common::TestDb::new("test_default_order.db");
    let repo = seeded_repo(&test_db);

    let (_, items) = repo
        .list_resources(&ResourceListQuery::new(company(1)))
        .unwrap();

    let order = ids(&items);
    let mut expected = order.clone();
    expected.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(order, expected);
}

#[test]
fn test_sort_by_name_orders_binary() {
    let test_db = common::TestDb::new("test_sort_by_name.db");
    let repo = seeded_repo(&test_db);

    let (_, asc) = repo
        .list_resources(
            &ResourceListQuery::new(company(1)).sort(ResourceColumn::Name, SortDirection::Asc),
        )
        .unwrap();
    let names: Vec<_> = asc.iter().map(|r| r.name.as_str().to_string()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);

    let (_, desc) = repo
        .list_resources(
            &ResourceListQuery::new(company(1)).sort(ResourceColumn::Name, SortDirection::Desc),
        )
        .unwrap();
    let reversed: Vec<_> = desc.iter().rev().map(|r| r.name.as_str().to_string()).collect();
    assert_eq!(reversed, sorted);
}

#[test]
fn test_twenty_three_records_in_pages_of_ten() {
    let test_db = common::TestDb::new("test_23_records.db");
    let repo = DieselRepository::new(test_db.pool());
    for index in 0..23 {
        repo.create_resource(&new_resource(1, index, &format!("Person {index:02}")))
            .unwrap();
    }

    let page_sizes: Vec<_> = (1..=3)
        .map(|page| {
            let (total, items) = repo
                .list_resources(&ResourceListQuery::new(company(1)).paginate(page, 10))
                .unwrap();
            assert_eq!(total, 23);
            items.len()
        })
        .collect();
    assert_eq!(page_sizes, vec![10, 10, 3]);

    let (total, beyond) = repo
        .list_resources(&ResourceListQuery::new(company(1)).paginate(4, 10))
        .unwrap();
    assert_eq!(total, 23);
    assert!(beyond.is_empty());
}

#[test]
fn test_page_far_past_the_end_is_empty() {
    let test_db = common::TestDb::new("test_huge_page.db");
    let repo = DieselRepository::new(test_db.pool());
    for index in 0..23 {
        repo.create_resource(&new_resource(1, index, &format!("Person {index:02}")))
            .unwrap();
    }

    for page in [1_000_000_000_000_000_001, usize::MAX] {
        let (total, items) = repo
            .list_resources(&ResourceListQuery::new(company(1)).paginate(page, 10))
            .unwrap();
        assert_eq!(total, 23);
        assert!(items.is_empty());
    }

    for query in [
        "page=1000000000000000001&per_page=10",
        "page=18446744073709551615&per_page=10",
    ] {
        let state = ListState::decode(query);
        let page = load_page::<ResourceColumn, _, _>(company(1), &state, |query| {
            repo.list_resources(query)
        })
        .unwrap();
        assert_eq!(page.result.total_count, 23);
        assert!(page.result.records.is_empty());
    }
}

#[test]
fn test_client_list_and_update() {
    let test_db = common::TestDb::new("test_clients.db");
    let repo = DieselRepository::new(test_db.pool());

    let acme = repo
        .create_client(&NewClient::new(
            company(1),
            ClientName::new("Acme").unwrap(),
            Some(EmailAddress::new("hello@acme.test").unwrap()),
            Some(NonEmptyString::new("Retail").unwrap()),
        ))
        .unwrap();
    repo.create_client(&NewClient::new(
        company(1),
        ClientName::new("Globex").unwrap(),
        None,
        None,
    ))
    .unwrap();
    repo.create_client(&NewClient::new(
        company(2),
        ClientName::new("Initech").unwrap(),
        None,
        Some(NonEmptyString::new("Retail").unwrap()),
    ))
    .unwrap();

    let (total, items) = repo
        .list_clients(&ClientListQuery::new(company(1)).filter(ClientColumn::Industry, "Ret"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].name.as_str(), "Acme");

    let (_, sorted) = repo
        .list_clients(
            &ClientListQuery::new(company(1)).sort(ClientColumn::Industry, SortDirection::Asc),
        )
        .unwrap();
    assert_eq!(sorted[0].name.as_str(), "Globex");
    assert_eq!(sorted[0].industry, None);

    let updated = repo
        .update_client(
            acme.id,
            company(1),
            &UpdateClient::new(ClientName::new("Acme Corp").unwrap(), None, None),
        )
        .unwrap();
    assert_eq!(updated.name.as_str(), "Acme Corp");
    assert_eq!(updated.email, None);
    assert_eq!(updated.industry, None);
}

#[test]
fn test_projects_filter_by_status_and_allocations() {
    let test_db = common::TestDb::new("test_projects.db");
    let repo = DieselRepository::new(test_db.pool());

    let client = repo
        .create_client(&NewClient::new(
            company(1),
            ClientName::new("Acme").unwrap(),
            None,
            None,
        ))
        .unwrap();

    let mut projects = Vec::new();
    for (index, status) in [
        ProjectStatus::Active,
        ProjectStatus::Planned,
        ProjectStatus::Active,
    ]
    .into_iter()
    .enumerate()
    {
        let project = repo
            .create_project(&NewProject::new(
                company(1),
                client.id,
                ProjectName::new(format!("Project {index}")).unwrap(),
                status,
                None,
                DateSpan::new(date(1, index as u32 + 1), None).unwrap(),
            ))
            .unwrap();
        projects.push(project);
    }

    let (total, active) = repo
        .list_projects(&ProjectListQuery::new(company(1)).filter(ProjectColumn::Status, "active"))
        .unwrap();
    assert_eq!(total, 2);
    assert!(active.iter().all(|p| p.status == ProjectStatus::Active));

    let (_, by_start) = repo
        .list_projects(
            &ProjectListQuery::new(company(1)).sort(ProjectColumn::StartDate, SortDirection::Desc),
        )
        .unwrap();
    assert_eq!(by_start[0].start_date, date(1, 3));

    let resource = repo.create_resource(&new_resource(1, 0, "Ada")).unwrap();
    let project = &projects[0];
    let allocation = repo
        .create_allocation(&NewAllocation {
            company_id: company(1),
            resource_id: resource.id,
            project_id: project.id,
            percent: AllocationPercent::new(60).unwrap(),
            span: DateSpan::new(date(2, 1), Some(date(3, 1))).unwrap(),
        })
        .unwrap();

    let listed = repo
        .list_project_allocations(project.id, company(1))
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].resource.id, resource.id);
    assert_eq!(listed[0].allocation.percent.get(), 60);

    assert!(repo
        .list_project_allocations(project.id, company(2))
        .unwrap()
        .is_empty());
    assert!(matches!(
        repo.delete_allocation(allocation.id, company(2)),
        Err(RepositoryError::NotFound)
    ));

    repo.delete_allocation(allocation.id, company(1)).unwrap();
    assert!(repo
        .list_project_allocations(project.id, company(1))
        .unwrap()
        .is_empty());
}

#[test]
fn test_allocation_requires_existing_resource() {
    let test_db = common::TestDb::new("test_allocation_fk.db");
    let repo = DieselRepository::new(test_db.pool());

    let client = repo
        .create_client(&NewClient::new(
            company(1),
            ClientName::new("Acme").unwrap(),
            None,
            None,
        ))
        .unwrap();
    let project = repo
        .create_project(&NewProject::new(
            company(1),
            client.id,
            ProjectName::new("Audit").unwrap(),
            ProjectStatus::Planned,
            None,
            DateSpan::new(date(1, 1), None).unwrap(),
        ))
        .unwrap();

    let result = repo.create_allocation(&NewAllocation {
        company_id: company(1),
        resource_id: ResourceId::new(999).unwrap(),
        project_id: project.id,
        percent: AllocationPercent::new(10).unwrap(),
        span: DateSpan::new(date(1, 1), None).unwrap(),
    });

    assert!(matches!(result, Err(RepositoryError::ConstraintViolation(_))));
}

#[test]
fn test_audit_entries_are_scoped_and_recent_first() {
    let test_db = common::TestDb::new("test_audit.db");
    let repo = DieselRepository::new(test_db.pool());

    repo.create_audit_entry(&NewAuditEntry::success(
        company(1),
        "admin@example.com",
        AuditAction::Create,
        "resource",
        1,
    ))
    .unwrap();
    repo.create_audit_entry(&NewAuditEntry::failure(
        company(1),
        "admin@example.com",
        AuditAction::Update,
        "resource",
        Some(1),
        "Entity not found",
    ))
    .unwrap();
    repo.create_audit_entry(&NewAuditEntry::success(
        company(2),
        "other@example.com",
        AuditAction::Create,
        "client",
        5,
    ))
    .unwrap();

    let entries = repo.list_recent_audit_entries(company(1), 10).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].action, "update");
    assert_eq!(entries[0].outcome, "failure");
    assert_eq!(entries[0].details, "Entity not found");
    assert_eq!(entries[1].outcome, "success");
    assert!(entries.iter().all(|e| e.company_id == company(1)));

    assert_eq!(repo.list_recent_audit_entries(company(1), 1).unwrap().len(), 1);
}
