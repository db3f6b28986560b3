use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::allocation::AllocationForm;
use crate::forms::project::ProjectForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::query_string::ListState;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_list, render_template, write_outcome};
use crate::services::{ServiceError, projects as projects_service};
use crate::table::columns::{project_columns, project_href};

#[get("/projects")]
pub async fn show_projects(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let state = ListState::decode(req.query_string());
    let result = projects_service::list_projects(repo.get_ref(), &user, &state);

    let context = base_context(
        &flash_messages,
        &user,
        "projects",
        &server_config.auth_service_url,
    );
    render_list(
        &tera,
        context,
        "projects/index.html",
        state,
        result,
        &project_columns(),
        Some(project_href),
    )
}

#[post("/projects/add")]
pub async fn add_project(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ProjectForm>,
) -> impl Responder {
    match projects_service::add_project(repo.get_ref(), &user, form) {
        Ok(project) => {
            FlashMessage::success("Project added.").send();
            redirect(&format!("/projects/{}", project.id))
        }
        result => write_outcome(result, "Project added.", "/projects"),
    }
}

#[get("/projects/{project_id}")]
pub async fn show_project(
    project_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match projects_service::show_project(repo.get_ref(), &user, project_id.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "projects",
                &server_config.auth_service_url,
            );
            context.insert("project", &data.project);
            context.insert("client", &data.client);
            context.insert("allocations", &data.allocations);
            context.insert("booked_percent", &data.booked_percent);
            context.insert("resources", &data.resources);
            context.insert("clients", &data.clients);

            render_template(&tera, "projects/show.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Project not found.").send();
            redirect("/projects")
        }
        Err(err) => {
            log::error!("Failed to load project: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/projects/{project_id}")]
pub async fn save_project(
    project_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ProjectForm>,
) -> impl Responder {
    let project_id = project_id.into_inner();
    let result = projects_service::update_project(repo.get_ref(), &user, project_id, form);
    write_outcome(result, "Project saved.", &format!("/projects/{project_id}"))
}

#[post("/projects/{project_id}/allocations")]
pub async fn add_allocation(
    project_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AllocationForm>,
) -> impl Responder {
    let project_id = project_id.into_inner();
    let result = projects_service::add_allocation(repo.get_ref(), &user, project_id, form);
    write_outcome(result, "Allocation added.", &format!("/projects/{project_id}"))
}

#[post("/projects/{project_id}/allocations/{allocation_id}/delete")]
pub async fn delete_allocation(
    path: web::Path<(i32, i32)>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (project_id, allocation_id) = path.into_inner();
    let result =
        projects_service::remove_allocation(repo.get_ref(), &user, project_id, allocation_id);
    write_outcome(result, "Allocation removed.", &format!("/projects/{project_id}"))
}
