use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::forms::resource::ResourceForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::query_string::ListState;
use crate::repository::DieselRepository;
use crate::routes::{base_context, render_list, write_outcome};
use crate::services::resources as resources_service;
use crate::table::columns::resource_columns;

#[get("/resources")]
pub async fn show_resources(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let state = ListState::decode(req.query_string());
    let result = resources_service::list_resources(repo.get_ref(), &user, &state);

    let context = base_context(
        &flash_messages,
        &user,
        "resources",
        &server_config.auth_service_url,
    );
    render_list(
        &tera,
        context,
        "resources/index.html",
        state,
        result,
        &resource_columns(),
        None,
    )
}

#[post("/resources/add")]
pub async fn add_resource(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ResourceForm>,
) -> impl Responder {
    let result = resources_service::add_resource(repo.get_ref(), &user, form);
    write_outcome(result, "Resource added.", "/resources")
}

#[post("/resources/{resource_id}")]
pub async fn save_resource(
    resource_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ResourceForm>,
) -> impl Responder {
    let result =
        resources_service::update_resource(repo.get_ref(), &user, resource_id.into_inner(), form);
    write_outcome(result, "Resource saved.", "/resources")
}
