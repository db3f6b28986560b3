use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::forms::client::ClientForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::query_string::ListState;
use crate::repository::DieselRepository;
use crate::routes::{base_context, render_list, write_outcome};
use crate::services::clients as clients_service;
use crate::table::columns::client_columns;

#[get("/clients")]
pub async fn show_clients(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let state = ListState::decode(req.query_string());
    let result = clients_service::list_clients(repo.get_ref(), &user, &state);

    let context = base_context(
        &flash_messages,
        &user,
        "clients",
        &server_config.auth_service_url,
    );
    render_list(
        &tera,
        context,
        "clients/index.html",
        state,
        result,
        &client_columns(),
        None,
    )
}

#[post("/clients/add")]
pub async fn add_client(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ClientForm>,
) -> impl Responder {
    let result = clients_service::add_client(repo.get_ref(), &user, form);
    write_outcome(result, "Client added.", "/clients")
}

#[post("/clients/{client_id}")]
pub async fn save_client(
    client_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ClientForm>,
) -> impl Responder {
    let result = clients_service::update_client(repo.get_ref(), &user, client_id.into_inner(), form);
    write_outcome(result, "Client saved.", "/clients")
}
