use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use serde::Serialize;

use crate::models::auth::AuthenticatedUser;
use crate::query_string::ListState;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, ServiceResult, api as api_service};

fn json_response<T: Serialize>(result: ServiceResult<T>) -> HttpResponse {
    match result {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(err) => {
            log::error!("API request failed: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/v1/resources")]
pub async fn api_v1_resources(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let state = ListState::decode(req.query_string());
    json_response(api_service::list_resources(repo.get_ref(), &user, &state))
}

#[get("/v1/clients")]
pub async fn api_v1_clients(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let state = ListState::decode(req.query_string());
    json_response(api_service::list_clients(repo.get_ref(), &user, &state))
}

#[get("/v1/projects")]
pub async fn api_v1_projects(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let state = ListState::decode(req.query_string());
    json_response(api_service::list_projects(repo.get_ref(), &user, &state))
}
