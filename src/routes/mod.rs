//! HTTP handlers and the helpers they share.

use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::dto::listing::ListPage;
use crate::models::auth::AuthenticatedUser;
use crate::pagination::PageResult;
use crate::query_string::ListState;
use crate::services::{ServiceError, ServiceResult};
use crate::table::fetch::ListViewState;
use crate::table::{Column, render_table};

pub mod api;
pub mod clients;
pub mod main;
pub mod projects;
pub mod resources;

/// Bootstrap alert class for a flash message level.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Context shared by every page: alerts, current user and navigation.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    current_page: &str,
    home_url: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", user);
    context.insert("current_page", current_page);
    context.insert("home_url", home_url);
    context
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok().content_type("text/html").body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Renders a list page.
///
/// A failed load keeps the requested state so the template can offer a retry
/// link; an unauthorized caller is sent to the not-assigned page.
pub(crate) fn render_list<T>(
    tera: &Tera,
    mut context: Context,
    template: &str,
    requested: ListState,
    result: ServiceResult<ListPage<T>>,
    columns: &[Column<T>],
    row_href: Option<fn(&T) -> String>,
) -> HttpResponse {
    let mut view = ListViewState::new(ListState::default());
    let token = view.begin(requested.clone());

    let (outcome, state) = match result {
        Ok(list) => (Ok(list.result), list.state),
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            return redirect("/na");
        }
        Err(err) => {
            log::error!("Failed to load {template}: {err}");
            (Err(err), requested)
        }
    };
    view.complete(token, outcome);

    let empty = PageResult::empty();
    let table = render_table(view.page().unwrap_or(&empty), &state, columns, row_href);

    context.insert("table", &table);
    context.insert("status", &view.status());
    render_template(tera, template, &context)
}

/// Flashes the outcome of a form submission and redirects to `back`.
pub(crate) fn write_outcome<T>(
    result: ServiceResult<T>,
    success_message: &str,
    back: &str,
) -> HttpResponse {
    match result {
        Ok(_) => {
            FlashMessage::success(success_message).send();
            redirect(back)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(err @ ServiceError::Validation(_)) => {
            FlashMessage::warning(format!("Please fix the form: {}", err.summary())).send();
            redirect(back)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Record not found.").send();
            redirect(back)
        }
        Err(err) => {
            log::error!("Write failed: {err}");
            FlashMessage::error("The change could not be saved. Please try again.").send();
            redirect(back)
        }
    }
}
