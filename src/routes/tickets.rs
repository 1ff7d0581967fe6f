use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::tickets::TicketsQuery;
use crate::forms::tickets::{AddTicketForm, TicketStatusForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::tickets as tickets_service;

#[get("/tickets")]
pub async fn show_tickets(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    params: web::Query<TicketsQuery>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match tickets_service::load_tickets_page(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "tickets",
                &server_config.auth_service_url,
            );
            context.insert("tickets", &data.tickets);
            context.insert("search_query", &data.search_query);
            context.insert("status_filter", &data.status_filter);
            context.insert("priority_filter", &data.priority_filter);
            context.insert("sort", &data.sort);
            context.insert("dir", &data.dir);

            render_template(&tera, "tickets/index.html", &context)
        }
        Err(err) => service_error_response(err, "/tickets"),
    }
}

#[post("/ticket/add")]
pub async fn add_ticket(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddTicketForm>,
) -> impl Responder {
    let customer_id = form.customer_id;
    match tickets_service::add_ticket(repo.get_ref(), &user, form) {
        Ok(()) => {
            FlashMessage::success("Ticket opened.").send();
            redirect(&format!("/customer/{customer_id}"))
        }
        Err(err) => service_error_response(err, "/tickets"),
    }
}

#[post("/ticket/status")]
pub async fn ticket_status(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<TicketStatusForm>,
) -> impl Responder {
    match tickets_service::update_ticket_status(repo.get_ref(), &user, form) {
        Ok(()) => {
            FlashMessage::success("Ticket updated.").send();
            redirect("/tickets")
        }
        Err(err) => service_error_response(err, "/tickets"),
    }
}
