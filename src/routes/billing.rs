use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::billing::{PaymentsQuery, TransactionsQuery};
use crate::forms::billing::RecordPaymentForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::billing as billing_service;

#[get("/payments")]
pub async fn show_payments(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    params: web::Query<PaymentsQuery>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match billing_service::load_payments_page(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "payments",
                &server_config.auth_service_url,
            );
            context.insert("payments", &data.payments);
            context.insert("search_query", &data.search_query);
            context.insert("method_filter", &data.method_filter);
            context.insert("sort", &data.sort);
            context.insert("dir", &data.dir);

            render_template(&tera, "billing/payments.html", &context)
        }
        Err(err) => service_error_response(err, "/payments"),
    }
}

#[get("/transactions")]
pub async fn show_transactions(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    params: web::Query<TransactionsQuery>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match billing_service::load_transactions_page(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "transactions",
                &server_config.auth_service_url,
            );
            context.insert("transactions", &data.transactions);
            context.insert("search_query", &data.search_query);
            context.insert("provider_filter", &data.provider_filter);
            context.insert("status_filter", &data.status_filter);
            context.insert("sort", &data.sort);
            context.insert("dir", &data.dir);

            render_template(&tera, "billing/transactions.html", &context)
        }
        Err(err) => service_error_response(err, "/transactions"),
    }
}

#[post("/payment/add")]
pub async fn record_payment(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<RecordPaymentForm>,
) -> impl Responder {
    let customer_id = form.customer_id;
    match billing_service::record_payment(repo.get_ref(), &user, form) {
        Ok(()) => {
            FlashMessage::success("Payment recorded.").send();
            redirect(&format!("/customer/{customer_id}"))
        }
        Err(err) => service_error_response(err, "/payments"),
    }
}
