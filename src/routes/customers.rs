use actix_multipart::form::MultipartForm;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::customers::CustomersQuery;
use crate::forms::customers::{
    AddCustomerForm, DeleteCustomerForm, SaveCustomerForm, UploadCustomersForm,
};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::customers as customers_service;

#[get("/")]
pub async fn show_customers(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    params: web::Query<CustomersQuery>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match customers_service::load_customers_page(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "customers",
                &server_config.auth_service_url,
            );
            context.insert("customers", &data.customers);
            context.insert("packages", &data.packages);
            context.insert("stations", &data.stations);
            context.insert("search_query", &data.search_query);
            context.insert("status_filter", &data.status_filter);
            context.insert("package_filter", &data.package_filter);
            context.insert("sort", &data.sort);
            context.insert("dir", &data.dir);

            render_template(&tera, "customers/index.html", &context)
        }
        Err(err) => service_error_response(err, "/"),
    }
}

#[get("/customer/{customer_id}")]
pub async fn show_customer(
    customer_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match customers_service::load_customer_page(repo.get_ref(), &user, customer_id.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "customers",
                &server_config.auth_service_url,
            );
            context.insert("customer", &data.customer);
            context.insert("package", &data.package);
            context.insert("station", &data.station);
            context.insert("packages", &data.packages);
            context.insert("stations", &data.stations);
            context.insert("payments", &data.payments);
            context.insert("tickets", &data.tickets);

            render_template(&tera, "customers/detail.html", &context)
        }
        Err(err) => service_error_response(err, "/"),
    }
}

#[post("/customer/add")]
pub async fn add_customer(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddCustomerForm>,
) -> impl Responder {
    match customers_service::add_customer(repo.get_ref(), &user, form) {
        Ok(()) => {
            FlashMessage::success("Customer added.").send();
            redirect("/")
        }
        Err(err) => service_error_response(err, "/"),
    }
}

#[post("/customer/save")]
pub async fn save_customer(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SaveCustomerForm>,
) -> impl Responder {
    let fallback = format!("/customer/{}", form.id);
    match customers_service::save_customer(repo.get_ref(), &user, form) {
        Ok(customer_id) => {
            FlashMessage::success("Customer updated.").send();
            redirect(&format!("/customer/{customer_id}"))
        }
        Err(err) => service_error_response(err, &fallback),
    }
}

#[post("/customer/delete")]
pub async fn delete_customer(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<DeleteCustomerForm>,
) -> impl Responder {
    match customers_service::delete_customer(repo.get_ref(), &user, form) {
        Ok(()) => {
            FlashMessage::success("Customer deleted.").send();
            redirect("/")
        }
        Err(err) => service_error_response(err, "/"),
    }
}

#[post("/customers/upload")]
pub async fn customers_upload(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    MultipartForm(mut form): MultipartForm<UploadCustomersForm>,
) -> impl Responder {
    match customers_service::upload_customers(repo.get_ref(), &user, &mut form) {
        Ok(created) => {
            FlashMessage::success(format!("{created} customers imported.")).send();
            redirect("/")
        }
        Err(err) => service_error_response(err, "/"),
    }
}
