use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::inventory::InventoryQuery;
use crate::forms::inventory::{AddItemForm, AssignItemForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::inventory as inventory_service;

#[get("/inventory")]
pub async fn show_inventory(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    params: web::Query<InventoryQuery>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match inventory_service::load_inventory_page(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "inventory",
                &server_config.auth_service_url,
            );
            context.insert("items", &data.items);
            context.insert("customers", &data.customers);
            context.insert("search_query", &data.search_query);
            context.insert("category_filter", &data.category_filter);
            context.insert("status_filter", &data.status_filter);
            context.insert("sort", &data.sort);
            context.insert("dir", &data.dir);

            render_template(&tera, "inventory/index.html", &context)
        }
        Err(err) => service_error_response(err, "/inventory"),
    }
}

#[post("/inventory/add")]
pub async fn add_item(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddItemForm>,
) -> impl Responder {
    match inventory_service::add_item(repo.get_ref(), &user, form) {
        Ok(()) => {
            FlashMessage::success("Item added.").send();
            redirect("/inventory")
        }
        Err(err) => service_error_response(err, "/inventory"),
    }
}

#[post("/inventory/assign")]
pub async fn assign_item(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AssignItemForm>,
) -> impl Responder {
    match inventory_service::assign_item(repo.get_ref(), &user, form) {
        Ok(()) => {
            FlashMessage::success("Item assignment updated.").send();
            redirect("/inventory")
        }
        Err(err) => service_error_response(err, "/inventory"),
    }
}
