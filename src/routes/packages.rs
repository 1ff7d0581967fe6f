use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::packages::{AddPackageForm, SavePackageForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::packages as packages_service;

#[get("/packages")]
pub async fn show_packages(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match packages_service::load_packages_page(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "packages",
                &server_config.auth_service_url,
            );
            context.insert("packages", &data.packages);

            render_template(&tera, "packages/index.html", &context)
        }
        Err(err) => service_error_response(err, "/packages"),
    }
}

#[post("/package/add")]
pub async fn add_package(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddPackageForm>,
) -> impl Responder {
    match packages_service::add_package(repo.get_ref(), &user, form) {
        Ok(()) => {
            FlashMessage::success("Package added.").send();
            redirect("/packages")
        }
        Err(err) => service_error_response(err, "/packages"),
    }
}

#[post("/package/save")]
pub async fn save_package(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SavePackageForm>,
) -> impl Responder {
    match packages_service::save_package(repo.get_ref(), &user, form) {
        Ok(()) => {
            FlashMessage::success("Package updated.").send();
            redirect("/packages")
        }
        Err(err) => service_error_response(err, "/packages"),
    }
}
