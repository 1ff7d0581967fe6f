use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::stations::StationsQuery;
use crate::forms::stations::{AddStationForm, SaveStationForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::stations as stations_service;

#[get("/stations")]
pub async fn show_stations(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    params: web::Query<StationsQuery>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match stations_service::load_stations_page(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "stations",
                &server_config.auth_service_url,
            );
            context.insert("stations", &data.stations);
            context.insert("search_query", &data.search_query);
            context.insert("status_filter", &data.status_filter);
            context.insert("sort", &data.sort);
            context.insert("dir", &data.dir);

            render_template(&tera, "stations/index.html", &context)
        }
        Err(err) => service_error_response(err, "/stations"),
    }
}

#[post("/station/add")]
pub async fn add_station(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddStationForm>,
) -> impl Responder {
    match stations_service::add_station(repo.get_ref(), &user, form) {
        Ok(()) => {
            FlashMessage::success("Station added.").send();
            redirect("/stations")
        }
        Err(err) => service_error_response(err, "/stations"),
    }
}

#[post("/station/save")]
pub async fn save_station(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SaveStationForm>,
) -> impl Responder {
    match stations_service::save_station(repo.get_ref(), &user, form) {
        Ok(()) => {
            FlashMessage::success("Station updated.").send();
            redirect("/stations")
        }
        Err(err) => service_error_response(err, "/stations"),
    }
}
