use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::dto::activity::ActivityQuery;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, render_template, service_error_response};
use crate::services::activity as activity_service;

#[get("/activity")]
pub async fn show_activity(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    params: web::Query<ActivityQuery>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match activity_service::load_activity_page(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "activity",
                &server_config.auth_service_url,
            );
            context.insert("activity", &data.activity);
            context.insert("recent", &data.recent);
            context.insert("recent_count", &data.recent_count);
            context.insert("search_query", &data.search_query);
            context.insert("action_filter", &data.action_filter);
            context.insert("sort", &data.sort);
            context.insert("dir", &data.dir);

            render_template(&tera, "activity/index.html", &context)
        }
        Err(err) => service_error_response(err, "/"),
    }
}
