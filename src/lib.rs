#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_identity::IdentityMiddleware;
#[cfg(feature = "server")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware as actix_middleware, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "data")]
pub mod collection;
#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod filters;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "server")]
pub mod services;

/// Role required to use the application at all.
pub const SERVICE_ACCESS_ROLE: &str = "isp";
/// Role required for management mutations.
pub const SERVICE_ADMIN_ROLE: &str = "isp_admin";
/// Support agents; their ticket view is scoped to their own assignments.
pub const SERVICE_AGENT_ROLE: &str = "isp_agent";

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: crate::models::config::ServerConfig) -> std::io::Result<()> {
    use crate::middleware::RedirectUnauthorized;
    use crate::repository::DieselRepository;
    use crate::routes::activity::show_activity;
    use crate::routes::api::api_v1_customers;
    use crate::routes::billing::{record_payment, show_payments, show_transactions};
    use crate::routes::customers::{
        add_customer, customers_upload, delete_customer, save_customer, show_customer,
        show_customers,
    };
    use crate::routes::inventory::{add_item, assign_item, show_inventory};
    use crate::routes::packages::{add_package, save_package, show_packages};
    use crate::routes::stations::{add_station, save_station, show_stations};
    use crate::routes::tickets::{add_ticket, show_tickets, ticket_status};
    use crate::routes::{logout, not_assigned};

    // Establish the Diesel connection pool for the SQLite database.
    let pool = crate::db::establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool);

    // Keys and stores for identity, sessions, and flash messages.
    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let mut tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;
    tera.register_filter("money", crate::filters::money);

    let bind_address = server_config.bind_address();

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{}", server_config.domain)))
                    .build(),
            )
            .wrap(actix_middleware::Compress::default())
            .wrap(actix_middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(not_assigned)
            .service(web::scope("/api").service(api_v1_customers))
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized)
                    .service(show_customers)
                    .service(show_customer)
                    .service(add_customer)
                    .service(save_customer)
                    .service(delete_customer)
                    .service(customers_upload)
                    .service(show_packages)
                    .service(add_package)
                    .service(save_package)
                    .service(show_stations)
                    .service(add_station)
                    .service(save_station)
                    .service(show_tickets)
                    .service(add_ticket)
                    .service(ticket_status)
                    .service(show_payments)
                    .service(show_transactions)
                    .service(record_payment)
                    .service(show_inventory)
                    .service(add_item)
                    .service(assign_item)
                    .service(show_activity)
                    .service(logout),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
