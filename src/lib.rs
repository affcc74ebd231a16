pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod facets;
pub mod forms;
pub mod gateway;
pub mod models;
pub mod resolvers;
pub mod services;
pub mod session;
pub mod views;
pub mod workflow;

#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "server")]
pub mod routes;

#[cfg(feature = "server")]
pub use server::run;

#[cfg(feature = "server")]
mod server {
    use actix_cors::Cors;
    use actix_files::Files;
    use actix_identity::IdentityMiddleware;
    use actix_session::{SessionMiddleware, storage::CookieSessionStore};
    use actix_web::cookie::Key;
    use actix_web::middleware::from_fn;
    use actix_web::{App, HttpServer, middleware, web};
    use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
    use tera::Tera;

    use crate::gateway::http::HttpGateway;
    use crate::middleware::redirect_unauthorized;
    use crate::models::config::ServerConfig;
    use crate::routes::auth::{login, logout, show_login, signup};
    use crate::routes::feedback::{give_feedback, show_feedback};
    use crate::routes::invoices::{issue_invoice, show_invoices};
    use crate::routes::notices::{issue_notice, show_notices};
    use crate::routes::profile::{change_password, delete_profile, show_profile, update_profile};
    use crate::routes::requests::{
        approve_request, cancel_request, complete_request, index, request_feedback,
        reschedule_request, show_requests, submit_request,
    };
    use crate::routes::users::{add_officer, delete_officer, delete_resident, show_users};

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        // One pooled client; handlers derive per-session copies carrying the token.
        let gateway = HttpGateway::new(&server_config.backend_url, server_config.request_timeout())
            .map_err(|e| std::io::Error::other(format!("Failed to build backend client: {e}")))?;

        // Keys and stores for identity, sessions, and flash messages.
        let secret_key = Key::from(server_config.secret.as_bytes());

        let message_store = CookieMessageStore::builder(secret_key.clone()).build();
        let message_framework = FlashMessagesFramework::builder(message_store).build();

        let tera = Tera::new(&server_config.templates_dir)
            .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

        let bind_address = (server_config.address.clone(), server_config.port);
        log::info!(
            "Serving on {}:{} against {}",
            bind_address.0,
            bind_address.1,
            server_config.backend_url
        );

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
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .service(Files::new("/assets", "./assets"))
                .service(show_login)
                .service(login)
                .service(signup)
                .service(logout)
                .service(
                    web::scope("")
                        .wrap(from_fn(redirect_unauthorized))
                        .service(index)
                        .service(show_requests)
                        .service(submit_request)
                        .service(approve_request)
                        .service(complete_request)
                        .service(reschedule_request)
                        .service(cancel_request)
                        .service(request_feedback)
                        .service(show_invoices)
                        .service(issue_invoice)
                        .service(show_notices)
                        .service(issue_notice)
                        .service(show_feedback)
                        .service(give_feedback)
                        .service(show_profile)
                        .service(update_profile)
                        .service(change_password)
                        .service(delete_profile)
                        .service(show_users)
                        .service(add_officer)
                        .service(delete_officer)
                        .service(delete_resident),
                )
                .app_data(web::Data::new(tera.clone()))
                .app_data(web::Data::new(gateway.clone()))
                .app_data(web::Data::new(server_config.clone()))
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
