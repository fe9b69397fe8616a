//! Server construction and middleware wiring.

mod config;
mod settings;

pub use config::ServerConfig;
pub use settings::AppSettings;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use bookshelf::Trace;
#[cfg(debug_assertions)]
use bookshelf::doc::ApiDoc;
use bookshelf::domain::{Author, Book, BookAuthor, Catalogue};
use bookshelf::inbound::http::configure_api;
use bookshelf::inbound::http::health::{HealthState, live, ready};
use bookshelf::inbound::http::state::HttpState;
use bookshelf::outbound::persistence::{DbPool, DieselEntityStore};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn diesel_catalogue(pool: &DbPool) -> Catalogue {
    Catalogue::new(
        Arc::new(DieselEntityStore::<Book>::new(pool.clone())),
        Arc::new(DieselEntityStore::<Author>::new(pool.clone())),
        Arc::new(DieselEntityStore::<BookAuthor>::new(pool.clone())),
    )
}

fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => HttpState::new(diesel_catalogue(pool)),
        None => HttpState::in_memory(),
    };
    web::Data::new(state)
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure_api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Readiness is flipped once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config);
    let backend = if config.db_pool.is_some() {
        "postgres"
    } else {
        "memory"
    };
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr)?
    .run();

    info!(bind_addr = %config.bind_addr, backend, "server listening");
    health_state.mark_ready();
    Ok(server)
}
