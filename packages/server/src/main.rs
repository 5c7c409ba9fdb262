#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the sitescope property analyzer.
//!
//! Serves the REST API for analyzing addresses (traffic estimates plus
//! nearby-business breakdowns) and the static dashboard frontend.

mod handlers;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use sitescope_traffic::TrafficEstimator;

/// Shared application state.
pub struct AppState {
    /// HTTP client shared by every provider call.
    pub client: reqwest::Client,
    /// Traffic estimation strategy chosen from the provider registry.
    pub estimator: TrafficEstimator,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let client = sitescope_providers::http_client().expect("Failed to build HTTP client");
    let estimator = TrafficEstimator::from_registry(&client);
    if estimator.uses_live_probes() {
        log::info!("Routing service enabled; traffic estimates use live probes");
    }

    let state = web::Data::new(AppState { client, estimator });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/categories", web::get().to(handlers::categories))
                    .route("/analyze", web::get().to(handlers::analyze))
                    .route("/traffic", web::get().to(handlers::traffic))
                    .route("/businesses", web::get().to(handlers::businesses)),
            )
            // Serve frontend static files (production)
            .service(Files::new("/", "app/dist").index_file("index.html"))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
