#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the crime dashboard.
//!
//! Serves the JSON API (sidebar options, chart views, map layers) over a
//! dataset loaded once at startup, plus the static frontend that draws
//! them. Every request filters the shared [`Dataset`] afresh; nothing is
//! cached or mutated.

mod handlers;
pub mod interactive;

use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use crime_dash_config::DashboardConfig;
use crime_dash_crime_models::Indicator;
use crime_dash_dataset::Dataset;
use crime_dash_render::map::MapSettings;

/// Shared application state.
pub struct AppState {
    /// The joined table, read-only.
    pub dataset: Arc<Dataset>,
    /// Indicators that get a map layer, in display order.
    pub indicators: Vec<Indicator>,
    /// Map defaults and color ramps.
    pub map: MapSettings,
}

impl AppState {
    #[must_use]
    pub fn new(config: &DashboardConfig, dataset: Arc<Dataset>) -> Self {
        Self {
            dataset,
            indicators: config.pipeline.indicators.clone(),
            map: config.map.clone(),
        }
    }
}

/// Registers the `/api` routes.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/options", web::get().to(handlers::options))
            .route("/charts", web::get().to(handlers::charts))
            .route("/map", web::get().to(handlers::map)),
    );
}

/// Starts the dashboard server over an already loaded dataset.
///
/// This is a regular async function; the caller provides the runtime
/// (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: DashboardConfig, dataset: Arc<Dataset>) -> std::io::Result<()> {
    let state = web::Data::new(AppState::new(&config, dataset));
    let bind_addr = config.server.bind_addr.clone();
    let port = config.server.port;
    let static_dir = config.server.static_dir;

    log::info!(
        "Starting server on {bind_addr}:{port} ({} rows, frontend from {})",
        state.dataset.len(),
        static_dir.display()
    );

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure_api)
            // Serve frontend static files
            .service(Files::new("/", static_dir.clone()).index_file("index.html"))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
