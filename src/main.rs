mod routes;
mod controllers;
mod services;
mod models;
mod api_docs;
mod shared_state;
mod config;

use std::net::SocketAddr;
use std::time::Duration;

use axum::{response::Html, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use utoipa::OpenApi;
use utoipa_scalar::Scalar;

use crate::api_docs::ApiDoc;
use crate::config::Config;
use crate::routes::calc_routes::api_routes;
use crate::shared_state::{AppState, SharedState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .init();

    // 1. Load configuration
    let config = match Config::load("config.json") {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config.json: {}", e);
            return;
        }
    };
    info!(
        "Configuration loaded: geocoding via {} (cache {} entries / {} s TTL)",
        config.geocoding.endpoint, config.geocoding.cache_capacity, config.geocoding.cache_ttl_secs
    );

    // 2. Initialize shared state
    let state = AppState::new(
        config.geocoding.cache_capacity,
        Duration::from_secs(config.geocoding.cache_ttl_secs),
    );
    let shared = SharedState {
        config: config.clone(),
        app: state,
    };

    // 3. Start Axum HTTP server
    let server_port = config.server.port;
    let app = Router::new()
        .nest("/api", api_routes(shared))
        .route("/scalar", get(|| async {
            Html(Scalar::new(ApiDoc::openapi()).to_html())
        }))
        .fallback_service(ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], server_port));
    info!("API server listening on http://{}", addr);
    info!("Scalar UI: http://{}/scalar", addr);

    axum_server::bind(addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}
