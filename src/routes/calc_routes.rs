use axum::{
    routing::{get, post},
    Router,
};

use crate::controllers::calc_controller::{
    // Health & reference data
    health, get_sizing_tables,
    // Calculations
    size_circuit, convert_to_utm, estimate_generation,
    // Geocoding
    geocode,
};
use crate::shared_state::SharedState;

/// Build the `/api/*` sub-router.
/// Handlers extract `State<AppState>` and/or `State<Config>` via
/// `FromRef<SharedState>` — a single `.with_state(shared)` covers both.
pub fn api_routes(shared: SharedState) -> Router {
    Router::new()
        .route("/health",               get(health))
        .route("/sizing/tables",        get(get_sizing_tables))
        .route("/sizing/circuit",       post(size_circuit))
        .route("/coordinates/utm",      post(convert_to_utm))
        .route("/generation/estimate",  post(estimate_generation))
        .route("/geocode",              get(geocode))
        .with_state(shared)
}
