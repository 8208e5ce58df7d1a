use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::warn;

use crate::config::Config;
use crate::models::calc::{
    CircuitSizing, ConductorAmpacity, ConnectionType, GenerationEstimate, GenerationRequest,
    GeoCoordinate, GeocodeParams, GeocodeResponse, HealthStatus, SizingRequest, SizingTables,
    UtmCoordinate,
};
use crate::services::circuit_sizing::{
    self, SizingError, BREAKER_RATINGS_A, CONDUCTOR_SIZES_MM2, SINGLE_PHASE_AMPACITY_A,
    TEMPERATURE_FACTOR, THREE_PHASE_AMPACITY_A,
};
use crate::services::geocoding::{self, GeocodingError};
use crate::services::{generation, utm};
use crate::shared_state::AppState;

fn error_body(message: impl ToString) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "error": message.to_string() }))
}

/// GET /api/health
/// Service liveness and cache occupancy
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up", body = HealthStatus)
    )
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        geocode_cache_entries: state.geocode_cache_entries(),
    })
}

/// GET /api/sizing/tables
/// The standard breaker/conductor tables and derating factors
///
/// Returns the fixed tables the sizing algorithm selects from, for display
/// alongside a sizing result.
#[utoipa::path(
    get,
    path = "/api/sizing/tables",
    responses(
        (status = 200, description = "Standard sizing tables", body = SizingTables)
    )
)]
pub async fn get_sizing_tables() -> impl IntoResponse {
    let conductors = CONDUCTOR_SIZES_MM2
        .iter()
        .zip(SINGLE_PHASE_AMPACITY_A.iter())
        .zip(THREE_PHASE_AMPACITY_A.iter())
        .map(|((&size, &single), &three)| ConductorAmpacity {
            cross_section_mm2: size,
            single_phase_ampacity_a: single,
            three_phase_ampacity_a: three,
        })
        .collect();
    Json(SizingTables {
        breaker_ratings_a: BREAKER_RATINGS_A.to_vec(),
        conductors,
        temperature_factor: TEMPERATURE_FACTOR,
        grouping_factor_single_phase: circuit_sizing::grouping_factor(ConnectionType::SinglePhase),
        grouping_factor_three_phase: circuit_sizing::grouping_factor(ConnectionType::ThreePhase),
    })
}

/// POST /api/sizing/circuit
/// Recommend breaker and conductor for an inverter output circuit
///
/// Selects the smallest standard breaker above the nominal current and the
/// smallest standard conductor whose ampacity covers the derated current.
/// Currents past the standard tables are rejected rather than approximated.
#[utoipa::path(
    post,
    path = "/api/sizing/circuit",
    request_body = SizingRequest,
    responses(
        (status = 200, description = "Recommended breaker and conductor", body = CircuitSizing),
        (status = 400, description = "Nominal current is not a positive finite number"),
        (status = 422, description = "No standard component covers the requested current")
    )
)]
pub async fn size_circuit(Json(request): Json<SizingRequest>) -> impl IntoResponse {
    match circuit_sizing::size_circuit(request.nominal_current_a, request.connection) {
        Ok(sizing) => (StatusCode::OK, Json(sizing)).into_response(),
        Err(err @ SizingError::InvalidCurrent(_)) => {
            (StatusCode::BAD_REQUEST, error_body(err)).into_response()
        }
        Err(err) => {
            warn!("sizing rejected: {}", err);
            (StatusCode::UNPROCESSABLE_ENTITY, error_body(err)).into_response()
        }
    }
}

/// POST /api/coordinates/utm
/// Project WGS84 coordinates onto the zone-23 UTM grid
///
/// Easting and northing are rounded to the nearest metre. The zone is fixed
/// to 23 (the supported region), not derived from the longitude.
#[utoipa::path(
    post,
    path = "/api/coordinates/utm",
    request_body = GeoCoordinate,
    responses(
        (status = 200, description = "Projected UTM position", body = UtmCoordinate),
        (status = 400, description = "Coordinates outside valid ranges")
    )
)]
pub async fn convert_to_utm(Json(coordinate): Json<GeoCoordinate>) -> impl IntoResponse {
    match utm::to_utm(coordinate) {
        Ok(projected) => (StatusCode::OK, Json(projected)).into_response(),
        Err(err) => (StatusCode::BAD_REQUEST, error_body(err)).into_response(),
    }
}

/// POST /api/generation/estimate
/// Monthly and annual yield estimate from a 12-month HSP series
#[utoipa::path(
    post,
    path = "/api/generation/estimate",
    request_body = GenerationRequest,
    responses(
        (status = 200, description = "Estimated monthly and annual yield", body = GenerationEstimate),
        (status = 400, description = "Series is not 12 non-negative values, or power is invalid")
    )
)]
pub async fn estimate_generation(Json(request): Json<GenerationRequest>) -> impl IntoResponse {
    if request.monthly_hsp.len() != 12 {
        return (
            StatusCode::BAD_REQUEST,
            error_body(format!(
                "expected 12 monthly HSP values, got {}",
                request.monthly_hsp.len()
            )),
        )
            .into_response();
    }
    if request
        .monthly_hsp
        .iter()
        .any(|hsp| !hsp.is_finite() || *hsp < 0.0)
    {
        return (
            StatusCode::BAD_REQUEST,
            error_body("monthly HSP values must be non-negative finite numbers"),
        )
            .into_response();
    }
    if !request.power_rating_w.is_finite() || request.power_rating_w <= 0.0 {
        return (
            StatusCode::BAD_REQUEST,
            error_body("power rating must be a positive finite number of watts"),
        )
            .into_response();
    }

    let monthly_kwh = generation::generation_series(&request.monthly_hsp, request.power_rating_w);
    let annual_kwh = (monthly_kwh.iter().sum::<f64>() * 100.0).round() / 100.0;
    (
        StatusCode::OK,
        Json(GenerationEstimate {
            monthly_kwh,
            annual_kwh,
        }),
    )
        .into_response()
}

/// GET /api/geocode
/// Resolve a free-form address to WGS84 coordinates
///
/// Results are cached in-process; repeated lookups for the same address do
/// not hit the upstream geocoder until the entry expires.
#[utoipa::path(
    get,
    path = "/api/geocode",
    params(GeocodeParams),
    responses(
        (status = 200, description = "Resolved coordinate", body = GeocodeResponse),
        (status = 404, description = "No match for the query"),
        (status = 502, description = "Upstream geocoder unavailable")
    )
)]
pub async fn geocode(
    Query(params): Query<GeocodeParams>,
    State(config): State<Config>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let query = params.q.trim();
    if query.is_empty() {
        return (StatusCode::BAD_REQUEST, error_body("query must not be empty")).into_response();
    }

    match geocoding::resolve(&config.geocoding, &state.geocoding_cache, query).await {
        Ok((coordinate, cached)) => (
            StatusCode::OK,
            Json(GeocodeResponse {
                query: query.to_string(),
                coordinate,
                cached,
                timestamp: chrono::Utc::now(),
            }),
        )
            .into_response(),
        Err(err @ GeocodingError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, error_body(err)).into_response()
        }
        Err(err) => {
            warn!("geocoding failed: {}", err);
            (StatusCode::BAD_GATEWAY, error_body(err)).into_response()
        }
    }
}
