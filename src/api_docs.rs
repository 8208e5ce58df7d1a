use utoipa::OpenApi;
use crate::controllers::calc_controller;
use crate::models::calc;

#[derive(OpenApi)]
#[openapi(
    paths(
        calc_controller::health,
        calc_controller::get_sizing_tables,
        calc_controller::size_circuit,
        calc_controller::convert_to_utm,
        calc_controller::estimate_generation,
        calc_controller::geocode
    ),
    components(
        schemas(
            calc::ConnectionType,
            calc::SizingRequest,
            calc::CircuitSizing,
            calc::BreakerSpec,
            calc::ConductorSpec,
            calc::SizingTables,
            calc::ConductorAmpacity,
            calc::GeoCoordinate,
            calc::UtmCoordinate,
            calc::GenerationRequest,
            calc::GenerationEstimate,
            calc::GeocodeResponse,
            calc::HealthStatus
        )
    ),
    tags(
        (name = "solar-sizing-api", description = "PV installation sizing & siting API")
    )
)]
pub struct ApiDoc;
