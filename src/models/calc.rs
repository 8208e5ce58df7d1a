use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// ─── Connection type ─────────────────────────────────────────────────────────

/// AC connection type of an inverter output circuit. Selects which ampacity
/// table and grouping derating apply during sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectionType {
    SinglePhase,
    ThreePhase,
}

impl ConnectionType {
    /// Breaker pole arrangement for this connection type.
    pub fn breaker_poles(self) -> &'static str {
        match self {
            ConnectionType::SinglePhase => "monopole",
            ConnectionType::ThreePhase => "tripole",
        }
    }

    /// Conductor bundle installed for this connection type.
    pub fn conductor_configuration(self) -> &'static str {
        match self {
            ConnectionType::SinglePhase => "1 phase + 1 neutral",
            ConnectionType::ThreePhase => "3 phases + 1 neutral",
        }
    }
}

// ─── Circuit sizing ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct SizingRequest {
    /// Rated output current of the inverter (A)
    pub nominal_current_a: f64,
    pub connection: ConnectionType,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BreakerSpec {
    /// Standard trip current (A)
    pub rating_a: u16,
    pub poles: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ConductorSpec {
    /// Standard cross-section (mm²)
    pub cross_section_mm2: u16,
    pub configuration: String,
}

/// Recommended protection and wiring for one inverter output circuit.
/// Valid results always satisfy nominal < breaker rating < conductor ampacity.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CircuitSizing {
    pub nominal_current_a: f64,
    /// Nominal current after temperature and grouping derating (A), 2 decimals
    pub corrected_current_a: f64,
    pub connection: ConnectionType,
    pub breaker: BreakerSpec,
    pub conductor: ConductorSpec,
}

/// The fixed standard tables the sizing algorithm selects from.
#[derive(Debug, Serialize, ToSchema)]
pub struct SizingTables {
    pub breaker_ratings_a: Vec<u16>,
    pub conductors: Vec<ConductorAmpacity>,
    pub temperature_factor: f64,
    pub grouping_factor_single_phase: f64,
    pub grouping_factor_three_phase: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ConductorAmpacity {
    pub cross_section_mm2: u16,
    pub single_phase_ampacity_a: u16,
    pub three_phase_ampacity_a: u16,
}

// ─── Coordinates ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct GeoCoordinate {
    /// Decimal degrees, WGS84
    pub longitude: f64,
    pub latitude: f64,
}

/// Projected UTM position, rounded to the nearest metre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UtmCoordinate {
    pub easting_m: i64,
    pub northing_m: i64,
    pub zone: u8,
    /// "N" or "S"
    pub hemisphere: String,
}

// ─── Generation estimate ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerationRequest {
    /// Hours of Sun Peak per month, January..December (12 values)
    pub monthly_hsp: Vec<f64>,
    /// Installed generation power (W)
    pub power_rating_w: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GenerationEstimate {
    /// Estimated yield per month (kWh), positionally matching the input
    pub monthly_kwh: Vec<f64>,
    pub annual_kwh: f64,
}

// ─── Geocoding ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, IntoParams)]
pub struct GeocodeParams {
    /// Free-form address to resolve
    pub q: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GeocodeResponse {
    pub query: String,
    pub coordinate: GeoCoordinate,
    /// Whether the answer came from the in-process cache
    pub cached: bool,
    pub timestamp: DateTime<Utc>,
}

// ─── Geocoding wire types (Nominatim-style response) ─────────────────────────

#[derive(Debug, Deserialize)]
pub struct GeocodingApiPlace {
    pub lat: String,
    pub lon: String,
    #[allow(dead_code)]
    pub display_name: Option<String>,
}

// ─── REST API response types ──────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub geocode_cache_entries: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_type_wire_names() {
        let single: ConnectionType = serde_json::from_str("\"single-phase\"").unwrap();
        let three: ConnectionType = serde_json::from_str("\"three-phase\"").unwrap();
        assert_eq!(single, ConnectionType::SinglePhase);
        assert_eq!(three, ConnectionType::ThreePhase);
        assert_eq!(serde_json::to_string(&single).unwrap(), "\"single-phase\"");
    }

    #[test]
    fn connection_type_labels() {
        assert_eq!(ConnectionType::SinglePhase.breaker_poles(), "monopole");
        assert_eq!(ConnectionType::ThreePhase.breaker_poles(), "tripole");
        assert_eq!(
            ConnectionType::SinglePhase.conductor_configuration(),
            "1 phase + 1 neutral"
        );
        assert_eq!(
            ConnectionType::ThreePhase.conductor_configuration(),
            "3 phases + 1 neutral"
        );
    }
}
