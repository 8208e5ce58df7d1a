//! Forward Transverse Mercator projection of WGS84 coordinates, fixed to
//! UTM zone 23 (central meridian 45° W), the region this application serves.
//!
//! The zone is deliberately not derived from the input longitude: every site
//! in the supported portfolio falls inside zone 23, and documents produced
//! for them must all share one grid. Coordinates far outside the zone's
//! meridian band will project with degraded accuracy.

use thiserror::Error;

use crate::models::calc::{GeoCoordinate, UtmCoordinate};

// ─── WGS84 ellipsoid and grid constants ──────────────────────────────────────

/// Semi-major axis (m)
const SEMI_MAJOR_AXIS_M: f64 = 6_378_137.0;

/// Flattening
const FLATTENING: f64 = 1.0 / 298.257_223_563;

/// UTM central-meridian scale factor
const SCALE_FACTOR: f64 = 0.9996;

const FALSE_EASTING_M: f64 = 500_000.0;
const FALSE_NORTHING_SOUTH_M: f64 = 10_000_000.0;

/// Fixed output zone; 23 spans 48° W to 42° W.
pub const GRID_ZONE: u8 = 23;

/// Central meridian of zone 23 (degrees)
const CENTRAL_MERIDIAN_DEG: f64 = 6.0 * GRID_ZONE as f64 - 183.0;

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("latitude {0} is outside [-90, 90] degrees")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is outside [-180, 180] degrees")]
    LongitudeOutOfRange(f64),
}

// ─── Projection ──────────────────────────────────────────────────────────────

/// Project a WGS84 longitude/latitude pair onto the zone-23 UTM grid.
///
/// Uses the standard 5th-order forward series; easting and northing are
/// rounded to the nearest metre, and southern-hemisphere northings carry the
/// 10 000 000 m false offset.
pub fn to_utm(coordinate: GeoCoordinate) -> Result<UtmCoordinate, CoordinateError> {
    let GeoCoordinate {
        longitude,
        latitude,
    } = coordinate;
    if !latitude.is_finite() || latitude.abs() > 90.0 {
        return Err(CoordinateError::LatitudeOutOfRange(latitude));
    }
    if !longitude.is_finite() || longitude.abs() > 180.0 {
        return Err(CoordinateError::LongitudeOutOfRange(longitude));
    }

    let e2 = FLATTENING * (2.0 - FLATTENING);
    let ep2 = e2 / (1.0 - e2);

    let phi = latitude.to_radians();
    let lambda = longitude.to_radians();
    let lambda0 = CENTRAL_MERIDIAN_DEG.to_radians();

    let sin_phi = phi.sin();
    let cos_phi = phi.cos();
    let tan_phi = phi.tan();

    // Radius of curvature in the prime vertical, and series terms
    let n = SEMI_MAJOR_AXIS_M / (1.0 - e2 * sin_phi * sin_phi).sqrt();
    let t = tan_phi * tan_phi;
    let c = ep2 * cos_phi * cos_phi;
    let a = cos_phi * (lambda - lambda0);

    // Meridional arc length from the equator
    let m = SEMI_MAJOR_AXIS_M
        * ((1.0 - e2 / 4.0 - 3.0 * e2 * e2 / 64.0 - 5.0 * e2 * e2 * e2 / 256.0) * phi
            - (3.0 * e2 / 8.0 + 3.0 * e2 * e2 / 32.0 + 45.0 * e2 * e2 * e2 / 1024.0)
                * (2.0 * phi).sin()
            + (15.0 * e2 * e2 / 256.0 + 45.0 * e2 * e2 * e2 / 1024.0) * (4.0 * phi).sin()
            - (35.0 * e2 * e2 * e2 / 3072.0) * (6.0 * phi).sin());

    let easting = SCALE_FACTOR
        * n
        * (a + (1.0 - t + c) * a.powi(3) / 6.0
            + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * a.powi(5) / 120.0)
        + FALSE_EASTING_M;

    let mut northing = SCALE_FACTOR
        * (m + n
            * tan_phi
            * (a * a / 2.0
                + (5.0 - t + 9.0 * c + 4.0 * c * c) * a.powi(4) / 24.0
                + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * a.powi(6) / 720.0));
    if latitude < 0.0 {
        northing += FALSE_NORTHING_SOUTH_M;
    }

    Ok(UtmCoordinate {
        easting_m: easting.round() as i64,
        northing_m: northing.round() as i64,
        zone: GRID_ZONE,
        hemisphere: (if latitude >= 0.0 { "N" } else { "S" }).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(longitude: f64, latitude: f64) -> UtmCoordinate {
        to_utm(GeoCoordinate {
            longitude,
            latitude,
        })
        .unwrap()
    }

    #[test]
    fn sao_paulo_projects_into_zone_23_south() {
        let utm = project(-46.6333, -23.5505);
        assert_eq!(utm.zone, 23);
        assert_eq!(utm.hemisphere, "S");
        assert_eq!(utm.easting_m, 333_288);
        assert_eq!(utm.northing_m, 7_394_588, "false northing must be applied");
    }

    #[test]
    fn rio_de_janeiro_lies_east_of_the_central_meridian() {
        let utm = project(-43.1729, -22.9068);
        assert_eq!(utm.easting_m, 687_395);
        assert_eq!(utm.northing_m, 7_465_634);
        assert!(utm.easting_m > 500_000, "east of 45° W means easting above the false offset");
    }

    #[test]
    fn central_meridian_maps_to_false_easting() {
        let utm = project(-45.0, -20.0);
        assert_eq!(utm.easting_m, 500_000);

        let equator = project(-45.0, 0.0);
        assert_eq!(equator.easting_m, 500_000);
        assert_eq!(equator.northing_m, 0);
        assert_eq!(equator.hemisphere, "N", "latitude zero is treated as northern");
    }

    #[test]
    fn northern_latitudes_skip_the_false_northing() {
        let utm = project(-45.5, 2.5);
        assert_eq!(utm.hemisphere, "N");
        assert_eq!(utm.easting_m, 444_414);
        assert_eq!(utm.northing_m, 276_337);
    }

    #[test]
    fn out_of_domain_coordinates_are_rejected() {
        let bad_lat = to_utm(GeoCoordinate {
            longitude: -45.0,
            latitude: 90.5,
        });
        assert_eq!(bad_lat, Err(CoordinateError::LatitudeOutOfRange(90.5)));

        let bad_lon = to_utm(GeoCoordinate {
            longitude: -200.0,
            latitude: -20.0,
        });
        assert_eq!(bad_lon, Err(CoordinateError::LongitudeOutOfRange(-200.0)));

        assert!(to_utm(GeoCoordinate {
            longitude: f64::NAN,
            latitude: 0.0,
        })
        .is_err());
    }
}
