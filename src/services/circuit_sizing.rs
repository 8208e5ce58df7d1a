//! Breaker and conductor sizing for inverter output circuits.
//!
//! Selection walks fixed standard tables and must end in a discriminated
//! sequence: nominal current < breaker trip rating < conductor ampacity.
//! The tables are the two- and three-loaded-conductor ampacity columns for
//! PVC-insulated copper in conduit, with fixed temperature and grouping
//! deratings applied to the load before the conductor lookup.

use thiserror::Error;

use crate::models::calc::{BreakerSpec, CircuitSizing, ConductorSpec, ConnectionType};

// ─── Standard tables ─────────────────────────────────────────────────────────

/// Standard breaker trip currents (A), ascending.
pub const BREAKER_RATINGS_A: [u16; 10] = [20, 25, 32, 40, 50, 63, 70, 80, 100, 125];

/// Standard conductor cross-sections (mm²), ascending.
pub const CONDUCTOR_SIZES_MM2: [u16; 8] = [4, 6, 10, 16, 25, 35, 50, 70];

/// Ampacity (A) per cross-section, two loaded conductors (phase + neutral).
pub const SINGLE_PHASE_AMPACITY_A: [u16; 8] = [32, 41, 57, 76, 101, 125, 151, 192];

/// Ampacity (A) per cross-section, three loaded conductors.
pub const THREE_PHASE_AMPACITY_A: [u16; 8] = [28, 36, 50, 68, 89, 110, 134, 171];

/// Ambient temperature derating.
pub const TEMPERATURE_FACTOR: f64 = 0.94;

const GROUPING_FACTOR_SINGLE_PHASE: f64 = 0.65;
const GROUPING_FACTOR_THREE_PHASE: f64 = 0.85;

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SizingError {
    #[error("nominal current must be a positive finite value, got {0}")]
    InvalidCurrent(f64),
    #[error("no standard breaker rating above {0:.2} A (largest is 125 A)")]
    BreakerOutOfRange(f64),
    #[error("corrected current {0:.2} A exceeds the ampacity of the largest standard conductor (70 mm²)")]
    ConductorOutOfRange(f64),
    #[error(
        "sizing sequence violated for {nominal:.2} A: breaker {breaker_a} A, conductor ampacity {ampacity_a} A"
    )]
    InvalidSizingSequence {
        nominal: f64,
        breaker_a: u16,
        ampacity_a: u16,
    },
}

// ─── Selection ───────────────────────────────────────────────────────────────

pub fn grouping_factor(connection: ConnectionType) -> f64 {
    match connection {
        ConnectionType::SinglePhase => GROUPING_FACTOR_SINGLE_PHASE,
        ConnectionType::ThreePhase => GROUPING_FACTOR_THREE_PHASE,
    }
}

fn ampacity_table(connection: ConnectionType) -> &'static [u16; 8] {
    match connection {
        ConnectionType::SinglePhase => &SINGLE_PHASE_AMPACITY_A,
        ConnectionType::ThreePhase => &THREE_PHASE_AMPACITY_A,
    }
}

fn validate_current(current_a: f64) -> Result<f64, SizingError> {
    if !current_a.is_finite() || current_a <= 0.0 {
        return Err(SizingError::InvalidCurrent(current_a));
    }
    Ok(current_a)
}

/// Smallest standard breaker rating strictly greater than the nominal current.
///
/// A load exactly equal to a rating must trip up to the next one, so 40 A
/// selects the 50 A breaker.
pub fn select_breaker(nominal_current_a: f64) -> Result<u16, SizingError> {
    let nominal = validate_current(nominal_current_a)?;
    BREAKER_RATINGS_A
        .iter()
        .copied()
        .find(|&rating| f64::from(rating) > nominal)
        .ok_or(SizingError::BreakerOutOfRange(nominal))
}

/// Nominal current divided by the temperature and grouping deratings.
pub fn corrected_current(
    nominal_current_a: f64,
    connection: ConnectionType,
) -> Result<f64, SizingError> {
    let nominal = validate_current(nominal_current_a)?;
    Ok(nominal / (TEMPERATURE_FACTOR * grouping_factor(connection)))
}

/// Smallest standard cross-section whose ampacity covers the corrected current.
pub fn select_conductor(
    corrected_current_a: f64,
    connection: ConnectionType,
) -> Result<u16, SizingError> {
    let corrected = validate_current(corrected_current_a)?;
    let table = ampacity_table(connection);
    CONDUCTOR_SIZES_MM2
        .iter()
        .zip(table.iter())
        .find(|&(_, &amp)| f64::from(amp) >= corrected)
        .map(|(&size, _)| size)
        .ok_or(SizingError::ConductorOutOfRange(corrected))
}

/// Ampacity of a standard cross-section for the given connection type, if the
/// size is tabulated.
pub fn ampacity(cross_section_mm2: u16, connection: ConnectionType) -> Option<u16> {
    CONDUCTOR_SIZES_MM2
        .iter()
        .position(|&size| size == cross_section_mm2)
        .map(|idx| ampacity_table(connection)[idx])
}

/// Full sizing pass: breaker, derated current, conductor, then a re-check of
/// the discrimination sequence. A sequence violation means the tables are
/// inconsistent and is reported as a hard error, never patched over.
pub fn size_circuit(
    nominal_current_a: f64,
    connection: ConnectionType,
) -> Result<CircuitSizing, SizingError> {
    let nominal = validate_current(nominal_current_a)?;
    let breaker_a = select_breaker(nominal)?;
    let corrected = corrected_current(nominal, connection)?;
    let cross_section = select_conductor(corrected, connection)?;

    // A missing table entry collapses to ampacity 0 and fails the check below.
    let ampacity_a = ampacity(cross_section, connection).unwrap_or(0);
    if !(nominal < f64::from(breaker_a) && breaker_a < ampacity_a) {
        return Err(SizingError::InvalidSizingSequence {
            nominal,
            breaker_a,
            ampacity_a,
        });
    }

    Ok(CircuitSizing {
        nominal_current_a: nominal,
        corrected_current_a: (corrected * 100.0).round() / 100.0,
        connection,
        breaker: BreakerSpec {
            rating_a: breaker_a,
            poles: connection.breaker_poles().to_string(),
        },
        conductor: ConductorSpec {
            cross_section_mm2: cross_section,
            configuration: connection.conductor_configuration().to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breaker_is_smallest_strictly_greater_rating() {
        assert_eq!(select_breaker(10.0).unwrap(), 20);
        assert_eq!(select_breaker(19.99).unwrap(), 20);
        assert_eq!(select_breaker(20.0).unwrap(), 25, "exact rating must step up");
        assert_eq!(select_breaker(40.0).unwrap(), 50, "exact rating must step up");
        assert_eq!(select_breaker(124.9).unwrap(), 125);
    }

    #[test]
    fn breaker_out_of_range_at_table_top() {
        assert_eq!(select_breaker(125.0), Err(SizingError::BreakerOutOfRange(125.0)));
        assert!(matches!(
            select_breaker(300.0),
            Err(SizingError::BreakerOutOfRange(_))
        ));
    }

    #[test]
    fn rejects_nonsense_currents() {
        assert!(matches!(select_breaker(0.0), Err(SizingError::InvalidCurrent(_))));
        assert!(matches!(select_breaker(-5.0), Err(SizingError::InvalidCurrent(_))));
        assert!(matches!(
            select_breaker(f64::NAN),
            Err(SizingError::InvalidCurrent(_))
        ));
        assert!(matches!(
            corrected_current(f64::INFINITY, ConnectionType::SinglePhase),
            Err(SizingError::InvalidCurrent(_))
        ));
    }

    #[test]
    fn corrected_current_applies_both_deratings() {
        let single = corrected_current(30.0, ConnectionType::SinglePhase).unwrap();
        assert!(
            (single - 30.0 / (0.94 * 0.65)).abs() < 1e-9,
            "single-phase corrected current, got {single}"
        );
        let three = corrected_current(30.0, ConnectionType::ThreePhase).unwrap();
        assert!((three - 30.0 / (0.94 * 0.85)).abs() < 1e-9);
        assert!(three < single, "lighter grouping derating must correct less");
    }

    #[test]
    fn conductor_is_smallest_size_with_sufficient_ampacity() {
        // 57 A is exactly the 10 mm² single-phase ampacity: >= qualifies.
        assert_eq!(select_conductor(57.0, ConnectionType::SinglePhase).unwrap(), 10);
        assert_eq!(select_conductor(57.1, ConnectionType::SinglePhase).unwrap(), 16);
        assert_eq!(select_conductor(57.0, ConnectionType::ThreePhase).unwrap(), 16);
        assert_eq!(select_conductor(5.0, ConnectionType::ThreePhase).unwrap(), 4);
    }

    #[test]
    fn conductor_out_of_range_past_largest_size() {
        assert!(matches!(
            select_conductor(192.1, ConnectionType::SinglePhase),
            Err(SizingError::ConductorOutOfRange(_))
        ));
        assert!(matches!(
            select_conductor(171.1, ConnectionType::ThreePhase),
            Err(SizingError::ConductorOutOfRange(_))
        ));
    }

    #[test]
    fn sizes_a_30a_single_phase_circuit() {
        let result = size_circuit(30.0, ConnectionType::SinglePhase).unwrap();
        assert_eq!(result.breaker.rating_a, 40);
        assert_eq!(result.breaker.poles, "monopole");
        // 30 / (0.94 × 0.65) ≈ 49.10 A → first size at or above is 10 mm² (57 A)
        assert!((result.corrected_current_a - 49.10).abs() < 0.01);
        assert_eq!(result.conductor.cross_section_mm2, 10);
        assert_eq!(result.conductor.configuration, "1 phase + 1 neutral");
    }

    #[test]
    fn sizes_a_three_phase_circuit_near_the_table_top() {
        let result = size_circuit(124.0, ConnectionType::ThreePhase).unwrap();
        assert_eq!(result.breaker.rating_a, 125);
        assert_eq!(result.breaker.poles, "tripole");
        assert_eq!(result.conductor.cross_section_mm2, 70);
        assert_eq!(result.conductor.configuration, "3 phases + 1 neutral");
    }

    #[test]
    fn single_phase_124a_exceeds_conductor_table() {
        // Breaker fits (125 A) but 124 / 0.611 ≈ 203 A is past 192 A at 70 mm².
        assert!(matches!(
            size_circuit(124.0, ConnectionType::SinglePhase),
            Err(SizingError::ConductorOutOfRange(_))
        ));
    }

    #[test]
    fn discrimination_invariant_holds_for_every_valid_result() {
        for connection in [ConnectionType::SinglePhase, ConnectionType::ThreePhase] {
            let mut nominal = 0.5;
            while nominal < 125.0 {
                match size_circuit(nominal, connection) {
                    Ok(result) => {
                        let amp = ampacity(result.conductor.cross_section_mm2, connection)
                            .expect("tabulated size");
                        assert!(
                            nominal < f64::from(result.breaker.rating_a)
                                && result.breaker.rating_a < amp,
                            "sequence broken at {nominal} A ({connection:?}): breaker {} A, ampacity {} A",
                            result.breaker.rating_a,
                            amp
                        );
                    }
                    Err(SizingError::ConductorOutOfRange(_)) => {}
                    Err(other) => panic!("unexpected error at {nominal} A: {other}"),
                }
                nominal += 0.5;
            }
        }
    }

    #[test]
    fn ampacity_lookup_matches_tables() {
        assert_eq!(ampacity(10, ConnectionType::SinglePhase), Some(57));
        assert_eq!(ampacity(16, ConnectionType::SinglePhase), Some(76));
        assert_eq!(ampacity(70, ConnectionType::ThreePhase), Some(171));
        assert_eq!(ampacity(12, ConnectionType::SinglePhase), None);
    }
}
