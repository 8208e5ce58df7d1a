//! Monthly energy-yield estimates from solar irradiance (HSP) data.
//!
//! One HSP value is the day's irradiation expressed as hours of equivalent
//! 1000 W/m² sun. Yield per month is estimated over a flat 30-day month with
//! a fixed 0.80 performance ratio covering inverter, wiring and soiling
//! losses.

const DAYS_PER_MONTH: f64 = 30.0;
const PERFORMANCE_RATIO: f64 = 0.80;

/// Estimated yield (kWh) for one month, rounded to 2 decimals.
pub fn monthly_generation(hsp: f64, power_rating_w: f64) -> f64 {
    let kwh = hsp * DAYS_PER_MONTH * (power_rating_w / 1000.0) * PERFORMANCE_RATIO;
    (kwh * 100.0).round() / 100.0
}

/// Positional per-month yields for an irradiance series. Length-agnostic;
/// the HTTP layer hands in the twelve calendar months.
pub fn generation_series(monthly_hsp: &[f64], power_rating_w: f64) -> Vec<f64> {
    monthly_hsp
        .iter()
        .map(|&hsp| monthly_generation(hsp, power_rating_w))
        .collect()
}
