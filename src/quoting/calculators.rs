//! Core estimation functions.
//!
//! Pure functions for lane distance, price, transit time and emissions.
//! No I/O and no hidden state: identical inputs always give identical outputs.

use rust_decimal::Decimal;

use crate::quoting::models::{DistanceHeuristic, ModeProfile};

/// Floor of the density adjustment
const MIN_DENSITY_ADJUSTMENT: f64 = 0.6;

/// Kilograms per cubic meter used for dimensional weight
const DIM_FACTOR_KG_PER_M3: f64 = 167.0;

/// Fraction of a service level's nominal days that transit never undercuts
const SPEED_HINT_FLOOR: f64 = 0.6;

/// Source of lane distance estimates.
///
/// Downstream code only relies on a non-negative result that is zero when
/// either location is missing.
pub trait DistanceEstimator {
    fn estimate_km(&self, origin: &str, destination: &str) -> f64;
}

impl DistanceEstimator for DistanceHeuristic {
    fn estimate_km(&self, origin: &str, destination: &str) -> f64 {
        estimate_distance_km(self, origin, destination)
    }
}

/// Estimate lane distance from two free-text locations.
///
/// Stand-in for a geocoding service: a base offset plus terms for the
/// difference in name length and in the first characters' code points.
/// Returns 0 when either location is empty.
pub fn estimate_distance_km(heuristic: &DistanceHeuristic, origin: &str, destination: &str) -> f64 {
    let (Some(first_origin), Some(first_destination)) =
        (origin.chars().next(), destination.chars().next())
    else {
        return 0.0;
    };

    let length_delta = (origin.chars().count() as f64 - destination.chars().count() as f64).abs();
    let code_point_delta = (first_origin as u32 as f64 - first_destination as u32 as f64).abs();

    heuristic.base_km
        + length_delta * heuristic.per_length_char_km
        + code_point_delta * heuristic.per_code_point_km
}

/// Dimensional-weight adjustment: light, bulky freight bills closer to its
/// volumetric weight, never below 0.6x.
///
/// A zero or non-finite denominator yields the floor.
pub fn density_adjustment(weight_kg: f64, volume_m3: f64) -> f64 {
    let volumetric_kg = volume_m3 * DIM_FACTOR_KG_PER_M3;
    if volumetric_kg.is_finite() && volumetric_kg > 0.0 {
        (weight_kg / volumetric_kg).max(MIN_DENSITY_ADJUSTMENT)
    } else {
        MIN_DENSITY_ADJUSTMENT
    }
}

/// Sub-linear distance adjustment
pub fn distance_adjustment(distance_km: f64) -> f64 {
    (distance_km + 20.0).ln() / 5.0
}

/// Estimate the base price of moving a shipment.
///
/// `multiplier` carries the service level and any per-carrier scaling.
/// The result is rounded to a whole currency unit and never below
/// `min_price`.
///
/// # Examples
/// ```
/// use freight_quotes::quoting::calculators::estimate_base_rate;
/// use freight_quotes::quoting::models::{RateTables, TransportMode};
///
/// let tables = RateTables::default();
/// let road = tables.mode(TransportMode::Road);
/// let price = estimate_base_rate(10.0, 0.0, 0.0, 1.0, road, tables.min_price);
/// assert_eq!(price, rust_decimal::Decimal::from(53));
/// ```
pub fn estimate_base_rate(
    weight_kg: f64,
    volume_m3: f64,
    distance_km: f64,
    multiplier: f64,
    mode: &ModeProfile,
    min_price: Decimal,
) -> Decimal {
    let linear = weight_kg * 0.8 + volume_m3 * 50.0;
    let raw = linear
        * multiplier
        * mode.rate_multiplier
        * distance_adjustment(distance_km)
        * density_adjustment(weight_kg, volume_m3)
        + 50.0;

    // `as` saturates and maps NaN to zero, which the floor then absorbs
    Decimal::from(raw.round() as i64).max(min_price)
}

/// Estimate transit time in whole days.
///
/// The slower of the mode's average speed and 60% of the service level's
/// nominal days, rounded up. Always at least one day.
pub fn estimate_transit_days(distance_km: f64, mode: &ModeProfile, speed_hint_days: f64) -> u32 {
    let by_speed = distance_km / mode.speed_km_per_day;
    let days = by_speed.max(speed_hint_days * SPEED_HINT_FLOOR).ceil();
    (days as u32).max(1)
}

/// Estimate CO2-equivalent emissions in whole kilograms
pub fn estimate_co2e_kg(mode: &ModeProfile, distance_km: f64, weight_kg: f64) -> u64 {
    let tonne_km = weight_kg / 1000.0 * distance_km;
    let grams = tonne_km * mode.emission_factor_g_per_tkm;
    (grams / 1000.0).round().max(0.0) as u64
}
