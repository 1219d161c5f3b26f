//! Simplified vehicle CO2 emission model.
//!
//! Emissions scale with travel time, are penalised for driving away from the
//! most fuel-efficient speed, and grow with uphill elevation gain:
//!
//! ```text
//! co2 = BASE_RATE × t
//!     × (1 + SPEED_PENALTY × |speed − OPTIMAL_SPEED|)   if speed known
//!     + ELEVATION_PENALTY × gain × t                    if gain > 0
//! ```
//!
//! All functions are pure.

/// Grams of CO2 per second at steady state (~9 kg/hour).
pub const BASE_EMISSION_RATE_G_PER_S: f64 = 2.5;

/// Speed with the best fuel efficiency, km/h.
pub const OPTIMAL_SPEED_KPH: f64 = 60.0;

/// Multiplier increase per km/h of deviation from [`OPTIMAL_SPEED_KPH`].
pub const SPEED_PENALTY_FACTOR: f64 = 0.015;

/// Extra grams per metre of elevation gain per second of travel.
pub const ELEVATION_PENALTY_RATE: f64 = 0.08;

/// Attributes of one edge traversal that drive its emissions.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeEmissionInput {
    /// Seconds spent on the edge.
    pub travel_time_s: f64,
    /// Effective speed on the edge, if known.
    pub speed_kph: Option<f64>,
    /// Uphill gain along the edge in metres, if any.
    pub elevation_gain_m: Option<f64>,
}

/// CO2 in grams for traversing one edge once.
///
/// Returns `0.0` for non-positive travel times.
pub fn co2_for_edge(travel_time_s: f64, speed_kph: Option<f64>, elevation_gain_m: Option<f64>) -> f64 {
    if travel_time_s <= 0.0 {
        return 0.0;
    }

    let mut co2 = BASE_EMISSION_RATE_G_PER_S * travel_time_s;

    if let Some(speed) = speed_kph.filter(|s| *s > 0.0) {
        co2 *= 1.0 + (speed - OPTIMAL_SPEED_KPH).abs() * SPEED_PENALTY_FACTOR;
    }

    if let Some(gain) = elevation_gain_m.filter(|g| *g > 0.0) {
        co2 += gain * ELEVATION_PENALTY_RATE * travel_time_s;
    }

    co2
}

/// Total CO2 in grams for a sequence of edge traversals.
pub fn co2_for_route(edges: &[EdgeEmissionInput]) -> f64 {
    edges
        .iter()
        .map(|e| co2_for_edge(e.travel_time_s, e.speed_kph, e.elevation_gain_m))
        .sum()
}
