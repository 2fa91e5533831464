//! Habitability and detectability heuristics

use super::features::FeatureVector;

/// Earth radius expressed in solar radii
pub const EARTH_RADIUS_IN_SOLAR: f64 = 0.009168;

/// Estimate a habitability score in [0, 1]
///
/// Combines proximity to Earth-like conditions:
/// - Temperature: Gaussian around 288 K (σ ≈ 60 K), weight 0.5
/// - Mass: log-normal around 1 Earth mass, weight 0.3
/// - Distance: observational accessibility `exp(-d/1000)`, weight 0.2
///
/// Used when a record does not carry a precomputed score.
pub fn estimate_habitability(fv: &FeatureVector) -> f64 {
    let temp_term = (-((fv.temperature - 288.0) / 60.0).powi(2)).exp();
    let mass_term = (-(fv.mass.ln().powi(2)) / 0.5).exp();
    let distance_term = (-fv.distance / 1000.0).exp();

    let score = 0.5 * temp_term + 0.3 * mass_term + 0.2 * distance_term;
    round_to(score.clamp(0.0, 1.0), 3)
}

/// Expected transit depth in parts per million
///
/// `depth = (R_p / R_s)^2`, with the planet radius in Earth radii and the
/// stellar radius in solar radii. Returns 0 for a non-positive stellar radius.
pub fn transit_depth_ppm(planet_radius_earth: f64, star_radius_solar: f64) -> f64 {
    if star_radius_solar <= 0.0 || !star_radius_solar.is_finite() {
        return 0.0;
    }
    let ratio = planet_radius_earth * EARTH_RADIUS_IN_SOLAR / star_radius_solar;
    ratio * ratio * 1e6
}

/// Round to a fixed number of decimal places
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
