//! Feature vector extraction
//!
//! The single place where loosely-typed planet attributes are validated and
//! replaced by fixed defaults. Every downstream heuristic consumes the
//! [`FeatureVector`] and never looks at raw record fields directly.

use super::record::PlanetRecord;
use serde::{Deserialize, Serialize};

/// Default mass in Earth masses
pub const DEFAULT_MASS: f64 = 1.0;
/// Default radius in Earth radii
pub const DEFAULT_RADIUS: f64 = 1.0;
/// Default equilibrium temperature in Kelvin
pub const DEFAULT_TEMPERATURE: f64 = 288.0;
/// Default orbital period in days
pub const DEFAULT_ORBITAL_PERIOD: f64 = 365.0;
/// Default distance in parsecs
pub const DEFAULT_DISTANCE: f64 = 100.0;
/// Default follow-up observation count
pub const DEFAULT_FOLLOW_UP: f64 = 0.0;
/// Default upstream detection confidence
pub const DEFAULT_AI_CONFIDENCE: f64 = 0.75;

/// Normalized numeric view of a [`PlanetRecord`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Mass in Earth masses (> 0)
    pub mass: f64,
    /// Radius in Earth radii (> 0)
    pub radius: f64,
    /// Temperature in Kelvin (> 0)
    pub temperature: f64,
    /// Orbital period in days (> 0)
    pub orbital_period: f64,
    /// Distance in parsecs (> 0)
    pub distance: f64,
    /// True when the atmosphere has been characterized
    pub has_atmosphere: bool,
    /// Lower-cased atmosphere description (empty when absent)
    pub atmosphere: String,
    /// Follow-up observation count (>= 0)
    pub follow_up: f64,
    /// Upstream detection confidence in [0, 1]
    pub ai_confidence: f64,
}

impl FeatureVector {
    /// True when the atmosphere description mentions water
    pub fn has_water_signature(&self) -> bool {
        self.atmosphere.contains("h2o") || self.atmosphere.contains("water")
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        to_feature_vector(&PlanetRecord::default())
    }
}

/// Derive a [`FeatureVector`] from a planet record
///
/// Missing, non-finite, or out-of-domain values are replaced by the module
/// defaults: mass, radius, temperature, orbital period and distance must be
/// strictly positive, follow-up counts non-negative, and `ai_confidence`
/// within [0, 1]. An atmosphere of "Unknown" (any case) or blank counts as
/// absent.
///
/// # Example
///
/// ```
/// use exo_insight::planet::{to_feature_vector, PlanetRecord};
///
/// let planet = PlanetRecord { mass: Some(-3.0), ..PlanetRecord::named("X") };
/// let fv = to_feature_vector(&planet);
/// assert_eq!(fv.mass, 1.0);
/// assert_eq!(fv.temperature, 288.0);
/// ```
pub fn to_feature_vector(planet: &PlanetRecord) -> FeatureVector {
    let mass = positive_or(planet.mass, DEFAULT_MASS);
    let radius = positive_or(planet.radius, DEFAULT_RADIUS);
    let temperature = positive_or(planet.temperature, DEFAULT_TEMPERATURE);
    let orbital_period = positive_or(planet.orbital_period, DEFAULT_ORBITAL_PERIOD);
    let distance = positive_or(planet.distance, DEFAULT_DISTANCE);

    let follow_up = planet
        .follow_up_observations
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(DEFAULT_FOLLOW_UP);

    let ai_confidence = planet
        .ai_confidence
        .filter(|v| v.is_finite() && (0.0..=1.0).contains(v))
        .unwrap_or(DEFAULT_AI_CONFIDENCE);

    let atmosphere = planet.atmosphere_text().trim().to_lowercase();
    let has_atmosphere = !atmosphere.is_empty() && atmosphere != "unknown";

    let fv = FeatureVector {
        mass,
        radius,
        temperature,
        orbital_period,
        distance,
        has_atmosphere,
        atmosphere: if has_atmosphere { atmosphere } else { String::new() },
        follow_up,
        ai_confidence,
    };

    log::debug!(
        "Feature vector for '{}': mass={:.3}, radius={:.3}, T={:.1}K, P={:.2}d, d={:.1}pc, atmosphere={}",
        planet.name,
        fv.mass,
        fv.radius,
        fv.temperature,
        fv.orbital_period,
        fv.distance,
        fv.has_atmosphere
    );

    fv
}

fn positive_or(value: Option<f64>, default: f64) -> f64 {
    value.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(default)
}
