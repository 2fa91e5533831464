//! Planet type labels and base-score formulas
//!
//! Each type has an unnormalized base score computed from the feature vector.
//! Scores are floored at 0 and scaled by the configured per-type weight before
//! normalization.

use crate::planet::FeatureVector;
use serde::{Deserialize, Serialize};

/// Planet type label
///
/// Variant order is the fixed enumeration order used to break probability ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlanetType {
    /// Rocky, Earth-sized
    Terrestrial,
    /// Rocky, larger than Earth
    SuperEarth,
    /// Small volatile-rich envelope
    SubNeptune,
    /// Cold intermediate giant
    IceGiant,
    /// Massive gaseous planet
    GasGiant,
    /// Giant on a short-period orbit
    HotJupiter,
    /// Water-dominated surface/atmosphere
    OceanWorld,
    /// Hot, dry rocky surface
    DesertWorld,
    /// Molten rocky surface
    LavaWorld,
}

impl PlanetType {
    /// All labels in enumeration order
    pub const ALL: [PlanetType; 9] = [
        PlanetType::Terrestrial,
        PlanetType::SuperEarth,
        PlanetType::SubNeptune,
        PlanetType::IceGiant,
        PlanetType::GasGiant,
        PlanetType::HotJupiter,
        PlanetType::OceanWorld,
        PlanetType::DesertWorld,
        PlanetType::LavaWorld,
    ];

    /// Display name (e.g. "Gas Giant")
    pub fn name(&self) -> &'static str {
        match self {
            PlanetType::Terrestrial => "Terrestrial",
            PlanetType::SuperEarth => "Super-Earth",
            PlanetType::SubNeptune => "Sub-Neptune",
            PlanetType::IceGiant => "Ice Giant",
            PlanetType::GasGiant => "Gas Giant",
            PlanetType::HotJupiter => "Hot Jupiter",
            PlanetType::OceanWorld => "Ocean World",
            PlanetType::DesertWorld => "Desert World",
            PlanetType::LavaWorld => "Lava World",
        }
    }

    /// Look up a label by its display name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Unweighted base score for this type, floored at 0
    pub fn base_score(&self, fv: &FeatureVector) -> f64 {
        let m = fv.mass;
        let r = fv.radius;
        let t = fv.temperature;
        let giant = m > 15.0 || r > 3.0;

        let score = match self {
            PlanetType::Terrestrial => {
                0.5 * gaussian(m, 1.0, 0.6) + 0.5 * gaussian(r, 1.0, 0.3)
            }
            PlanetType::SuperEarth => 0.5 * band(m, 1.5, 10.0) + 0.5 * band(r, 1.2, 2.0),
            PlanetType::SubNeptune => 0.5 * band(m, 4.0, 20.0) + 0.5 * band(r, 2.0, 4.0),
            PlanetType::IceGiant => {
                if t < 180.0 {
                    0.7 + 0.5 * band(m, 10.0, 60.0)
                } else {
                    0.0
                }
            }
            PlanetType::GasGiant => {
                if giant {
                    0.5 + 0.5 * (m / 300.0).min(1.0)
                } else {
                    0.0
                }
            }
            PlanetType::HotJupiter => {
                if fv.orbital_period < 10.0 {
                    let size_factor = if giant { 1.0 } else { 0.2 };
                    (0.6 + 0.6 * (t / 1500.0).min(1.0)) * size_factor
                } else {
                    0.0
                }
            }
            PlanetType::OceanWorld => {
                if fv.atmosphere.contains("h2o") {
                    let mass_factor = if m > 15.0 { 0.3 } else { 1.0 };
                    (0.8 + 0.4 * gaussian(t, 300.0, 80.0)) * mass_factor
                } else {
                    0.0
                }
            }
            PlanetType::DesertWorld => {
                if t > 400.0 {
                    let mass_factor = if m < 10.0 { 1.0 } else { 0.3 };
                    (0.7 + 0.5 * ((t - 400.0) / 600.0).min(1.0)) * mass_factor
                } else {
                    0.0
                }
            }
            PlanetType::LavaWorld => {
                if t > 1200.0 && m < 10.0 {
                    0.9 + 0.5 * ((t - 1200.0) / 1000.0).min(1.0)
                } else {
                    0.0
                }
            }
        };

        score.max(0.0)
    }
}

/// exp(-((x - center) / width)^2)
fn gaussian(x: f64, center: f64, width: f64) -> f64 {
    (-((x - center) / width).powi(2)).exp()
}

/// 1 inside [lo, hi], decaying exponentially with relative distance outside
fn band(x: f64, lo: f64, hi: f64) -> f64 {
    if x < lo {
        (-(lo - x) / lo).exp() * 0.5
    } else if x > hi {
        (-(x - hi) / hi).exp() * 0.5
    } else {
        1.0
    }
}
