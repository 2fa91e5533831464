//! Observation planning

use crate::planet::habitability::{round_to, transit_depth_ppm};
use crate::planet::{to_feature_vector, PlanetRecord};
use serde::{Deserialize, Serialize};

/// Upper bound (exclusive) of the near tier in parsecs
pub const NEAR_LIMIT_PC: f64 = 100.0;

/// Upper bound (exclusive) of the intermediate tier in parsecs
pub const INTERMEDIATE_LIMIT_PC: f64 = 500.0;

/// Distance tier driving instrument selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceTier {
    /// Closer than 100 pc
    Near,
    /// 100 to 500 pc
    Intermediate,
    /// 500 pc or more
    Distant,
}

impl DistanceTier {
    /// Tier for a distance in parsecs
    pub fn from_distance(distance_pc: f64) -> Self {
        if distance_pc < NEAR_LIMIT_PC {
            DistanceTier::Near
        } else if distance_pc < INTERMEDIATE_LIMIT_PC {
            DistanceTier::Intermediate
        } else {
            DistanceTier::Distant
        }
    }
}

/// Observation cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cadence {
    /// Once a week
    Weekly,
    /// Once a month
    Monthly,
    /// Stack every available transit
    #[serde(rename = "Per-transit stacking")]
    PerTransitStacking,
}

impl Cadence {
    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Cadence::Weekly => "Weekly",
            Cadence::Monthly => "Monthly",
            Cadence::PerTransitStacking => "Per-transit stacking",
        }
    }
}

/// Recommended observing strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationPlan {
    /// Planet name
    pub planet_name: String,
    /// Distance tier
    pub tier: DistanceTier,
    /// Instruments, primary first
    pub instruments: Vec<String>,
    /// Exposure per visit in hours
    pub exposure_hours: f64,
    /// Revisit cadence
    pub cadence: Cadence,
    /// Expected transit depth in ppm (1 decimal)
    pub transit_depth_ppm: f64,
    /// Rationale
    pub notes: Vec<String>,
}

/// Instrument for the near tier
pub const GROUND_HIGH_RES: &str = "Ground-based high-resolution spectrograph";
/// Instrument for the intermediate tier
pub const SPACE_IR: &str = "Space-based infrared spectrograph";
/// Primary instrument for the distant tier
pub const DEEP_SPECTROSCOPY: &str = "Deep space-based spectroscopy";
/// Secondary instrument for the distant tier
pub const SUB_MM: &str = "Sub-millimeter array";
/// Added when the atmosphere shows water
pub const WATER_CROSS_CORRELATION: &str = "High-resolution water-band cross-correlation spectrograph";

/// Recommend an observation plan
///
/// Tiered by distance; a water signature in the atmosphere description adds a
/// dedicated water cross-correlation instrument regardless of tier.
///
/// # Example
///
/// ```
/// use exo_insight::planet::PlanetRecord;
/// use exo_insight::predictive::observation::{recommend_observation_plan, Cadence};
///
/// let plan = recommend_observation_plan(
///     &PlanetRecord { distance: Some(800.0), ..Default::default() },
///     1.0,
/// );
/// assert_eq!(plan.cadence, Cadence::PerTransitStacking);
/// ```
pub fn recommend_observation_plan(planet: &PlanetRecord, star_radius_solar: f64) -> ObservationPlan {
    let fv = to_feature_vector(planet);
    let tier = DistanceTier::from_distance(fv.distance);

    let (mut instruments, exposure_hours, cadence, note) = match tier {
        DistanceTier::Near => (
            vec![GROUND_HIGH_RES.to_string()],
            1.5,
            Cadence::Weekly,
            "Bright nearby target: ground-based high resolution is sufficient",
        ),
        DistanceTier::Intermediate => (
            vec![SPACE_IR.to_string()],
            3.0,
            Cadence::Monthly,
            "Moderate distance: space-based infrared avoids telluric losses",
        ),
        DistanceTier::Distant => (
            vec![DEEP_SPECTROSCOPY.to_string(), SUB_MM.to_string()],
            6.0,
            Cadence::PerTransitStacking,
            "Faint distant target: stack transits to build SNR",
        ),
    };

    let mut notes = vec![note.to_string()];
    if fv.has_water_signature() {
        instruments.push(WATER_CROSS_CORRELATION.to_string());
        notes.push("Water reported in the atmosphere: add a dedicated water cross-correlation run".to_string());
    }

    let transit_depth_ppm = round_to(transit_depth_ppm(fv.radius, star_radius_solar), 1);

    log::debug!(
        "Observation plan for '{}': {:?} tier, {} instruments, {}h, {}",
        planet.name,
        tier,
        instruments.len(),
        exposure_hours,
        cadence.as_str()
    );

    ObservationPlan {
        planet_name: planet.name.clone(),
        tier,
        instruments,
        exposure_hours,
        cadence,
        transit_depth_ppm,
        notes,
    }
}
