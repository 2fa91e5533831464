//! Follow-up priority scoring

use crate::planet::habitability::{estimate_habitability, round_to};
use crate::planet::{to_feature_vector, ConfirmationStatus, PlanetRecord};
use serde::{Deserialize, Serialize};

/// Bonus for unconfirmed candidates
pub const CANDIDATE_NOVELTY: f64 = 0.12;

/// Upper bound of the priority score
pub const MAX_PRIORITY: f64 = 0.999;

/// Weighted contributions to a priority score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityComponents {
    /// `0.5 * habitability`
    pub habitability: f64,
    /// `0.2 * ai_confidence`
    pub ai_confidence: f64,
    /// `0.1 * min(1, follow_up / 20)`
    pub follow_up: f64,
    /// `0.08 * exp(-min(1500, distance) / 500)`
    pub proximity: f64,
    /// Candidate novelty bonus
    pub novelty: f64,
}

/// Priority score for one planet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityScore {
    /// Planet name
    pub planet_name: String,
    /// Score in [0, 0.999], 3 decimals
    pub score: f64,
    /// Habitability value used
    pub habitability: f64,
    /// True when the habitability was estimated rather than supplied
    pub habitability_estimated: bool,
    /// Unrounded weighted contributions
    pub components: PriorityComponents,
}

/// Compute the follow-up priority of a planet
///
/// `clamp(0, 0.999, 0.5*h + 0.2*ai + 0.1*min(1, n/20) + 0.08*exp(-min(1500, d)/500) + novelty)`
///
/// Missing habitability is estimated from the feature vector; other missing
/// fields use the feature-vector defaults.
pub fn calculate_priority_score(planet: &PlanetRecord) -> PriorityScore {
    let fv = to_feature_vector(planet);

    let supplied = planet.habitability_score.filter(|h| h.is_finite());
    let habitability_estimated = supplied.is_none();
    let habitability = supplied.unwrap_or_else(|| estimate_habitability(&fv));

    let components = PriorityComponents {
        habitability: 0.5 * habitability,
        ai_confidence: 0.2 * fv.ai_confidence,
        follow_up: 0.1 * (fv.follow_up / 20.0).min(1.0),
        proximity: 0.08 * (-fv.distance.min(1500.0) / 500.0).exp(),
        novelty: if planet.confirmed_status == ConfirmationStatus::Candidate {
            CANDIDATE_NOVELTY
        } else {
            0.0
        },
    };

    let raw = components.habitability
        + components.ai_confidence
        + components.follow_up
        + components.proximity
        + components.novelty;
    let score = round_to(raw.clamp(0.0, MAX_PRIORITY), 3);

    log::debug!(
        "Priority for '{}': {:.3} (habitability={:.3}{})",
        planet.name,
        score,
        habitability,
        if habitability_estimated { ", estimated" } else { "" }
    );

    PriorityScore {
        planet_name: planet.name.clone(),
        score,
        habitability,
        habitability_estimated,
        components,
    }
}
