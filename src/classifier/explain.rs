//! Classification explanations
//!
//! Heuristic per-feature importances plus the most probable labels.

use super::labels::PlanetType;
use crate::planet::habitability::round_to;
use crate::planet::FeatureVector;
use serde::{Deserialize, Serialize};

/// Relative influence of each input feature, summing to 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    /// Temperature departure from 288 K
    pub temperature: f64,
    /// Log-mass departure from 1 Earth mass
    pub mass: f64,
    /// Distance (saturates at 500 pc)
    pub distance: f64,
    /// Atmosphere characterization
    pub atmosphere: f64,
    /// Follow-up coverage (saturates at 20 observations)
    pub follow_up: f64,
}

impl FeatureImportance {
    /// Sum of all importances
    pub fn total(&self) -> f64 {
        self.temperature + self.mass + self.distance + self.atmosphere + self.follow_up
    }
}

/// A label with its calibrated probability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelProbability {
    /// Planet type
    pub label: PlanetType,
    /// Calibrated probability
    pub probability: f64,
}

/// Explanation attached to a classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    /// Normalized feature importances
    pub feature_importance: FeatureImportance,
    /// The three most probable labels, most probable first
    pub top_factors: Vec<LabelProbability>,
}

/// Compute normalized feature importances, rounded to 3 decimals
pub fn feature_importance(fv: &FeatureVector) -> FeatureImportance {
    let raw = [
        1.0 - (-((fv.temperature - 288.0) / 200.0).powi(2)).exp() + 0.1,
        fv.mass.log10().abs().min(1.0) + 0.05,
        (fv.distance / 500.0).min(1.0),
        if fv.has_atmosphere { 0.3 } else { 0.1 },
        (fv.follow_up / 20.0).min(1.0),
    ];
    let sum: f64 = raw.iter().sum();
    let sum = if sum > 0.0 { sum } else { 1.0 };
    let [temperature, mass, distance, atmosphere, follow_up] = raw.map(|v| round_to(v / sum, 3));

    FeatureImportance {
        temperature,
        mass,
        distance,
        atmosphere,
        follow_up,
    }
}

/// Top `n` labels by probability; ties keep enumeration order
pub fn top_labels(probabilities: &[(PlanetType, f64)], n: usize) -> Vec<LabelProbability> {
    let mut ranked: Vec<(PlanetType, f64)> = probabilities.to_vec();
    // Stable sort keeps enumeration order among equal probabilities
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked
        .into_iter()
        .take(n)
        .map(|(label, probability)| LabelProbability { label, probability })
        .collect()
}
