//! Classification result types

use super::explain::Explanation;
use super::labels::PlanetType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata describing the heuristic model that produced a result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model identifier
    pub name: String,
    /// Crate version the model ships with
    pub version: String,
    /// Calibration slope
    pub calibration_a: f64,
    /// Calibration offset
    pub calibration_b: f64,
    /// Number of labels in the output distribution
    pub label_count: usize,
}

/// Calibrated classification of one planet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Planet name the result was computed for
    pub planet_name: String,

    /// Most probable label (first in enumeration order on ties)
    pub predicted_type: PlanetType,

    /// Calibrated probability per label, summing to 1 within 1e-3
    pub probabilities: BTreeMap<PlanetType, f64>,

    /// Overall confidence, at most 0.999
    ///
    /// Not clamped below: strongly negative upstream confidence can drive this
    /// under 0, which should be read as "very low".
    pub confidence: f64,

    /// Feature importances and top-3 labels
    pub explanation: Explanation,

    /// Model metadata
    pub model: ModelInfo,
}

impl ClassificationResult {
    /// Probability assigned to a label
    pub fn probability(&self, planet_type: PlanetType) -> f64 {
        self.probabilities.get(&planet_type).copied().unwrap_or(0.0)
    }

    /// Sum of all label probabilities
    pub fn probability_sum(&self) -> f64 {
        self.probabilities.values().sum()
    }
}
