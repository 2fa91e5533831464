//! Probability calibration
//!
//! Turns base scores into a calibrated distribution:
//!
//! 1. Normalize base scores to probabilities
//! 2. Blend with the upstream detection confidence
//! 3. Platt-style logistic calibration per label
//! 4. Renormalize and round to 4 decimals

use crate::planet::habitability::round_to;
use serde::{Deserialize, Serialize};

/// Probabilities are clamped into (EPSILON, 1 - EPSILON) before calibration
const EPSILON: f64 = 1e-6;

/// Affine-then-logistic probability remapping: `1 / (1 + e^-(a*(p - 0.5) + b))`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlattCalibrator {
    /// Slope
    pub a: f64,
    /// Offset
    pub b: f64,
}

impl PlattCalibrator {
    /// Create a calibrator with the given coefficients
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// Calibrate a single probability
    pub fn calibrate(&self, p: f64) -> f64 {
        let p = p.clamp(EPSILON, 1.0 - EPSILON);
        let z = self.a * (p - 0.5) + self.b;
        1.0 / (1.0 + (-z).exp())
    }
}

/// Normalize scores to sum to 1
///
/// A zero (or negative) sum is replaced by 1, leaving all-zero scores as zeros.
pub fn normalize(scores: &[f64]) -> Vec<f64> {
    let sum: f64 = scores.iter().sum();
    let sum = if sum > 0.0 { sum } else { 1.0 };
    scores.iter().map(|s| s / sum).collect()
}

/// Scale a probability by upstream confidence: `p * (0.6 + 0.4 * ai_confidence)`
pub fn blend_confidence(p: f64, ai_confidence: f64) -> f64 {
    p * (0.6 + 0.4 * ai_confidence)
}

/// Full calibration chain from base scores to a rounded distribution
///
/// The output has the same length and order as `base_scores` and sums to 1
/// within rounding error (at most `n * 5e-5`).
pub fn calibrate_scores(
    base_scores: &[f64],
    ai_confidence: f64,
    calibrator: &PlattCalibrator,
) -> Vec<f64> {
    let calibrated: Vec<f64> = normalize(base_scores)
        .into_iter()
        .map(|p| calibrator.calibrate(blend_confidence(p, ai_confidence)))
        .collect();

    normalize(&calibrated)
        .into_iter()
        .map(|p| round_to(p, 4))
        .collect()
}

/// Classification confidence from the winning probability
///
/// `min(0.999, 0.45 + 0.45 * top + 0.25 * (ai_confidence - 0.7))`, rounded to 3
/// decimals. Not clamped below; a negative value is a (very) low confidence.
pub fn classification_confidence(top_probability: f64, ai_confidence: f64) -> f64 {
    let confidence = 0.45 + 0.45 * top_probability + 0.25 * (ai_confidence - 0.7);
    round_to(confidence.min(0.999), 3)
}
