//! Configuration parameters for the analysis engine

use crate::classifier::labels::PlanetType;
use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result cache sizing policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CachePolicy {
    /// Never evict (default)
    #[default]
    Unbounded,
    /// Keep at most this many results, evicting the oldest inserted first.
    /// A capacity of 0 disables caching.
    Capacity(usize),
}

/// Classifier configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Calibration slope `a` in `z = a*(p - 0.5) + b` (default: 4.0)
    pub calibration_a: f64,

    /// Calibration offset `b` in `z = a*(p - 0.5) + b` (default: 0.0)
    pub calibration_b: f64,

    /// Per-type multipliers applied to base scores (default: 1.0 for every type)
    ///
    /// Types not present in the map use 1.0.
    pub type_weights: BTreeMap<PlanetType, f64>,

    /// Cache sizing policy (default: Unbounded)
    pub cache_policy: CachePolicy,
}

impl ClassifierConfig {
    /// Weight for a planet type
    pub fn weight(&self, planet_type: PlanetType) -> f64 {
        self.type_weights.get(&planet_type).copied().unwrap_or(1.0)
    }

    /// Validate parameter ranges
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidConfig` for non-finite calibration
    /// coefficients or negative / non-finite type weights.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !self.calibration_a.is_finite() || !self.calibration_b.is_finite() {
            return Err(AnalysisError::InvalidConfig(format!(
                "calibration coefficients must be finite, got a={}, b={}",
                self.calibration_a, self.calibration_b
            )));
        }
        for (planet_type, weight) in &self.type_weights {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(AnalysisError::InvalidConfig(format!(
                    "weight for {} must be finite and non-negative, got {}",
                    planet_type.name(),
                    weight
                )));
            }
        }
        Ok(())
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            calibration_a: 4.0,
            calibration_b: 0.0,
            type_weights: BTreeMap::new(),
            cache_policy: CachePolicy::Unbounded,
        }
    }
}

/// Spectral analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectralConfig {
    /// Moving-average window in samples, must be odd (default: 7)
    pub smoothing_window: usize,

    /// Minimum continuum window in samples (default: 11)
    /// The actual window is `max(min_continuum_window, n / 20)`, made odd.
    pub min_continuum_window: usize,

    /// Percentile rank taken as the local continuum (default: 0.9)
    pub continuum_percentile: f64,

    /// Minimum mean SNR for a window to count as a detection (default: 5.0)
    pub min_snr_for_detection: f64,

    /// Normalized intensity below which a point counts as absorbed (default: 0.98)
    pub absorption_threshold: f64,

    /// Minimum equivalent width in nm for a detection (default: 0.01)
    pub min_equivalent_width: f64,

    /// Minimum fraction of absorbed points for a detection (default: 0.06)
    pub min_absorption_fraction: f64,

    /// Confidence above which a molecule counts as detected (default: 0.2)
    pub detection_confidence: f64,

    /// Confidence above which a molecule counts as present for the
    /// biosignature rules (default: 0.25)
    pub presence_confidence: f64,
}

impl SpectralConfig {
    /// Validate parameter ranges
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidConfig` if the smoothing window is even
    /// or zero, the percentile is outside [0, 1], or any threshold is negative
    /// or non-finite.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.smoothing_window == 0 || self.smoothing_window % 2 == 0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "smoothing window must be a positive odd number, got {}",
                self.smoothing_window
            )));
        }
        if self.min_continuum_window == 0 {
            return Err(AnalysisError::InvalidConfig(
                "continuum window must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.continuum_percentile) {
            return Err(AnalysisError::InvalidConfig(format!(
                "continuum percentile must be in [0, 1], got {}",
                self.continuum_percentile
            )));
        }
        let thresholds = [
            ("min_snr_for_detection", self.min_snr_for_detection),
            ("absorption_threshold", self.absorption_threshold),
            ("min_equivalent_width", self.min_equivalent_width),
            ("min_absorption_fraction", self.min_absorption_fraction),
            ("detection_confidence", self.detection_confidence),
            ("presence_confidence", self.presence_confidence),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() || value < 0.0 {
                return Err(AnalysisError::InvalidConfig(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

impl Default for SpectralConfig {
    fn default() -> Self {
        Self {
            smoothing_window: 7,
            min_continuum_window: 11,
            continuum_percentile: 0.9,
            min_snr_for_detection: 5.0,
            absorption_threshold: 0.98,
            min_equivalent_width: 0.01,
            min_absorption_fraction: 0.06,
            detection_confidence: 0.2,
            presence_confidence: 0.25,
        }
    }
}

/// Predictive scorer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    /// Number of trailing discovery years analyzed (default: 10)
    pub trend_window_years: usize,

    /// Number of telescopes reported in the ranking (default: 6)
    pub top_telescopes: usize,

    /// Host star radius in solar radii assumed for transit depth (default: 1.0)
    pub star_radius_solar: f64,
}

impl ScorerConfig {
    /// Validate parameter ranges
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidConfig` for a zero trend window or a
    /// non-positive stellar radius.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.trend_window_years == 0 {
            return Err(AnalysisError::InvalidConfig(
                "trend window must cover at least one year".to_string(),
            ));
        }
        if !self.star_radius_solar.is_finite() || self.star_radius_solar <= 0.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "stellar radius must be positive, got {}",
                self.star_radius_solar
            )));
        }
        Ok(())
    }
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            trend_window_years: 10,
            top_telescopes: 6,
            star_radius_solar: 1.0,
        }
    }
}

/// Configuration for the complete engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Classifier parameters
    pub classifier: ClassifierConfig,
    /// Spectral analyzer parameters
    pub spectral: SpectralConfig,
    /// Predictive scorer parameters
    pub scorer: ScorerConfig,
}

impl EngineConfig {
    /// Validate every component configuration
    ///
    /// # Errors
    ///
    /// Returns the first `AnalysisError::InvalidConfig` encountered.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        self.classifier.validate()?;
        self.spectral.validate()?;
        self.scorer.validate()
    }
}
