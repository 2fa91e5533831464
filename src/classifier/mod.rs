//! Planet type classification
//!
//! Maps a planet record to a calibrated distribution over a fixed label set.
//!
//! # Pipeline
//!
//! ```text
//! PlanetRecord → FeatureVector → base scores (×type weights)
//!              → normalize → blend ai_confidence → Platt calibration
//!              → renormalize (4 d.p.) → argmax + confidence + explanation
//! ```
//!
//! Results are cached by a fingerprint of name, mass, radius, temperature and
//! atmosphere. The fingerprint intentionally leaves out `ai_confidence`, so two
//! records differing only there share a cached result.
//!
//! # Example
//!
//! ```
//! use exo_insight::classifier::{Classifier, PlanetType};
//! use exo_insight::config::ClassifierConfig;
//! use exo_insight::planet::PlanetRecord;
//!
//! let classifier = Classifier::new(ClassifierConfig::default())?;
//! classifier.load_model();
//!
//! let earth = PlanetRecord {
//!     mass: Some(1.0),
//!     radius: Some(1.0),
//!     temperature: Some(288.0),
//!     ..PlanetRecord::named("Earth analog")
//! };
//! let result = classifier.classify_planet(&earth);
//! assert_eq!(result.predicted_type, PlanetType::Terrestrial);
//! # Ok::<(), exo_insight::AnalysisError>(())
//! ```

pub mod cache;
pub mod calibration;
pub mod explain;
pub mod labels;
pub mod result;

pub use cache::{CacheStats, ResultCache};
pub use calibration::PlattCalibrator;
pub use explain::{Explanation, FeatureImportance, LabelProbability};
pub use labels::PlanetType;
pub use result::{ClassificationResult, ModelInfo};

use crate::config::ClassifierConfig;
use crate::error::AnalysisError;
use crate::planet::{to_feature_vector, FeatureVector, PlanetRecord};
use once_cell::sync::OnceCell;
use rayon::prelude::*;

/// Identifier reported in result metadata
pub const MODEL_NAME: &str = "exo-heuristic-classifier";

/// Planet type classifier with a fingerprint-keyed result cache
pub struct Classifier {
    config: ClassifierConfig,
    calibrator: PlattCalibrator,
    model: OnceCell<ModelInfo>,
    cache: ResultCache<ClassificationResult>,
}

impl Default for Classifier {
    fn default() -> Self {
        let config = ClassifierConfig::default();
        Self {
            calibrator: PlattCalibrator::new(config.calibration_a, config.calibration_b),
            cache: ResultCache::new(config.cache_policy),
            model: OnceCell::new(),
            config,
        }
    }
}

impl Classifier {
    /// Create a classifier
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidConfig` if the configuration is invalid.
    pub fn new(config: ClassifierConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self {
            calibrator: PlattCalibrator::new(config.calibration_a, config.calibration_b),
            cache: ResultCache::new(config.cache_policy),
            model: OnceCell::new(),
            config,
        })
    }

    /// Initialize the model
    ///
    /// Idempotent: the first call builds the model metadata, later calls
    /// return the same instance. Classification calls this implicitly.
    pub fn load_model(&self) -> &ModelInfo {
        self.model.get_or_init(|| {
            log::debug!(
                "Loading {} (a={}, b={}, {} labels)",
                MODEL_NAME,
                self.calibrator.a,
                self.calibrator.b,
                PlanetType::ALL.len()
            );
            ModelInfo {
                name: MODEL_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                calibration_a: self.calibrator.a,
                calibration_b: self.calibrator.b,
                label_count: PlanetType::ALL.len(),
            }
        })
    }

    /// True once [`load_model`](Self::load_model) has run
    pub fn is_loaded(&self) -> bool {
        self.model.get().is_some()
    }

    /// Classify a single planet
    ///
    /// Returns the cached result when a record with the same fingerprint was
    /// classified before; otherwise computes, caches and returns it. Invalid
    /// numeric fields fall back to defaults; this never fails.
    pub fn classify_planet(&self, planet: &PlanetRecord) -> ClassificationResult {
        let key = fingerprint(planet);
        self.cache.get_or_compute(&key, || self.compute(planet))
    }

    /// Classify many planets in parallel
    ///
    /// Output order matches input order and every element equals what
    /// [`classify_planet`](Self::classify_planet) returns for that record.
    /// Duplicate fingerprints within a batch are computed once.
    pub fn classify_batch(&self, planets: &[PlanetRecord]) -> Vec<ClassificationResult> {
        log::debug!("Classifying batch of {} planets", planets.len());
        self.load_model();
        planets
            .par_iter()
            .map(|planet| self.classify_planet(planet))
            .collect()
    }

    /// Drop all cached results
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Cache counters
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Active configuration
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    fn compute(&self, planet: &PlanetRecord) -> ClassificationResult {
        let model = self.load_model().clone();
        let fv = to_feature_vector(planet);

        let base_scores = self.base_scores(&fv);
        let calibrated =
            calibration::calibrate_scores(&base_scores, fv.ai_confidence, &self.calibrator);

        let labelled: Vec<(PlanetType, f64)> =
            PlanetType::ALL.iter().copied().zip(calibrated).collect();

        // Strict comparison keeps the first label on ties
        let (predicted_type, top_probability) = labelled.iter().fold(
            (PlanetType::ALL[0], f64::NEG_INFINITY),
            |best, &(label, p)| if p > best.1 { (label, p) } else { best },
        );

        let confidence = calibration::classification_confidence(top_probability, fv.ai_confidence);

        let explanation = Explanation {
            feature_importance: explain::feature_importance(&fv),
            top_factors: explain::top_labels(&labelled, 3),
        };

        log::debug!(
            "Classified '{}' as {} (p={:.4}, confidence={:.3})",
            planet.name,
            predicted_type.name(),
            top_probability,
            confidence
        );

        ClassificationResult {
            planet_name: planet.name.clone(),
            predicted_type,
            probabilities: labelled.into_iter().collect(),
            confidence,
            explanation,
            model,
        }
    }

    fn base_scores(&self, fv: &FeatureVector) -> Vec<f64> {
        PlanetType::ALL
            .iter()
            .map(|t| t.base_score(fv) * self.config.weight(*t))
            .collect()
    }
}

/// Cache key for a planet: `name|mass|radius|temperature|atmosphere`
///
/// Uses the raw record values; absent fields render as empty strings.
pub fn fingerprint(planet: &PlanetRecord) -> String {
    fn num(v: Option<f64>) -> String {
        v.map(|x| x.to_string()).unwrap_or_default()
    }
    format!(
        "{}|{}|{}|{}|{}",
        planet.name,
        num(planet.mass),
        num(planet.radius),
        num(planet.temperature),
        planet.atmosphere_text()
    )
}
