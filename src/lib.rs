//! # Exo Insight
//!
//! Heuristic analysis core for exoplanet catalogs: planet type classification,
//! transmission spectrum analysis and follow-up prioritization.
//!
//! ## Features
//!
//! - **Classification**: Calibrated distribution over nine planet types with feature importance
//! - **Spectroscopy**: Continuum normalization, molecular window detection and biosignature rules
//! - **Prediction**: Discovery trend forecasting, priority scores and observation plans
//!
//! ## Quick Start
//!
//! ```
//! use exo_insight::{Engine, EngineConfig, PlanetRecord, PlanetType};
//!
//! let engine = Engine::new(EngineConfig::default())?;
//!
//! let planet = PlanetRecord {
//!     mass: Some(1.0),
//!     radius: Some(1.0),
//!     temperature: Some(288.0),
//!     distance: Some(50.0),
//!     atmosphere: Some("N2/O2".to_string()),
//!     ai_confidence: Some(0.9),
//!     ..PlanetRecord::named("Earth analog")
//! };
//!
//! let classification = engine.classify_planet(&planet);
//! assert_eq!(classification.predicted_type, PlanetType::Terrestrial);
//!
//! let priority = engine.calculate_priority_score(&planet);
//! println!("Priority: {:.3}", priority.score);
//! # Ok::<(), exo_insight::AnalysisError>(())
//! ```
//!
//! ## Architecture
//!
//! Three independent components, composed by the caller:
//!
//! ```text
//! PlanetRecord ──→ Classifier ──────────→ ClassificationResult
//! SpectralSample[] + PlanetRecord ──→ SpectralAnalyzer ──→ SpectroscopyResult
//! PlanetRecord[] ──→ PredictiveScorer ──→ ForecastSeries / PriorityScore / ObservationPlan
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classifier;
pub mod config;
pub mod error;
pub mod planet;
pub mod predictive;
pub mod spectral;

// Re-export main types
pub use classifier::{ClassificationResult, Classifier, PlanetType};
pub use config::{CachePolicy, ClassifierConfig, EngineConfig, ScorerConfig, SpectralConfig};
pub use error::AnalysisError;
pub use planet::{ConfirmationStatus, FeatureVector, PlanetRecord};
pub use predictive::{ForecastSeries, ObservationPlan, PredictiveScorer, PriorityScore};
pub use spectral::{BiosignatureLevel, Molecule, SpectralAnalyzer, SpectralSample, SpectroscopyResult};

use once_cell::sync::Lazy;

/// Classifier, spectral analyzer and predictive scorer built from one configuration
#[derive(Default)]
pub struct Engine {
    classifier: Classifier,
    spectral: SpectralAnalyzer,
    scorer: PredictiveScorer,
}

impl Engine {
    /// Build all components
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidConfig` if any component configuration
    /// is invalid.
    pub fn new(config: EngineConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        log::debug!(
            "Building engine: cache={:?}, smoothing window={}, trend window={}y",
            config.classifier.cache_policy,
            config.spectral.smoothing_window,
            config.scorer.trend_window_years
        );
        Ok(Self {
            classifier: Classifier::new(config.classifier)?,
            spectral: SpectralAnalyzer::new(config.spectral)?,
            scorer: PredictiveScorer::new(config.scorer)?,
        })
    }

    /// The classifier
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// The spectral analyzer
    pub fn spectral(&self) -> &SpectralAnalyzer {
        &self.spectral
    }

    /// The predictive scorer
    pub fn scorer(&self) -> &PredictiveScorer {
        &self.scorer
    }

    /// See [`Classifier::classify_planet`]
    pub fn classify_planet(&self, planet: &PlanetRecord) -> ClassificationResult {
        self.classifier.classify_planet(planet)
    }

    /// See [`Classifier::classify_batch`]
    pub fn classify_batch(&self, planets: &[PlanetRecord]) -> Vec<ClassificationResult> {
        self.classifier.classify_batch(planets)
    }

    /// See [`SpectralAnalyzer::analyze_spectrum`]
    pub fn analyze_spectrum(
        &self,
        samples: &[SpectralSample],
        planet: &PlanetRecord,
    ) -> SpectroscopyResult {
        self.spectral.analyze_spectrum(samples, planet)
    }

    /// See [`PredictiveScorer::analyze_discovery_patterns`]
    pub fn analyze_discovery_patterns(&self, history: &[PlanetRecord]) -> ForecastSeries {
        self.scorer.analyze_discovery_patterns(history)
    }

    /// See [`PredictiveScorer::calculate_priority_score`]
    pub fn calculate_priority_score(&self, planet: &PlanetRecord) -> PriorityScore {
        self.scorer.calculate_priority_score(planet)
    }

    /// See [`PredictiveScorer::recommend_observation_plan`]
    pub fn recommend_observation_plan(&self, planet: &PlanetRecord) -> ObservationPlan {
        self.scorer.recommend_observation_plan(planet)
    }
}

static DEFAULT_ENGINE: Lazy<Engine> = Lazy::new(Engine::default);

/// Classify a planet with the process-wide default classifier
///
/// Results are cached across calls by record fingerprint.
///
/// # Example
///
/// ```
/// use exo_insight::{classify_planet, PlanetRecord};
///
/// let result = classify_planet(&PlanetRecord::named("Kepler-22 b"));
/// let total: f64 = result.probabilities.values().sum();
/// assert!((total - 1.0).abs() < 1e-3);
/// ```
pub fn classify_planet(planet: &PlanetRecord) -> ClassificationResult {
    DEFAULT_ENGINE.classify_planet(planet)
}

/// Analyze a spectrum with the default spectral configuration
pub fn analyze_spectrum(samples: &[SpectralSample], planet: &PlanetRecord) -> SpectroscopyResult {
    DEFAULT_ENGINE.analyze_spectrum(samples, planet)
}

/// Follow-up priority with the default scorer
pub fn calculate_priority_score(planet: &PlanetRecord) -> PriorityScore {
    DEFAULT_ENGINE.calculate_priority_score(planet)
}
