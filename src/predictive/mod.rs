//! Predictive scoring
//!
//! Catalog-level discovery trends plus per-planet follow-up priority and
//! observation planning. Every operation is a pure function of its input.

pub mod observation;
pub mod priority;
pub mod trends;

pub use observation::{Cadence, DistanceTier, ObservationPlan};
pub use priority::{PriorityComponents, PriorityScore};
pub use trends::{ForecastPoint, ForecastSeries, RankedCount, YearCount};

use crate::config::ScorerConfig;
use crate::error::AnalysisError;
use crate::planet::PlanetRecord;

/// Discovery trends, priority scores and observation plans
#[derive(Debug, Clone, Default)]
pub struct PredictiveScorer {
    config: ScorerConfig,
}

impl PredictiveScorer {
    /// Create a scorer
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidConfig` if the configuration is invalid.
    pub fn new(config: ScorerConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Scorer configuration
    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Analyze discovery history and forecast the next years
    pub fn analyze_discovery_patterns(&self, history: &[PlanetRecord]) -> ForecastSeries {
        trends::analyze_discovery_patterns(history, &self.config)
    }

    /// Follow-up priority of a planet
    pub fn calculate_priority_score(&self, planet: &PlanetRecord) -> PriorityScore {
        priority::calculate_priority_score(planet)
    }

    /// Observation plan for a planet
    pub fn recommend_observation_plan(&self, planet: &PlanetRecord) -> ObservationPlan {
        observation::recommend_observation_plan(planet, self.config.star_radius_solar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_rejected() {
        let config = ScorerConfig {
            trend_window_years: 0,
            ..Default::default()
        };
        assert!(PredictiveScorer::new(config).is_err());
    }

    #[test]
    fn test_star_radius_flows_into_plan() {
        let planet = PlanetRecord {
            radius: Some(2.0),
            ..PlanetRecord::named("sub-neptune")
        };
        let sun = PredictiveScorer::default().recommend_observation_plan(&planet);
        let dwarf = PredictiveScorer::new(ScorerConfig {
            star_radius_solar: 0.5,
            ..Default::default()
        })
        .unwrap()
        .recommend_observation_plan(&planet);

        assert!(dwarf.transit_depth_ppm > 3.9 * sun.transit_depth_ppm);
    }
}
