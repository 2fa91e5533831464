//! Integration tests for the exoplanet analysis engine

use exo_insight::predictive::Cadence;
use exo_insight::spectral::samples_from_json;
use exo_insight::{
    analyze_spectrum, calculate_priority_score, classify_planet, BiosignatureLevel, CachePolicy,
    ClassifierConfig, ConfirmationStatus, Engine, EngineConfig, Molecule, PlanetRecord,
    PlanetType, SpectralSample,
};
use serde_json::json;

fn earth_analog() -> PlanetRecord {
    PlanetRecord {
        mass: Some(1.0),
        radius: Some(1.0),
        temperature: Some(288.0),
        orbital_period: Some(365.0),
        distance: Some(50.0),
        atmosphere: Some("N2/O2".to_string()),
        ai_confidence: Some(0.9),
        ..PlanetRecord::named("Earth analog")
    }
}

/// A small catalog covering every regime of the label set
fn catalog() -> Vec<PlanetRecord> {
    let planet = |name: &str, mass: f64, radius: f64, temperature: f64, period: f64| PlanetRecord {
        mass: Some(mass),
        radius: Some(radius),
        temperature: Some(temperature),
        orbital_period: Some(period),
        distance: Some(120.0),
        ..PlanetRecord::named(name)
    };

    let mut ocean = planet("ocean", 3.0, 1.6, 300.0, 40.0);
    ocean.atmosphere = Some("H2O-rich".to_string());

    vec![
        earth_analog(),
        planet("super-earth", 5.0, 1.6, 250.0, 30.0),
        planet("sub-neptune", 8.0, 2.8, 350.0, 20.0),
        planet("ice giant", 17.0, 4.0, 70.0, 30000.0),
        planet("hot jupiter", 300.0, 11.0, 1400.0, 3.5),
        ocean,
        planet("lava", 2.0, 1.2, 2000.0, 0.8),
        PlanetRecord::named("empty"),
        PlanetRecord {
            mass: Some(f64::NAN),
            radius: Some(-3.0),
            ai_confidence: Some(7.0),
            ..PlanetRecord::named("garbage")
        },
    ]
}

/// Flat spectrum from 500 to 3000 nm in 2 nm steps with optional dips
fn synthetic_spectrum(snr: f64, dips: &[(f64, f64, f64)]) -> Vec<SpectralSample> {
    (0..=1250)
        .map(|i| {
            let w = 500.0 + i as f64 * 2.0;
            let depth = dips
                .iter()
                .filter(|(lo, hi, _)| w >= *lo && w <= *hi)
                .map(|(_, _, d)| *d)
                .fold(0.0, f64::max);
            SpectralSample::new(w, 100.0 * (1.0 - depth), snr)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probabilities_sum_to_one() {
        let engine = Engine::default();
        for planet in catalog() {
            let result = engine.classify_planet(&planet);
            assert!(
                (result.probability_sum() - 1.0).abs() < 1e-3,
                "{}: sum {}",
                planet.name,
                result.probability_sum()
            );
            assert!(result.confidence <= 0.999, "{}: {}", planet.name, result.confidence);
            assert_eq!(result.probabilities.len(), PlanetType::ALL.len());
        }
    }

    #[test]
    fn test_earth_analog_terrestrial() {
        let result = Engine::default().classify_planet(&earth_analog());
        assert_eq!(result.predicted_type, PlanetType::Terrestrial);
        assert_eq!(result.explanation.top_factors.len(), 3);
        assert_eq!(result.explanation.top_factors[0].label, PlanetType::Terrestrial);
    }

    #[test]
    fn test_cache_idempotent_and_clearable() {
        let engine = Engine::default();
        let planet = earth_analog();

        let first = engine.classify_planet(&planet);
        let second = engine.classify_planet(&planet);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        let stats = engine.classifier().cache_stats();
        assert_eq!((stats.hits, stats.misses), (1, 1));

        engine.classifier().clear_cache();
        let third = engine.classify_planet(&planet);
        assert_eq!(third, first);
        assert_eq!(engine.classifier().cache_stats().misses, 2);
    }

    #[test]
    fn test_batch_matches_single() {
        let planets = catalog();
        let batch = Engine::default().classify_batch(&planets);
        assert_eq!(batch.len(), planets.len());

        // A fresh engine so nothing comes from the batch's cache
        let single = Engine::default();
        for (planet, from_batch) in planets.iter().zip(&batch) {
            assert_eq!(&single.classify_planet(planet), from_batch, "{}", planet.name);
        }

        let mut reversed = planets.clone();
        reversed.reverse();
        let reversed_batch = Engine::default().classify_batch(&reversed);
        for (a, b) in batch.iter().rev().zip(&reversed_batch) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_concurrent_duplicates_compute_once() {
        let engine = Engine::default();
        let planets: Vec<PlanetRecord> = std::iter::repeat(earth_analog()).take(64).collect();

        let results = engine.classify_batch(&planets);
        assert!(results.windows(2).all(|w| w[0] == w[1]));

        let stats = engine.classifier().cache_stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 63);
        assert_eq!(stats.len, 1);
    }

    #[test]
    fn test_bounded_cache_still_returns_results() {
        let config = EngineConfig {
            classifier: ClassifierConfig {
                cache_policy: CachePolicy::Capacity(2),
                ..Default::default()
            },
            ..Default::default()
        };
        let engine = Engine::new(config).unwrap();
        let planets = catalog();
        let results = engine.classify_batch(&planets);

        assert_eq!(results.len(), planets.len());
        assert!(engine.classifier().cache_stats().len <= 2);
    }

    #[test]
    fn test_empty_spectrum() {
        let result = analyze_spectrum(&[], &earth_analog());
        assert!(result.detected_molecules.is_empty());
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.biosignature_potential.level, BiosignatureLevel::Low);
    }

    #[test]
    fn test_short_spectrum_unsmoothed() {
        let samples: Vec<SpectralSample> = [3.0, 1.0, 4.0, 1.0, 5.0]
            .iter()
            .enumerate()
            .map(|(i, v)| SpectralSample::new(1000.0 + i as f64, *v, 15.0))
            .collect();
        let result = analyze_spectrum(&samples, &earth_analog());
        let smoothed: Vec<f64> = result.normalized.iter().map(|p| p.smoothed).collect();
        assert_eq!(smoothed, vec![3.0, 1.0, 4.0, 1.0, 5.0]);
    }

    #[test]
    fn test_oxygen_methane_dominates() {
        // Strong bands for O2, CH4, H2O and CO2: every biosignature rule holds
        let samples = synthetic_spectrum(
            40.0,
            &[
                (757.0, 773.0, 0.35),
                (1262.0, 1278.0, 0.35),
                (1640.0, 1740.0, 0.3),
                (2220.0, 2380.0, 0.3),
                (1360.0, 1440.0, 0.3),
                (1970.0, 2070.0, 0.3),
            ],
        );
        let result = analyze_spectrum(&samples, &earth_analog());

        assert!(result.molecule_confidences[&Molecule::O2] > 0.25);
        assert!(result.molecule_confidences[&Molecule::CH4] > 0.25);
        assert!(result.detected_molecules.len() >= 3);
        assert_eq!(result.biosignature_potential.level, BiosignatureLevel::High);
        assert!(result.confidence > 0.05 && result.confidence <= 0.999);
        assert!(result.summary.contains("High"));
    }

    #[test]
    fn test_spectrum_from_json() {
        let value = json!([
            { "wavelength": 1402, "intensity": 70.0, "snr": 20 },
            { "wavelength": 1400, "intensity": 72.0, "snr": 20 },
            { "wavelength": "1404", "flux": "71", "signal_to_noise": 20 },
        ]);
        let samples = samples_from_json(&value).unwrap();
        assert_eq!(samples.len(), 3);

        let result = analyze_spectrum(&samples, &earth_analog());
        assert_eq!(result.sample_count, 3);
        let wavelengths: Vec<f64> = result.normalized.iter().map(|p| p.wavelength).collect();
        assert_eq!(wavelengths, vec![1400.0, 1402.0, 1404.0]);

        assert!(samples_from_json(&json!("not a list")).is_err());
    }

    #[test]
    fn test_priority_monotonic_in_habitability() {
        let mut last = f64::MIN;
        for i in 0..=50 {
            let planet = PlanetRecord {
                habitability_score: Some(i as f64 / 50.0),
                ..earth_analog()
            };
            let score = calculate_priority_score(&planet).score;
            assert!(score >= last);
            assert!((0.0..=0.999).contains(&score));
            last = score;
        }
    }

    #[test]
    fn test_candidate_outranks_confirmed() {
        let confirmed = PlanetRecord {
            habitability_score: Some(0.4),
            ..earth_analog()
        };
        let candidate = PlanetRecord {
            confirmed_status: ConfirmationStatus::Candidate,
            ..confirmed.clone()
        };
        assert!(calculate_priority_score(&candidate).score > calculate_priority_score(&confirmed).score);
    }

    #[test]
    fn test_observation_plans() {
        let engine = Engine::default();

        let near = engine.recommend_observation_plan(&PlanetRecord {
            distance: Some(50.0),
            ..Default::default()
        });
        assert_eq!(near.cadence, Cadence::Weekly);
        assert!(near
            .instruments
            .iter()
            .any(|i| i.contains("Ground-based high-resolution spectrograph")));

        let far = engine.recommend_observation_plan(&PlanetRecord {
            distance: Some(800.0),
            ..Default::default()
        });
        assert_eq!(far.cadence.as_str(), "Per-transit stacking");
        let json = serde_json::to_value(&far).unwrap();
        assert_eq!(json["cadence"], "Per-transit stacking");
    }

    #[test]
    fn test_discovery_patterns_from_json_history() {
        let history: Vec<PlanetRecord> = json!([
            { "name": "a", "discoveryYear": 2019, "discoveryMethod": "Transit", "telescope": "TESS" },
            { "name": "b", "discoveryYear": "2020", "discoveryMethod": "Transit", "telescope": "TESS" },
            { "name": "c", "discoveryYear": 2020, "discoveryMethod": "Radial Velocity", "telescope": "HARPS" },
            { "name": "d", "discoveryYear": 2021, "discoveryMethod": "Transit", "telescope": "Kepler" },
            { "name": "e", "discoveryYear": 2021, "discoveryMethod": "Imaging" },
            { "name": "f", "discoveryYear": 2021, "discoveryMethod": "Transit" },
            { "name": "g", "discoveryMethod": "Transit" },
        ])
        .as_array()
        .unwrap()
        .iter()
        .map(|v| PlanetRecord::from_json_value(v).unwrap())
        .collect();

        let series = Engine::default().analyze_discovery_patterns(&history);
        assert_eq!(series.total, 7);
        assert_eq!(series.yearly.len(), 3);
        assert_eq!(series.yearly[2].count, 3);
        assert_eq!(series.forecast.len(), 3);
        assert_eq!(series.forecast[0].year, 2022);
        assert_eq!(series.growth_ratio, 2.0);
        assert_eq!(series.methods[0].name, "Transit");
        assert_eq!(series.methods[0].count, 5);
        assert_eq!(series.telescopes[0].name, "TESS");
    }

    #[test]
    fn test_engine_config_from_json() {
        let config: EngineConfig = serde_json::from_value(json!({
            "classifier": { "cache_policy": { "Capacity": 16 } },
            "spectral": { "smoothing_window": 5 },
            "scorer": { "trend_window_years": 5 }
        }))
        .unwrap();
        assert_eq!(config.classifier.cache_policy, CachePolicy::Capacity(16));
        assert_eq!(config.spectral.smoothing_window, 5);
        assert!(Engine::new(config).is_ok());

        let bad: EngineConfig =
            serde_json::from_value(json!({ "spectral": { "smoothing_window": 4 } })).unwrap();
        assert!(Engine::new(bad).is_err());
    }

    #[test]
    fn test_free_function_classification() {
        let result = classify_planet(&earth_analog());
        assert_eq!(result.predicted_type, PlanetType::Terrestrial);
    }
}
