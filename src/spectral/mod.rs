//! Transmission spectrum analysis
//!
//! Maps a sequence of (wavelength, intensity, SNR) samples to continuum-normalized
//! data, per-molecule detections and a biosignature verdict.
//!
//! # Pipeline
//!
//! ```text
//! samples → filter/sort → moving average → percentile continuum → normalize
//!         → per-window detection → per-molecule confidence
//!         → biosignature rules → recommendations + overall confidence
//! ```
//!
//! The output is a pure function of the samples, the planet's distance and
//! the configuration.
//!
//! # Example
//!
//! ```
//! use exo_insight::spectral::{SpectralAnalyzer, SpectralSample, BiosignatureLevel};
//! use exo_insight::config::SpectralConfig;
//! use exo_insight::planet::PlanetRecord;
//!
//! let analyzer = SpectralAnalyzer::new(SpectralConfig::default())?;
//! let result = analyzer.analyze_spectrum(&[], &PlanetRecord::named("TRAPPIST-1 e"));
//! assert!(result.detected_molecules.is_empty());
//! assert_eq!(result.confidence, 0.0);
//! assert_eq!(result.biosignature_potential.level, BiosignatureLevel::Low);
//! # Ok::<(), exo_insight::AnalysisError>(())
//! ```

pub mod biosignature;
pub mod continuum;
pub mod detection;
pub mod molecules;
pub mod result;
pub mod smoothing;

pub use molecules::{Molecule, MoleculeWindowTable, MoleculeWindows};
pub use result::{
    BiosignatureAssessment, BiosignatureLevel, DetectionResult, MoleculeDetection,
    NormalizedPoint, SpectralSample, SpectroscopyResult,
};

use crate::config::SpectralConfig;
use crate::error::AnalysisError;
use crate::planet::habitability::round_to;
use crate::planet::record::json_kind;
use crate::planet::{to_feature_vector, PlanetRecord};
use continuum::NormalizedSpectrum;
use std::collections::BTreeMap;

/// Spectral analyzer with an immutable molecule window table
#[derive(Debug, Clone)]
pub struct SpectralAnalyzer {
    config: SpectralConfig,
    table: MoleculeWindowTable,
}

impl Default for SpectralAnalyzer {
    fn default() -> Self {
        Self {
            config: SpectralConfig::default(),
            table: MoleculeWindowTable::standard(),
        }
    }
}

impl SpectralAnalyzer {
    /// Create an analyzer with the standard molecule table
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidConfig` if the configuration is invalid
    /// (e.g. an even smoothing window).
    pub fn new(config: SpectralConfig) -> Result<Self, AnalysisError> {
        Self::with_table(config, MoleculeWindowTable::standard())
    }

    /// Create an analyzer with a custom molecule table
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidConfig` if the configuration is invalid.
    pub fn with_table(
        config: SpectralConfig,
        table: MoleculeWindowTable,
    ) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self { config, table })
    }

    /// Active configuration
    pub fn config(&self) -> &SpectralConfig {
        &self.config
    }

    /// Molecule window table
    pub fn table(&self) -> &MoleculeWindowTable {
        &self.table
    }

    /// Analyze a spectrum for the given planet
    ///
    /// Never fails: an empty spectrum (or one with no finite samples) yields
    /// [`SpectroscopyResult::no_data`].
    pub fn analyze_spectrum(
        &self,
        samples: &[SpectralSample],
        planet: &PlanetRecord,
    ) -> SpectroscopyResult {
        log::debug!(
            "Analyzing spectrum for '{}': {} samples",
            planet.name,
            samples.len()
        );

        let samples = prepare_samples(samples);
        if samples.is_empty() {
            log::debug!("No usable samples for '{}'", planet.name);
            return SpectroscopyResult::no_data(&planet.name);
        }

        let n = samples.len();
        let wavelengths: Vec<f64> = samples.iter().map(|s| s.wavelength).collect();
        let intensities: Vec<f64> = samples.iter().map(|s| s.intensity).collect();
        let snr: Vec<f64> = samples.iter().map(|s| s.snr).collect();
        let average_snr = snr.iter().sum::<f64>() / n as f64;

        let smoothed = smoothing::moving_average(&intensities, self.config.smoothing_window);
        let spectrum = NormalizedSpectrum::new(
            wavelengths,
            smoothed,
            snr,
            self.config.min_continuum_window,
            self.config.continuum_percentile,
        );

        let molecules = detection::match_templates(&spectrum, &self.table, &self.config);
        let detected: Vec<&MoleculeDetection> = molecules.iter().filter(|m| m.detected).collect();

        let biosignature =
            biosignature::assess_biosignature(&molecules, average_snr, &self.config);
        let distance = to_feature_vector(planet).distance;
        let recommendations =
            biosignature::recommendations(average_snr, biosignature.level, distance);

        let mean_detected = if detected.is_empty() {
            0.0
        } else {
            detected.iter().map(|m| m.confidence).sum::<f64>() / detected.len() as f64
        };
        let confidence = round_to(
            (0.2 * (average_snr / 40.0) + 0.75 * mean_detected)
                .max(0.05)
                .min(0.999),
            3,
        );

        let detected_molecules: Vec<Molecule> = detected.iter().map(|m| m.molecule).collect();
        let summary = summarize(&detected_molecules, &biosignature);
        let molecule_confidences: BTreeMap<Molecule, f64> = molecules
            .iter()
            .map(|m| (m.molecule, m.confidence))
            .collect();

        log::debug!(
            "Spectrum for '{}': {} of {} molecules detected, confidence={:.3}",
            planet.name,
            detected_molecules.len(),
            molecules.len(),
            confidence
        );

        SpectroscopyResult {
            planet_name: planet.name.clone(),
            sample_count: n,
            normalized: spectrum.points(),
            molecules,
            detected_molecules,
            molecule_confidences,
            biosignature_potential: biosignature,
            recommendations,
            average_snr,
            confidence,
            summary,
        }
    }
}

/// Drop non-finite samples and ensure ascending wavelength order
///
/// Unsorted input is sorted (stable) with a warning.
pub fn prepare_samples(samples: &[SpectralSample]) -> Vec<SpectralSample> {
    let mut prepared: Vec<SpectralSample> =
        samples.iter().copied().filter(SpectralSample::is_finite).collect();

    let dropped = samples.len() - prepared.len();
    if dropped > 0 {
        log::warn!("Dropped {} non-finite spectral samples", dropped);
    }

    let sorted = prepared
        .windows(2)
        .all(|w| w[0].wavelength <= w[1].wavelength);
    if !sorted {
        log::warn!("Spectral samples not in ascending wavelength order; sorting");
        prepared.sort_by(|a, b| {
            a.wavelength
                .partial_cmp(&b.wavelength)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    prepared
}

/// Parse samples from a JSON array of `{wavelength, intensity, snr}` objects
///
/// Elements that are not objects, or lack a numeric field, are skipped.
/// Numeric strings are accepted.
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if `value` is not an array.
pub fn samples_from_json(value: &serde_json::Value) -> Result<Vec<SpectralSample>, AnalysisError> {
    let items = value.as_array().ok_or_else(|| {
        AnalysisError::InvalidInput(format!(
            "spectral samples must be an array, got {}",
            json_kind(value)
        ))
    })?;

    fn field(item: &serde_json::Value, names: &[&str]) -> Option<f64> {
        names.iter().find_map(|name| match item.get(*name)? {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    let samples: Vec<SpectralSample> = items
        .iter()
        .filter_map(|item| {
            Some(SpectralSample::new(
                field(item, &["wavelength"])?,
                field(item, &["intensity", "flux"])?,
                field(item, &["snr", "signal_to_noise"])?,
            ))
        })
        .collect();

    if samples.len() < items.len() {
        log::warn!(
            "Skipped {} malformed spectral samples",
            items.len() - samples.len()
        );
    }

    Ok(samples)
}

fn summarize(detected: &[Molecule], biosignature: &BiosignatureAssessment) -> String {
    if detected.is_empty() {
        format!(
            "No molecular features detected; biosignature potential {} ({})",
            biosignature.level.as_str(),
            biosignature.reason
        )
    } else {
        let names: Vec<&str> = detected.iter().map(|m| m.name()).collect();
        format!(
            "Detected {} ({} species); biosignature potential {}",
            names.join(", "),
            detected.len(),
            biosignature.level.as_str()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn analyzer() -> SpectralAnalyzer {
        SpectralAnalyzer::new(SpectralConfig::default()).unwrap()
    }

    /// Flat spectrum from 500 to 3000 nm in 2 nm steps with optional dips
    fn synthetic(snr: f64, dips: &[(f64, f64, f64)]) -> Vec<SpectralSample> {
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

    #[test]
    fn test_empty_spectrum_no_data() {
        let result = analyzer().analyze_spectrum(&[], &PlanetRecord::named("X"));
        assert!(result.detected_molecules.is_empty());
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.biosignature_potential.level, BiosignatureLevel::Low);
        assert_eq!(result.biosignature_potential.reason, "No data");
    }

    #[test]
    fn test_non_finite_only_is_no_data() {
        let samples = vec![SpectralSample::new(f64::NAN, 1.0, 10.0)];
        let result = analyzer().analyze_spectrum(&samples, &PlanetRecord::named("X"));
        assert_eq!(result.sample_count, 0);
        assert_eq!(result.biosignature_potential.reason, "No data");
    }

    #[test]
    fn test_short_spectrum_not_smoothed() {
        let samples = vec![
            SpectralSample::new(1000.0, 1.0, 20.0),
            SpectralSample::new(1001.0, 5.0, 20.0),
            SpectralSample::new(1002.0, 2.0, 20.0),
        ];
        let result = analyzer().analyze_spectrum(&samples, &PlanetRecord::named("X"));
        let smoothed: Vec<f64> = result.normalized.iter().map(|p| p.smoothed).collect();
        assert_eq!(smoothed, vec![1.0, 5.0, 2.0]);
    }

    #[test]
    fn test_flat_spectrum_detects_nothing() {
        let result = analyzer().analyze_spectrum(&synthetic(30.0, &[]), &PlanetRecord::named("X"));

        assert!(result.detected_molecules.is_empty());
        assert_eq!(result.biosignature_potential.level, BiosignatureLevel::Low);
        // 0.2 * 30/40 = 0.15
        assert_eq!(result.confidence, 0.15);
        assert!(result.summary.starts_with("No molecular features detected"));
        assert!(result.normalized.iter().all(|p| (p.normalized - 1.0).abs() < 1e-9));
    }

    #[test]
    fn test_low_snr_floor_confidence() {
        let result = analyzer().analyze_spectrum(&synthetic(1.0, &[]), &PlanetRecord::named("X"));
        assert_eq!(result.confidence, 0.05);
        assert_eq!(result.biosignature_potential.reason, "Low average SNR");
        assert!(result.recommendations[0].contains("exposure"));
    }

    #[test]
    fn test_oxygen_methane_high() {
        let samples = synthetic(
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
        let result = analyzer().analyze_spectrum(&samples, &PlanetRecord::named("X"));

        assert!(result.is_detected(Molecule::O2), "{:?}", result.molecule_confidences);
        assert!(result.is_detected(Molecule::CH4));
        assert!(result.is_detected(Molecule::H2O));
        assert!(result.is_detected(Molecule::CO2));
        assert_eq!(result.biosignature_potential.level, BiosignatureLevel::High);
        assert!(result.recommendations.iter().any(|r| r.contains("multi-epoch")));
        assert!((0.05..=0.999).contains(&result.confidence));
        assert_eq!(result.confidence, round_to(result.confidence, 3));
    }

    #[test]
    fn test_deterministic() {
        let samples = synthetic(25.0, &[(1360.0, 1440.0, 0.3)]);
        let planet = PlanetRecord::named("X");
        let a = analyzer().analyze_spectrum(&samples, &planet);
        let b = analyzer().analyze_spectrum(&samples, &planet);
        assert_eq!(a, b);
    }

    #[test]
    fn test_unsorted_input_sorted() {
        let mut samples = synthetic(25.0, &[(1360.0, 1440.0, 0.3)]);
        let sorted = analyzer().analyze_spectrum(&samples, &PlanetRecord::named("X"));
        samples.reverse();
        let reversed = analyzer().analyze_spectrum(&samples, &PlanetRecord::named("X"));
        assert_eq!(sorted, reversed);
    }

    #[test]
    fn test_distant_planet_recommendation() {
        let planet = PlanetRecord {
            distance: Some(900.0),
            ..PlanetRecord::named("far")
        };
        let result = analyzer().analyze_spectrum(&synthetic(30.0, &[]), &planet);
        assert!(result.recommendations.iter().any(|r| r.contains("space-based")));
    }

    #[test]
    fn test_samples_from_json() {
        let value = json!([
            { "wavelength": 1000.0, "intensity": 1.0, "snr": 12.0 },
            { "wavelength": "1002", "flux": 0.9, "snr": 11.0 },
            { "wavelength": 1004.0 },
            "garbage",
        ]);
        let samples = samples_from_json(&value).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].wavelength, 1002.0);
        assert_eq!(samples[1].intensity, 0.9);

        assert!(samples_from_json(&json!({ "wavelength": 1.0 })).is_err());
    }

    #[test]
    fn test_even_window_rejected() {
        let config = SpectralConfig {
            smoothing_window: 6,
            ..Default::default()
        };
        assert!(SpectralAnalyzer::new(config).is_err());
    }
}
