//! Absorption detection and molecular template matching
//!
//! # Algorithm
//!
//! 1. For each window of each molecule, restrict the normalized spectrum to
//!    the window and measure equivalent width, mean SNR and the fraction of
//!    absorbed points
//! 2. A window detects when all three pass their thresholds
//! 3. Per molecule, combine the window statistics into a saturating confidence:
//!    `tanh(0.8*wins + 0.18*min(3, ΣEW) + 0.4*min(1, SNR̄/50))`, halved when
//!    the mean SNR is below the detection minimum

use super::continuum::NormalizedSpectrum;
use super::molecules::{MoleculeWindowTable, MoleculeWindows};
use super::result::{DetectionResult, MoleculeDetection};
use crate::config::SpectralConfig;

/// Equivalent width by trapezoidal integration of `1 - min(1, normalized)`
///
/// Each segment contributes at least 0. Fewer than two points yield 0.
///
/// # Example
///
/// ```
/// use exo_insight::spectral::detection::equivalent_width;
///
/// // Constant 50% absorption over 10 nm
/// let ew = equivalent_width(&[100.0, 105.0, 110.0], &[0.5, 0.5, 0.5]);
/// assert!((ew - 5.0).abs() < 1e-12);
/// ```
pub fn equivalent_width(wavelengths: &[f64], normalized: &[f64]) -> f64 {
    if wavelengths.len() < 2 || normalized.len() < 2 {
        return 0.0;
    }

    wavelengths
        .windows(2)
        .zip(normalized.windows(2))
        .map(|(w, n)| {
            let depth_a = 1.0 - n[0].min(1.0);
            let depth_b = 1.0 - n[1].min(1.0);
            (0.5 * (depth_a + depth_b) * (w[1] - w[0])).max(0.0)
        })
        .sum()
}

/// Detection statistics for the samples inside `[min, max]`
pub fn detect_in_range(
    spectrum: &NormalizedSpectrum,
    min: f64,
    max: f64,
    config: &SpectralConfig,
) -> DetectionResult {
    let range = spectrum.range(min, max);
    let point_count = range.len();

    if point_count == 0 {
        return DetectionResult {
            min_wavelength: min,
            max_wavelength: max,
            point_count: 0,
            equivalent_width: 0.0,
            mean_snr: 0.0,
            absorption_fraction: 0.0,
            detected: false,
        };
    }

    let normalized = &spectrum.normalized[range.clone()];
    let mean_snr = spectrum.snr[range.clone()].iter().sum::<f64>() / point_count as f64;
    let equivalent_width = equivalent_width(&spectrum.wavelengths[range], normalized);
    let absorbed = normalized
        .iter()
        .filter(|&&v| v < config.absorption_threshold)
        .count();
    let absorption_fraction = absorbed as f64 / point_count as f64;

    let detected = mean_snr >= config.min_snr_for_detection
        && equivalent_width > config.min_equivalent_width
        && absorption_fraction > config.min_absorption_fraction;

    DetectionResult {
        min_wavelength: min,
        max_wavelength: max,
        point_count,
        equivalent_width,
        mean_snr,
        absorption_fraction,
        detected,
    }
}

/// Combine window statistics into a molecule confidence
///
/// Windows without samples are ignored. Returns 0 when no window has samples.
pub fn molecule_confidence(windows: &[DetectionResult], min_snr: f64) -> f64 {
    let covered: Vec<&DetectionResult> = windows.iter().filter(|w| w.point_count > 0).collect();
    if covered.is_empty() {
        return 0.0;
    }

    let wins = covered.iter().filter(|w| w.detected).count() as f64;
    let total_ew: f64 = covered.iter().map(|w| w.equivalent_width).sum();
    let avg_snr = covered.iter().map(|w| w.mean_snr).sum::<f64>() / covered.len() as f64;

    let confidence =
        (0.8 * wins + 0.18 * total_ew.min(3.0) + 0.4 * (avg_snr / 50.0).min(1.0)).tanh();

    if avg_snr < min_snr {
        confidence * 0.5
    } else {
        confidence
    }
}

/// Match one molecule's windows against the spectrum
pub fn match_molecule(
    spectrum: &NormalizedSpectrum,
    entry: &MoleculeWindows,
    config: &SpectralConfig,
) -> MoleculeDetection {
    let windows: Vec<DetectionResult> = entry
        .windows
        .iter()
        .map(|&(min, max)| detect_in_range(spectrum, min, max, config))
        .collect();

    let windows_detected = windows.iter().filter(|w| w.detected).count();
    let confidence = molecule_confidence(&windows, config.min_snr_for_detection);
    let detected = windows_detected > 0 && confidence > config.detection_confidence;

    log::debug!(
        "{}: {}/{} windows detected, confidence={:.3}, detected={}",
        entry.molecule.name(),
        windows_detected,
        windows.len(),
        confidence,
        detected
    );

    MoleculeDetection {
        molecule: entry.molecule,
        confidence,
        detected,
        windows_detected,
        windows,
    }
}

/// Match every molecule in the table, in table order
pub fn match_templates(
    spectrum: &NormalizedSpectrum,
    table: &MoleculeWindowTable,
    config: &SpectralConfig,
) -> Vec<MoleculeDetection> {
    table
        .entries()
        .iter()
        .map(|entry| match_molecule(spectrum, entry, config))
        .collect()
}
