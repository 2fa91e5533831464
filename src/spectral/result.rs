//! Spectral analysis result types

use super::molecules::Molecule;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One spectral measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectralSample {
    /// Wavelength in nm
    pub wavelength: f64,
    /// Measured intensity (arbitrary units)
    pub intensity: f64,
    /// Signal-to-noise ratio
    pub snr: f64,
}

impl SpectralSample {
    /// Create a sample
    pub fn new(wavelength: f64, intensity: f64, snr: f64) -> Self {
        Self {
            wavelength,
            intensity,
            snr,
        }
    }

    /// True when every field is finite
    pub fn is_finite(&self) -> bool {
        self.wavelength.is_finite() && self.intensity.is_finite() && self.snr.is_finite()
    }
}

/// Continuum-normalized view of one sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    /// Wavelength in nm
    pub wavelength: f64,
    /// Smoothed intensity
    pub smoothed: f64,
    /// Local continuum level
    pub continuum: f64,
    /// `smoothed / continuum`
    pub normalized: f64,
}

/// Detection statistics for one absorption window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Window lower bound in nm
    pub min_wavelength: f64,
    /// Window upper bound in nm
    pub max_wavelength: f64,
    /// Samples falling inside the window
    pub point_count: usize,
    /// Equivalent width in nm
    pub equivalent_width: f64,
    /// Mean SNR of the samples in the window
    pub mean_snr: f64,
    /// Fraction of samples below the absorption threshold
    pub absorption_fraction: f64,
    /// Whether the window passes all detection thresholds
    pub detected: bool,
}

/// Template-match outcome for one molecule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoleculeDetection {
    /// Molecule
    pub molecule: Molecule,
    /// Confidence in [0, 1)
    pub confidence: f64,
    /// At least one window detected and confidence above the detection threshold
    pub detected: bool,
    /// Number of windows that detected absorption
    pub windows_detected: usize,
    /// Per-window statistics, in table order
    pub windows: Vec<DetectionResult>,
}

/// Biosignature potential level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BiosignatureLevel {
    /// No meaningful indication
    Low,
    /// Suggestive chemistry
    Medium,
    /// Disequilibrium pair detected
    High,
}

impl BiosignatureLevel {
    /// Level name ("Low", "Medium", "High")
    pub fn as_str(&self) -> &'static str {
        match self {
            BiosignatureLevel::Low => "Low",
            BiosignatureLevel::Medium => "Medium",
            BiosignatureLevel::High => "High",
        }
    }
}

/// Biosignature verdict with its reason
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiosignatureAssessment {
    /// Level
    pub level: BiosignatureLevel,
    /// Human-readable reason
    pub reason: String,
}

/// Complete spectral analysis result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectroscopyResult {
    /// Planet the spectrum belongs to
    pub planet_name: String,
    /// Samples analyzed after filtering non-finite values
    pub sample_count: usize,
    /// Continuum-normalized spectrum
    pub normalized: Vec<NormalizedPoint>,
    /// Template-match results for every molecule in the table
    pub molecules: Vec<MoleculeDetection>,
    /// Detected molecules, in table order
    pub detected_molecules: Vec<Molecule>,
    /// Confidence per molecule
    pub molecule_confidences: BTreeMap<Molecule, f64>,
    /// Biosignature verdict
    pub biosignature_potential: BiosignatureAssessment,
    /// Follow-up recommendations
    pub recommendations: Vec<String>,
    /// Mean SNR over all samples
    pub average_snr: f64,
    /// Overall confidence (0 for no data, otherwise in [0.05, 0.999])
    pub confidence: f64,
    /// One-line summary
    pub summary: String,
}

impl SpectroscopyResult {
    /// Result returned when there are no usable samples
    pub fn no_data(planet_name: &str) -> Self {
        Self {
            planet_name: planet_name.to_string(),
            sample_count: 0,
            normalized: vec![],
            molecules: vec![],
            detected_molecules: vec![],
            molecule_confidences: BTreeMap::new(),
            biosignature_potential: BiosignatureAssessment {
                level: BiosignatureLevel::Low,
                reason: "No data".to_string(),
            },
            recommendations: vec![],
            average_snr: 0.0,
            confidence: 0.0,
            summary: "No spectral data available".to_string(),
        }
    }

    /// Whether a molecule was detected
    pub fn is_detected(&self, molecule: Molecule) -> bool {
        self.detected_molecules.contains(&molecule)
    }
}
