//! Continuum estimation and normalization
//!
//! The continuum is the local unabsorbed intensity level. Taking a high
//! percentile of a running window (rather than the mean) keeps deep absorption
//! dips from dragging the baseline down.

use super::result::NormalizedPoint;

/// Lower bound applied to every continuum value
pub const CONTINUUM_FLOOR: f64 = 1e-6;

/// Continuum-normalized spectrum in struct-of-arrays form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedSpectrum {
    /// Wavelengths in nm, ascending
    pub wavelengths: Vec<f64>,
    /// Smoothed intensities
    pub smoothed: Vec<f64>,
    /// Local continuum per point
    pub continuum: Vec<f64>,
    /// `smoothed / continuum`
    pub normalized: Vec<f64>,
    /// Per-point SNR
    pub snr: Vec<f64>,
}

impl NormalizedSpectrum {
    /// Build from smoothed intensities
    ///
    /// All slices must have the same length.
    pub fn new(
        wavelengths: Vec<f64>,
        smoothed: Vec<f64>,
        snr: Vec<f64>,
        min_window: usize,
        percentile: f64,
    ) -> Self {
        let continuum = estimate_continuum(&smoothed, min_window, percentile);
        let normalized = smoothed
            .iter()
            .zip(&continuum)
            .map(|(i, c)| i / c)
            .collect();
        Self {
            wavelengths,
            smoothed,
            continuum,
            normalized,
            snr,
        }
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.wavelengths.len()
    }

    /// True when there are no points
    pub fn is_empty(&self) -> bool {
        self.wavelengths.is_empty()
    }

    /// Index range of points with wavelength in `[min, max]`
    ///
    /// Relies on ascending wavelengths.
    pub fn range(&self, min: f64, max: f64) -> std::ops::Range<usize> {
        let start = self.wavelengths.partition_point(|&w| w < min);
        let end = self.wavelengths.partition_point(|&w| w <= max);
        start..end.max(start)
    }

    /// Per-point view for reporting
    pub fn points(&self) -> Vec<NormalizedPoint> {
        (0..self.len())
            .map(|i| NormalizedPoint {
                wavelength: self.wavelengths[i],
                smoothed: self.smoothed[i],
                continuum: self.continuum[i],
                normalized: self.normalized[i],
            })
            .collect()
    }
}

/// Continuum window size for `n` points: `max(min_window, n / 20)`, made odd
pub fn continuum_window(n: usize, min_window: usize) -> usize {
    let window = min_window.max(n / 20);
    if window % 2 == 0 {
        window + 1
    } else {
        window
    }
}

/// Running percentile continuum
///
/// For each point, sorts the centered window of intensities (truncated at the
/// edges) and takes the value at rank `floor(percentile * (len - 1))`. Results
/// are floored at [`CONTINUUM_FLOOR`].
pub fn estimate_continuum(intensities: &[f64], min_window: usize, percentile: f64) -> Vec<f64> {
    let n = intensities.len();
    if n == 0 {
        return vec![];
    }

    let window = continuum_window(n, min_window);
    let half = window / 2;
    log::debug!(
        "Estimating continuum over {} points (window={}, percentile={:.2})",
        n,
        window,
        percentile
    );

    let mut buffer = Vec::with_capacity(window);
    (0..n)
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + half).min(n - 1);
            buffer.clear();
            buffer.extend_from_slice(&intensities[lo..=hi]);
            buffer.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            let rank = ((buffer.len() - 1) as f64 * percentile).floor() as usize;
            buffer[rank.min(buffer.len() - 1)].max(CONTINUUM_FLOOR)
        })
        .collect()
}
