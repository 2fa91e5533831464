//! Intensity smoothing

/// Centered moving average
///
/// Each output point is the mean of the `window` samples centered on it. Near
/// the edges the window shrinks symmetrically so it stays centered (the first
/// and last points are returned unchanged). Inputs shorter than the window, or
/// a window of 1, are returned as-is.
///
/// # Arguments
///
/// * `values` - Intensities ordered by wavelength
/// * `window` - Window size in samples (odd)
///
/// # Example
///
/// ```
/// use exo_insight::spectral::smoothing::moving_average;
///
/// let smoothed = moving_average(&[1.0, 2.0, 6.0, 2.0, 1.0], 3);
/// assert_eq!(smoothed, vec![1.0, 3.0, 10.0 / 3.0, 3.0, 1.0]);
/// ```
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    if n < window || window <= 1 {
        log::debug!(
            "Skipping smoothing: {} samples, window {}",
            n,
            window
        );
        return values.to_vec();
    }

    let half = window / 2;
    (0..n)
        .map(|i| {
            let h = half.min(i).min(n - 1 - i);
            let slice = &values[i - h..=i + h];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}
