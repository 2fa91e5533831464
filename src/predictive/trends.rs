//! Discovery trend analysis and forecasting
//!
//! # Algorithm
//!
//! 1. Bucket discoveries by year
//! 2. Keep the trailing N distinct years (ascending)
//! 3. Single exponential smoothing with α = 0.4 gives a baseline level
//! 4. Forecast 3 years ahead, scaling the baseline by `(1 + 0.03k)` at step k
//! 5. Rank discovery methods and telescopes by frequency

use crate::config::ScorerConfig;
use crate::planet::habitability::round_to;
use crate::planet::PlanetRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Smoothing factor for the discovery series
pub const SMOOTHING_ALPHA: f64 = 0.4;

/// Number of forecast years
pub const FORECAST_YEARS: usize = 3;

/// Per-step growth applied to the forecast
pub const FORECAST_GROWTH_STEP: f64 = 0.03;

/// Discoveries in one year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCount {
    /// Discovery year
    pub year: i32,
    /// Number of discoveries
    pub count: usize,
}

/// One forecast value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Forecast year
    pub year: i32,
    /// Expected discoveries (2 decimals)
    pub expected: f64,
}

/// A name with its frequency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCount {
    /// Method or telescope name
    pub name: String,
    /// Occurrences
    pub count: usize,
}

/// Discovery trend analysis output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    /// Total records analyzed (including those without a year)
    pub total: usize,
    /// Windowed yearly counts, ascending by year
    pub yearly: Vec<YearCount>,
    /// Exponentially smoothed windowed series
    pub smoothed: Vec<f64>,
    /// Final smoothed level
    pub baseline: f64,
    /// Forecast for the years after the last windowed year
    pub forecast: Vec<ForecastPoint>,
    /// `(last - first) / max(first, 1)` over the windowed counts (3 decimals)
    pub growth_ratio: f64,
    /// Discovery methods by descending frequency
    pub methods: Vec<RankedCount>,
    /// Telescopes by descending frequency, truncated
    pub telescopes: Vec<RankedCount>,
}

/// Single exponential smoothing seeded with the first value
///
/// # Example
///
/// ```
/// use exo_insight::predictive::trends::exponential_smoothing;
///
/// let s = exponential_smoothing(&[10.0, 20.0], 0.4);
/// assert_eq!(s, vec![10.0, 14.0]);
/// ```
pub fn exponential_smoothing(series: &[f64], alpha: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(series.len());
    let mut level = match series.first() {
        Some(&first) => first,
        None => return out,
    };
    for &x in series {
        level = alpha * x + (1.0 - alpha) * level;
        out.push(level);
    }
    out
}

/// Analyze discovery patterns across a catalog
pub fn analyze_discovery_patterns(history: &[PlanetRecord], config: &ScorerConfig) -> ForecastSeries {
    log::debug!(
        "Analyzing discovery patterns over {} records (window={} years)",
        history.len(),
        config.trend_window_years
    );

    let mut by_year: BTreeMap<i32, usize> = BTreeMap::new();
    for year in history.iter().filter_map(|p| p.discovery_year) {
        *by_year.entry(year).or_insert(0) += 1;
    }

    let skip = by_year.len().saturating_sub(config.trend_window_years);
    let yearly: Vec<YearCount> = by_year
        .into_iter()
        .skip(skip)
        .map(|(year, count)| YearCount { year, count })
        .collect();

    let counts: Vec<f64> = yearly.iter().map(|y| y.count as f64).collect();
    let smoothed = exponential_smoothing(&counts, SMOOTHING_ALPHA);
    let baseline = smoothed.last().copied().unwrap_or(0.0);

    let forecast = match yearly.last() {
        Some(last) => forecast(baseline, last.year),
        None => vec![],
    };

    let growth_ratio = match (counts.first(), counts.last()) {
        (Some(&first), Some(&last)) if counts.len() >= 2 => {
            round_to((last - first) / first.max(1.0), 3)
        }
        _ => 0.0,
    };

    let methods = rank(history.iter().filter_map(|p| p.discovery_method.as_deref()), None);
    let telescopes = rank(
        history.iter().filter_map(|p| p.telescope.as_deref()),
        Some(config.top_telescopes),
    );

    log::debug!(
        "Discovery trend: {} windowed years, baseline={:.2}, growth={:.3}",
        yearly.len(),
        baseline,
        growth_ratio
    );

    ForecastSeries {
        total: history.len(),
        yearly,
        smoothed,
        baseline,
        forecast,
        growth_ratio,
        methods,
        telescopes,
    }
}

/// Smoothing the baseline against itself leaves it unchanged, so step k is
/// `baseline * (1 + 0.03k)`
fn forecast(baseline: f64, last_year: i32) -> Vec<ForecastPoint> {
    (1..=FORECAST_YEARS)
        .map(|k| ForecastPoint {
            year: last_year + k as i32,
            expected: round_to(baseline * (1.0 + k as f64 * FORECAST_GROWTH_STEP), 2),
        })
        .collect()
}

/// Count non-blank names, order by descending count then name
fn rank<'a>(names: impl Iterator<Item = &'a str>, limit: Option<usize>) -> Vec<RankedCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in names.map(str::trim).filter(|n| !n.is_empty()) {
        *counts.entry(name).or_insert(0) += 1;
    }

    let mut ranked: Vec<RankedCount> = counts
        .into_iter()
        .map(|(name, count)| RankedCount {
            name: name.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    ranked
}
