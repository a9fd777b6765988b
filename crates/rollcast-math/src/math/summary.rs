//! Descriptive statistics over small sample sets.
//!
//! Every function is total: an empty input yields 0 rather than NaN, and
//! non-finite samples are ignored.

use serde::{Deserialize, Serialize};

/// Descriptive summary of a sample set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation (divides by n).
    pub std_dev: f64,
    /// `std_dev / mean * 100`, 0 when the mean is 0.
    pub cv_pct: f64,
}

/// Summarize a sample set. Returns an all-zero summary for empty input.
pub fn summarize(samples: &[f64]) -> Summary {
    let cleaned = filter_finite(samples);
    if cleaned.is_empty() {
        return Summary::default();
    }

    let mean = mean(&cleaned);
    let std_dev = population_std_dev(&cleaned, mean);
    let min = cleaned.iter().copied().fold(f64::INFINITY, f64::min);
    let max = cleaned.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Summary {
        count: cleaned.len(),
        mean,
        median: median(&cleaned),
        min,
        max,
        std_dev,
        cv_pct: coefficient_of_variation_pct(std_dev, mean),
    }
}

/// Arithmetic mean, 0 for empty input.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Median with the even/odd rule: average the two middle values when the
/// count is even. 0 for empty input.
pub fn median(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let mut values = samples.to_vec();
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

/// Population variance around a caller-supplied center.
pub fn population_variance(samples: &[f64], center: f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|v| (v - center).powi(2)).sum::<f64>() / samples.len() as f64
}

/// Population standard deviation around a caller-supplied center.
pub fn population_std_dev(samples: &[f64], center: f64) -> f64 {
    population_variance(samples, center).sqrt()
}

/// Standard deviation as a percentage of the mean (volatility).
pub fn coefficient_of_variation_pct(std_dev: f64, mean: f64) -> f64 {
    if mean == 0.0 || !mean.is_finite() || !std_dev.is_finite() {
        return 0.0;
    }
    std_dev / mean * 100.0
}

fn filter_finite(samples: &[f64]) -> Vec<f64> {
    samples.iter().copied().filter(|v| v.is_finite()).collect()
}
