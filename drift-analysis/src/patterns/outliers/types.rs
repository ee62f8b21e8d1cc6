//! Shared types for statistical outlier detection over per-pattern
//! confidence-value series (spec.md §4.7 `outlier_ratio`).

use std::cmp::Ordering;

/// A normalized deviation magnitude, always finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviationScore(f64);

impl DeviationScore {
    pub fn new(value: f64) -> Self {
        Self(if value.is_finite() { value.max(0.0) } else { 0.0 })
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Which statistical test flagged a value as an outlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutlierMethod {
    ZScore,
    Grubbs,
    GeneralizedEsd,
    Iqr,
    Mad,
    RuleBased,
}

/// How extreme a detected outlier is, bucketed for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignificanceTier {
    Low,
    Moderate,
    High,
    Critical,
}

impl SignificanceTier {
    /// Bucket a normalized deviation score into a significance tier.
    pub fn from_deviation(deviation: f64) -> Self {
        if deviation >= 2.0 {
            SignificanceTier::Critical
        } else if deviation >= 1.0 {
            SignificanceTier::High
        } else if deviation >= 0.3 {
            SignificanceTier::Moderate
        } else {
            SignificanceTier::Low
        }
    }
}

/// A single detected outlier.
#[derive(Debug, Clone)]
pub struct OutlierResult {
    pub index: usize,
    pub value: f64,
    pub test_statistic: f64,
    pub deviation_score: DeviationScore,
    pub significance: SignificanceTier,
    pub method: OutlierMethod,
    pub is_outlier: bool,
}

/// Tunables for the auto-selecting `OutlierDetector`.
#[derive(Debug, Clone)]
pub struct OutlierConfig {
    /// Below this sample size, fall back to rule-based detection only.
    pub min_sample_size: usize,
    pub z_threshold: f64,
    pub max_iterations: usize,
    pub alpha: f64,
    pub iqr_multiplier: f64,
    pub mad_threshold: f64,
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self {
            min_sample_size: 10,
            z_threshold: 3.0,
            max_iterations: 5,
            alpha: 0.05,
            iqr_multiplier: 1.5,
            mad_threshold: 3.5,
        }
    }
}

/// Order outlier results by descending deviation, for picking a "worst" one.
pub fn by_deviation_desc(a: &OutlierResult, b: &OutlierResult) -> Ordering {
    b.deviation_score
        .value()
        .partial_cmp(&a.deviation_score.value())
        .unwrap_or(Ordering::Equal)
}
