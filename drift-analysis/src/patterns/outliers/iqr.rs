//! Interquartile-range (Tukey's fences) outlier detection — robust to
//! non-normal and skewed distributions.

use super::types::{DeviationScore, OutlierMethod, OutlierResult, SignificanceTier};

/// Flag values outside `[Q1 - k*IQR, Q3 + k*IQR]`.
pub fn detect(values: &[f64], multiplier: f64) -> Vec<OutlierResult> {
    if values.len() < 4 {
        return Vec::new();
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let q1 = percentile(&sorted, 0.25);
    let q3 = percentile(&sorted, 0.75);
    let iqr = q3 - q1;

    if iqr <= 0.0 {
        return Vec::new();
    }

    let lower = q1 - multiplier * iqr;
    let upper = q3 + multiplier * iqr;

    let mut results = Vec::new();
    for (idx, &val) in values.iter().enumerate() {
        if val < lower || val > upper {
            let distance = if val < lower { lower - val } else { val - upper };
            let deviation = DeviationScore::new(distance / iqr);
            results.push(OutlierResult {
                index: idx,
                value: val,
                test_statistic: distance / iqr,
                deviation_score: deviation,
                significance: SignificanceTier::from_deviation(deviation.value()),
                method: OutlierMethod::Iqr,
                is_outlier: true,
            });
        }
    }

    results
}

/// Linear-interpolation percentile over an already-sorted slice.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = p * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = rank - lo as f64;
        sorted[lo] + (sorted[hi] - sorted[lo]) * frac
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_outliers_in_uniform_data() {
        let values = vec![0.9; 20];
        assert!(detect(&values, 1.5).is_empty());
    }

    #[test]
    fn flags_extreme_value() {
        let mut values: Vec<f64> = (0..30).map(|i| i as f64).collect();
        values.push(10_000.0);
        let results = detect(&values, 1.5);
        assert!(!results.is_empty());
    }

    #[test]
    fn too_few_values_returns_empty() {
        assert!(detect(&[1.0, 2.0, 3.0], 1.5).is_empty());
    }
}
