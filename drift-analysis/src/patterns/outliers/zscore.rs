//! Iterative Z-Score outlier detection (assumes approximately normal data).

use super::types::{DeviationScore, OutlierMethod, OutlierResult, SignificanceTier};

/// Detect outliers by iteratively removing the most extreme Z-Score value
/// and recomputing mean/stddev, up to `max_iterations` times. Each removed
/// point above `threshold` standard deviations is reported against the
/// mean/stddev of the working set at the time it was flagged.
pub fn detect(values: &[f64], threshold: f64, max_iterations: usize) -> Vec<OutlierResult> {
    if values.len() < 3 {
        return Vec::new();
    }

    let mut remaining: Vec<(usize, f64)> = values.iter().copied().enumerate().collect();
    let mut results = Vec::new();

    for _ in 0..max_iterations.max(1) {
        if remaining.len() < 3 {
            break;
        }
        let n = remaining.len() as f64;
        let mean = remaining.iter().map(|(_, v)| v).sum::<f64>() / n;
        let variance = remaining.iter().map(|(_, v)| (v - mean).powi(2)).sum::<f64>() / n;
        let stddev = variance.sqrt();

        if stddev <= 0.0 {
            break;
        }

        let mut worst: Option<(usize, usize, f64, f64)> = None; // (pos_in_remaining, orig_idx, value, z)
        for (pos, &(orig_idx, val)) in remaining.iter().enumerate() {
            let z = (val - mean) / stddev;
            if z.abs() > threshold {
                let replace = match &worst {
                    None => true,
                    Some((_, _, _, best_z)) => z.abs() > best_z.abs(),
                };
                if replace {
                    worst = Some((pos, orig_idx, val, z));
                }
            }
        }

        match worst {
            Some((pos, orig_idx, val, z)) => {
                let deviation = DeviationScore::new((z.abs() - threshold) / threshold);
                results.push(OutlierResult {
                    index: orig_idx,
                    value: val,
                    test_statistic: z,
                    deviation_score: deviation,
                    significance: SignificanceTier::from_deviation(deviation.value()),
                    method: OutlierMethod::ZScore,
                    is_outlier: true,
                });
                remaining.remove(pos);
            }
            None => break,
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_outliers_in_uniform_data() {
        let values = vec![0.85; 50];
        assert!(detect(&values, 3.0, 5).is_empty());
    }

    #[test]
    fn flags_single_extreme_value() {
        let mut values = vec![10.0; 40];
        values[0] = 500.0;
        let results = detect(&values, 3.0, 5);
        assert!(!results.is_empty());
        assert!(results.iter().any(|r| r.index == 0));
    }

    #[test]
    fn too_few_values_returns_empty() {
        assert!(detect(&[1.0, 2.0], 3.0, 5).is_empty());
    }
}
