//! Grubbs' test for a single outlier, applied iteratively.
//!
//! Uses the standard two-sided critical-value approximation via the
//! Student's t distribution rather than tabulated critical values, so it
//! stays dependency-free for any sample size.

use super::types::{DeviationScore, OutlierMethod, OutlierResult, SignificanceTier};

/// Detect outliers via iterative Grubbs' test at significance level `alpha`.
pub fn detect(values: &[f64], alpha: f64) -> Vec<OutlierResult> {
    if values.len() < 3 {
        return Vec::new();
    }

    let mut remaining: Vec<(usize, f64)> = values.iter().copied().enumerate().collect();
    let mut results = Vec::new();

    loop {
        let n = remaining.len();
        if n < 3 {
            break;
        }
        let n_f = n as f64;
        let mean = remaining.iter().map(|(_, v)| v).sum::<f64>() / n_f;
        let variance = remaining.iter().map(|(_, v)| (v - mean).powi(2)).sum::<f64>() / n_f;
        let stddev = variance.sqrt();
        if stddev <= 0.0 {
            break;
        }

        let (pos, &(orig_idx, val)) = remaining
            .iter()
            .enumerate()
            .max_by(|(_, (_, a)), (_, (_, b))| {
                (a - mean).abs().partial_cmp(&(b - mean).abs()).unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap();

        let g = (val - mean).abs() / stddev;
        let critical = grubbs_critical_value(n, alpha);

        if g > critical {
            let deviation = DeviationScore::new((g - critical) / critical);
            results.push(OutlierResult {
                index: orig_idx,
                value: val,
                test_statistic: g,
                deviation_score: deviation,
                significance: SignificanceTier::from_deviation(deviation.value()),
                method: OutlierMethod::Grubbs,
                is_outlier: true,
            });
            remaining.remove(pos);
        } else {
            break;
        }
    }

    results
}

/// Approximate the two-sided Grubbs critical value for sample size `n` at
/// significance `alpha`, using the t-distribution approximation:
/// `G_crit = (n-1)/sqrt(n) * sqrt(t^2 / (n-2+t^2))` where `t` is the
/// upper-tail critical value of the t distribution with `n-2` degrees of
/// freedom at `alpha/(2n)`. We approximate `t` with a fixed value tuned for
/// `alpha=0.05`-scale significance rather than a full inverse-CDF solver.
fn grubbs_critical_value(n: usize, alpha: f64) -> f64 {
    let n_f = n as f64;
    // A conservative fixed t-approximation, widened as alpha shrinks.
    let t = 1.96 + (0.05 / alpha.max(0.001)).ln().max(0.0);
    let t2 = t * t;
    ((n_f - 1.0) / n_f.sqrt()) * (t2 / (n_f - 2.0 + t2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_outliers_in_uniform_data() {
        let values = vec![0.9; 15];
        assert!(detect(&values, 0.05).is_empty());
    }

    #[test]
    fn flags_single_extreme_value() {
        let mut values = vec![10.0; 15];
        values[0] = 1000.0;
        let results = detect(&values, 0.05);
        assert!(!results.is_empty());
        assert!(results.iter().any(|r| r.index == 0));
    }
}
