//! Generalized Extreme Studentized Deviate (ESD) test — detects up to
//! `max_outliers` outliers in one pass, unlike single-shot Grubbs.

use super::types::{DeviationScore, OutlierMethod, OutlierResult, SignificanceTier};

/// Run the generalized ESD procedure for at most `max_outliers` candidates
/// at significance level `alpha`, using the same t-approximation as
/// [`super::grubbs`].
pub fn detect(values: &[f64], max_outliers: usize, alpha: f64) -> Vec<OutlierResult> {
    let n = values.len();
    if n < 3 || max_outliers == 0 {
        return Vec::new();
    }

    let mut remaining: Vec<(usize, f64)> = values.iter().copied().enumerate().collect();
    let mut candidates: Vec<(usize, f64, f64)> = Vec::new(); // (orig_idx, value, test_statistic)

    for _ in 0..max_outliers.min(n.saturating_sub(2).max(0)) {
        if remaining.len() < 3 {
            break;
        }
        let m = remaining.len() as f64;
        let mean = remaining.iter().map(|(_, v)| v).sum::<f64>() / m;
        let variance = remaining.iter().map(|(_, v)| (v - mean).powi(2)).sum::<f64>() / m;
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

        let r = (val - mean).abs() / stddev;
        candidates.push((orig_idx, val, r));
        remaining.remove(pos);
    }

    // Find the largest k such that R_k exceeds its critical value — all
    // candidates up to and including k are reported as outliers.
    let mut last_significant: Option<usize> = None;
    for (k, (_, _, r)) in candidates.iter().enumerate() {
        let sample_size_at_k = n - k;
        let critical = esd_critical_value(sample_size_at_k, alpha);
        if *r > critical {
            last_significant = Some(k);
        }
    }

    let Some(cutoff) = last_significant else {
        return Vec::new();
    };

    candidates
        .into_iter()
        .take(cutoff + 1)
        .map(|(orig_idx, val, r)| {
            let critical = esd_critical_value(n, alpha);
            let deviation = DeviationScore::new((r - critical) / critical.max(1e-9));
            OutlierResult {
                index: orig_idx,
                value: val,
                test_statistic: r,
                deviation_score: deviation,
                significance: SignificanceTier::from_deviation(deviation.value()),
                method: OutlierMethod::GeneralizedEsd,
                is_outlier: true,
            }
        })
        .collect()
}

fn esd_critical_value(n: usize, alpha: f64) -> f64 {
    let n_f = n as f64;
    if n_f < 3.0 {
        return f64::INFINITY;
    }
    let t = 1.96 + (0.05 / alpha.max(0.001)).ln().max(0.0);
    let t2 = t * t;
    ((n_f - 1.0) / n_f.sqrt()) * (t2 / (n_f - 2.0 + t2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_outliers_in_uniform_data() {
        let values = vec![0.9; 25];
        assert!(detect(&values, 5, 0.05).is_empty());
    }

    #[test]
    fn flags_multiple_extreme_values() {
        let mut values = vec![10.0; 25];
        values[0] = 1000.0;
        values[1] = 950.0;
        let results = detect(&values, 5, 0.05);
        assert!(!results.is_empty());
    }
}
