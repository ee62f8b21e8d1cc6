//! Domain-specific outlier rules that fire regardless of sample size —
//! the only detectors active below `OutlierConfig::min_sample_size`.

use super::types::{DeviationScore, OutlierMethod, OutlierResult, SignificanceTier};

/// A single named rule: given a value series, return the outliers it flags.
pub struct OutlierRule {
    pub name: &'static str,
    check: fn(&[f64]) -> Vec<OutlierResult>,
}

impl OutlierRule {
    fn apply(&self, values: &[f64]) -> Vec<OutlierResult> {
        (self.check)(values)
    }
}

/// Flags any exactly-zero confidence value — a pattern instance with zero
/// confidence is always worth surfacing, independent of its neighbors.
pub fn zero_confidence_rule() -> OutlierRule {
    OutlierRule {
        name: "zero_confidence",
        check: |values| {
            values
                .iter()
                .enumerate()
                .filter(|(_, &v)| v == 0.0)
                .map(|(idx, &val)| OutlierResult {
                    index: idx,
                    value: val,
                    test_statistic: f64::INFINITY,
                    deviation_score: DeviationScore::new(2.0),
                    significance: SignificanceTier::Critical,
                    method: OutlierMethod::RuleBased,
                    is_outlier: true,
                })
                .collect()
        },
    }
}

/// Flags values that fall far below the series median — a sudden
/// confidence "cliff" relative to the rest of the pattern's locations.
pub fn confidence_cliff_rule() -> OutlierRule {
    OutlierRule {
        name: "confidence_cliff",
        check: |values| {
            if values.len() < 3 {
                return Vec::new();
            }
            let mut sorted = values.to_vec();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            let median = sorted[sorted.len() / 2];
            if median <= 0.0 {
                return Vec::new();
            }

            values
                .iter()
                .enumerate()
                .filter(|(_, &v)| v > 0.0 && v < median * 0.3)
                .map(|(idx, &val)| {
                    let deviation = DeviationScore::new((median - val) / median);
                    OutlierResult {
                        index: idx,
                        value: val,
                        test_statistic: median - val,
                        deviation_score: deviation,
                        significance: SignificanceTier::from_deviation(deviation.value()),
                        method: OutlierMethod::RuleBased,
                        is_outlier: true,
                    }
                })
                .collect()
        },
    }
}

/// Flags a single value isolated far from the rest of a tight cluster —
/// an approximation of a pattern appearing in exactly one unrelated file
/// when only its confidence series (not file identity) is available.
pub fn file_isolation_rule() -> OutlierRule {
    OutlierRule {
        name: "file_isolation",
        check: |values| {
            if values.len() < 4 {
                return Vec::new();
            }
            let n = values.len() as f64;
            let mean = values.iter().sum::<f64>() / n;
            let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            let stddev = variance.sqrt();
            if stddev <= 0.0 {
                return Vec::new();
            }

            // Only fire when exactly one value sits far from an otherwise
            // tight cluster (low spread among the rest).
            let far: Vec<usize> = values
                .iter()
                .enumerate()
                .filter(|(_, &v)| (v - mean).abs() / stddev > 2.5)
                .map(|(idx, _)| idx)
                .collect();

            if far.len() != 1 {
                return Vec::new();
            }

            let idx = far[0];
            let val = values[idx];
            let deviation = DeviationScore::new(((val - mean).abs() / stddev - 2.5) / 2.5);
            vec![OutlierResult {
                index: idx,
                value: val,
                test_statistic: (val - mean) / stddev,
                deviation_score: deviation,
                significance: SignificanceTier::from_deviation(deviation.value()),
                method: OutlierMethod::RuleBased,
                is_outlier: true,
            }]
        },
    }
}

/// Apply every rule and merge results, deduplicating by index (first match wins).
pub fn detect(values: &[f64], rules: &[OutlierRule]) -> Vec<OutlierResult> {
    let mut seen = std::collections::HashSet::new();
    let mut results = Vec::new();
    for rule in rules {
        for result in rule.apply(values) {
            if seen.insert(result.index) {
                results.push(result);
            }
        }
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_confidence_is_flagged() {
        let rule = zero_confidence_rule();
        let results = rule.apply(&[0.9, 0.0, 0.8]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].index, 1);
    }

    #[test]
    fn cliff_is_flagged_against_median() {
        let rule = confidence_cliff_rule();
        let results = rule.apply(&[0.9, 0.9, 0.9, 0.05]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].index, 3);
    }

    #[test]
    fn isolated_value_is_flagged() {
        let rule = file_isolation_rule();
        let mut values = vec![0.9; 10];
        values[0] = 0.01;
        let results = rule.apply(&values);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].index, 0);
    }

    #[test]
    fn rules_dedupe_by_index() {
        let rules = vec![zero_confidence_rule(), confidence_cliff_rule()];
        let results = detect(&[0.9, 0.9, 0.9, 0.0], &rules);
        assert_eq!(results.iter().filter(|r| r.index == 3).count(), 1);
    }
}
