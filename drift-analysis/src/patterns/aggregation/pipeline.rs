//! Phase 1 of `PatternIntelligencePipeline`: dedups and groups raw
//! `PatternMatch`es (one per detection) into project-level
//! `AggregatedPattern`s (one per pattern id), computing the confidence
//! statistics and outlier-ready value series later stages consume.

use std::collections::HashMap;

use xxhash_rust::xxh3::xxh3_64;

use crate::engine::types::PatternMatch;

use super::types::{AggregationConfig, AggregatedPattern, PatternLocation};

/// Output of a single aggregation run.
#[derive(Debug, Clone)]
pub struct AggregationResult {
    pub patterns: Vec<AggregatedPattern>,
    pub total_matches: usize,
    pub duplicate_locations_dropped: usize,
}

/// Groups raw pattern matches into `AggregatedPattern`s, applying
/// per-pattern location caps and computing confidence statistics.
pub struct AggregationPipeline {
    config: AggregationConfig,
}

impl AggregationPipeline {
    pub fn new(config: AggregationConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(AggregationConfig::default())
    }

    /// Run the aggregation pass over a flat batch of pattern matches.
    pub fn run(&self, matches: &[PatternMatch]) -> AggregationResult {
        let mut by_pattern: HashMap<&str, Vec<&PatternMatch>> = HashMap::new();
        for m in matches {
            by_pattern.entry(m.pattern_id.as_str()).or_default().push(m);
        }

        let mut patterns = Vec::with_capacity(by_pattern.len());
        let mut duplicate_locations_dropped = 0usize;

        for (pattern_id, group) in by_pattern {
            let mut seen = std::collections::HashSet::new();
            let mut locations = Vec::with_capacity(group.len());
            let category = group
                .first()
                .map(|m| m.category)
                .unwrap_or(crate::engine::types::PatternCategory::Structural);

            for m in group {
                let key = (m.file.clone(), m.line, m.column);
                if !seen.insert(key) {
                    duplicate_locations_dropped += 1;
                    continue;
                }
                if locations.len() >= self.config.max_locations_per_pattern {
                    continue;
                }
                locations.push(PatternLocation {
                    file: m.file.clone(),
                    line: m.line,
                    column: m.column,
                    confidence: m.confidence,
                    is_outlier: false,
                    matched_text: if m.matched_text.is_empty() {
                        None
                    } else {
                        Some(m.matched_text.clone())
                    },
                });
            }

            let confidence_values: Vec<f64> = {
                let mut v: Vec<f64> = locations.iter().map(|l| l.confidence as f64).collect();
                v.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                v
            };
            let (mean, stddev) = mean_stddev(&confidence_values);
            let file_spread = {
                let files: std::collections::HashSet<&str> =
                    locations.iter().map(|l| l.file.as_str()).collect();
                files.len() as u32
            };
            let location_hash = hash_locations(&locations);
            let location_count = locations.len() as u32;

            patterns.push(AggregatedPattern {
                pattern_id: pattern_id.to_string(),
                category,
                location_count,
                outlier_count: 0,
                file_spread,
                hierarchy: None,
                locations,
                aliases: Vec::new(),
                merged_from: Vec::new(),
                confidence_mean: mean,
                confidence_stddev: stddev,
                confidence_values,
                is_dirty: true,
                location_hash,
            });
        }

        patterns.sort_by(|a, b| a.pattern_id.cmp(&b.pattern_id));

        AggregationResult {
            total_matches: matches.len(),
            patterns,
            duplicate_locations_dropped,
        }
    }
}

fn mean_stddev(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

fn hash_locations(locations: &[PatternLocation]) -> u64 {
    let mut buf = String::new();
    for loc in locations {
        buf.push_str(&loc.file);
        buf.push(':');
        buf.push_str(&loc.line.to_string());
        buf.push(':');
        buf.push_str(&loc.column.to_string());
        buf.push(';');
    }
    xxh3_64(buf.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::{DetectionMethod, PatternCategory};
    use smallvec::smallvec;

    fn make_match(pattern_id: &str, file: &str, line: u32, confidence: f32) -> PatternMatch {
        PatternMatch {
            pattern_id: pattern_id.to_string(),
            category: PatternCategory::Structural,
            file: file.to_string(),
            line,
            column: 0,
            confidence,
            matched_text: String::new(),
            detection_method: DetectionMethod::AstVisitor,
            cwe_ids: smallvec![],
            owasp: None,
        }
    }

    #[test]
    fn groups_matches_by_pattern_id() {
        let pipeline = AggregationPipeline::with_defaults();
        let matches = vec![
            make_match("p1", "a.ts", 1, 0.9),
            make_match("p1", "b.ts", 2, 0.8),
            make_match("p2", "a.ts", 3, 0.5),
        ];
        let result = pipeline.run(&matches);
        assert_eq!(result.patterns.len(), 2);
        let p1 = result.patterns.iter().find(|p| p.pattern_id == "p1").unwrap();
        assert_eq!(p1.location_count, 2);
        assert_eq!(p1.file_spread, 2);
    }

    #[test]
    fn deduplicates_identical_locations() {
        let pipeline = AggregationPipeline::with_defaults();
        let matches = vec![
            make_match("p1", "a.ts", 1, 0.9),
            make_match("p1", "a.ts", 1, 0.9),
        ];
        let result = pipeline.run(&matches);
        assert_eq!(result.patterns[0].location_count, 1);
        assert_eq!(result.duplicate_locations_dropped, 1);
    }

    #[test]
    fn computes_confidence_statistics() {
        let pipeline = AggregationPipeline::with_defaults();
        let matches = vec![
            make_match("p1", "a.ts", 1, 1.0),
            make_match("p1", "b.ts", 2, 0.0),
        ];
        let result = pipeline.run(&matches);
        let p1 = &result.patterns[0];
        assert!((p1.confidence_mean - 0.5).abs() < 1e-9);
    }
}
