//! Turns an `AggregatedPattern`'s raw location confidences into a
//! Beta-Bernoulli `ConfidenceScore`, optionally adjusted by a
//! `FeedbackStore` of accumulated user actions (spec.md §4.7 feedback
//! loop: `fix`/`dismiss`/`suppress` mutate `alpha`/`beta`).

use crate::patterns::aggregation::types::AggregatedPattern;

use super::types::{ConfidenceScore, MomentumDirection};

/// Accumulated `(alpha_delta, beta_delta)` feedback per pattern, read back
/// during scoring so user fix/dismiss/suppress actions persist across runs.
pub trait FeedbackStore: Send + Sync {
    fn adjustment_for(&self, pattern_id: &str) -> (f64, f64);
}

/// Tunables for `ConfidenceScorer`.
#[derive(Debug, Clone, Copy)]
pub struct ScorerConfig {
    /// Weight applied to the category-frequency factor (0 disables it).
    pub frequency_weight: f64,
    /// Weight applied to the recency factor; patterns seen only a few
    /// days ago get a smaller alpha/beta magnitude (less settled).
    pub recency_weight: f64,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            frequency_weight: 0.1,
            recency_weight: 0.05,
        }
    }
}

/// Scores `AggregatedPattern`s into `ConfidenceScore`s.
pub struct ConfidenceScorer {
    config: ScorerConfig,
    feedback_store: Option<Box<dyn FeedbackStore>>,
}

impl ConfidenceScorer {
    pub fn new(config: ScorerConfig) -> Self {
        Self { config, feedback_store: None }
    }

    pub fn with_feedback_store(mut self, store: Box<dyn FeedbackStore>) -> Self {
        self.feedback_store = Some(store);
        self
    }

    /// Score a single pattern.
    ///
    /// `cat_total`: total location count across the pattern's category,
    /// used for a mild frequency boost. `data_quality` in `[0,1]` scales
    /// down confidence when the extraction that produced the matches is
    /// known to be less reliable (e.g. string-fallback detection).
    pub fn score(
        &self,
        pattern: &AggregatedPattern,
        momentum: MomentumDirection,
        days_since_first_seen: u64,
        cat_total: Option<u64>,
        data_quality: Option<f64>,
    ) -> ConfidenceScore {
        let base_n = pattern.location_count as f64;
        let mean = pattern.confidence_mean.clamp(0.0, 1.0);

        let mut alpha = (base_n * mean).max(0.5);
        let mut beta = (base_n * (1.0 - mean)).max(0.5);

        if let Some(total) = cat_total {
            if total > 0 {
                let frequency_factor = (pattern.location_count as f64 / total as f64)
                    * self.config.frequency_weight
                    * base_n;
                alpha += frequency_factor;
            }
        }

        let recency_factor = (days_since_first_seen as f64).sqrt() * self.config.recency_weight;
        alpha += recency_factor * mean;
        beta += recency_factor * (1.0 - mean);

        if let Some(quality) = data_quality {
            let quality = quality.clamp(0.0, 1.0);
            alpha *= quality;
            beta *= quality.max(0.1);
        }

        if let Some(store) = &self.feedback_store {
            let (alpha_delta, beta_delta) = store.adjustment_for(&pattern.pattern_id);
            alpha += alpha_delta;
            beta += beta_delta;
        }

        ConfidenceScore::from_params(alpha.max(0.1), beta.max(0.1), momentum)
    }
}

impl Default for ConfidenceScorer {
    fn default() -> Self {
        Self::new(ScorerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::PatternCategory;

    fn pattern(location_count: u32, confidence_mean: f64) -> AggregatedPattern {
        AggregatedPattern {
            pattern_id: "p".to_string(),
            category: PatternCategory::Structural,
            location_count,
            outlier_count: 0,
            file_spread: location_count.min(5),
            hierarchy: None,
            locations: Vec::new(),
            aliases: Vec::new(),
            merged_from: Vec::new(),
            confidence_mean,
            confidence_stddev: 0.0,
            confidence_values: vec![confidence_mean; location_count as usize],
            is_dirty: true,
            location_hash: 0,
        }
    }

    #[test]
    fn higher_mean_confidence_yields_higher_score() {
        let scorer = ConfidenceScorer::default();
        let low = scorer.score(&pattern(20, 0.3), MomentumDirection::Stable, 7, None, None);
        let high = scorer.score(&pattern(20, 0.9), MomentumDirection::Stable, 7, None, None);
        assert!(high.value > low.value);
    }

    struct FixedAdjustment(f64, f64);
    impl FeedbackStore for FixedAdjustment {
        fn adjustment_for(&self, _pattern_id: &str) -> (f64, f64) {
            (self.0, self.1)
        }
    }

    #[test]
    fn feedback_store_adjustment_shifts_score() {
        let without = ConfidenceScorer::default().score(&pattern(20, 0.5), MomentumDirection::Stable, 7, None, None);
        let with_feedback = ConfidenceScorer::default()
            .with_feedback_store(Box::new(FixedAdjustment(10.0, 0.0)))
            .score(&pattern(20, 0.5), MomentumDirection::Stable, 7, None, None);
        assert!(with_feedback.value > without.value);
    }
}
