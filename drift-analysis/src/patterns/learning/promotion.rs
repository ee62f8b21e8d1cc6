//! Promotes a discovered `Convention` to `Approved` once it has enough
//! independent evidence behind it (spread across files, settled
//! confidence, and a clear within-category majority).

use std::collections::HashMap;

use super::types::{Convention, PromotionStatus};

/// Tunables for the promotion gate.
#[derive(Debug, Clone, Copy)]
pub struct PromotionConfig {
    pub min_files: u64,
    pub min_confidence: f64,
    pub min_dominance: f64,
}

impl Default for PromotionConfig {
    fn default() -> Self {
        Self {
            min_files: 5,
            min_confidence: 0.8,
            min_dominance: 0.5,
        }
    }
}

/// Whether `convention` clears the promotion gate, given its file spread
/// (looked up by the caller since `Convention` itself doesn't carry it).
pub fn check_promotion(
    convention: &Convention,
    config: &PromotionConfig,
    file_spread: Option<u64>,
) -> bool {
    if convention.promotion_status != PromotionStatus::Discovered {
        return false;
    }
    let spread_ok = file_spread.map(|f| f >= config.min_files).unwrap_or(false);
    spread_ok
        && convention.confidence_score.value >= config.min_confidence
        && convention.dominance_ratio >= config.min_dominance
}

/// Promote every eligible convention in place. Returns the number promoted.
pub fn promote_batch_with_spread(
    conventions: &mut [Convention],
    config: &PromotionConfig,
    spread_by_pattern_id: &HashMap<String, u64>,
) -> usize {
    let mut promoted = 0;
    for convention in conventions.iter_mut() {
        let spread = spread_by_pattern_id.get(&convention.pattern_id).copied();
        if check_promotion(convention, config, spread) {
            convention.promotion_status = PromotionStatus::Approved;
            promoted += 1;
        }
    }
    promoted
}
