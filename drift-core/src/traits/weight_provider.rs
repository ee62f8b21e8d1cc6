//! Confidence-weighting schemes for data-access recognition (spec.md §4.2).
//!
//! A `DATA_ACCESS` candidate's final confidence is a weighted sum of five
//! factors — table-name present, fields present, operation clear, framework
//! matched, literal-derived. The weights are pluggable so a calibration pass
//! can adjust them per-project without touching the extractor: the default
//! is a fixed table (`StaticWeightProvider`); `AdaptiveWeightTable` lets a
//! future calibration step persist per-factor adjustments learned from
//! pattern feedback.

use std::collections::HashMap;

/// The five confidence factors contributing to a `DATA_ACCESS` candidate's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfidenceFactor {
    TableNamePresent,
    FieldsPresent,
    OperationClear,
    FrameworkMatched,
    LiteralDerived,
}

impl ConfidenceFactor {
    pub const ALL: [ConfidenceFactor; 5] = [
        ConfidenceFactor::TableNamePresent,
        ConfidenceFactor::FieldsPresent,
        ConfidenceFactor::OperationClear,
        ConfidenceFactor::FrameworkMatched,
        ConfidenceFactor::LiteralDerived,
    ];
}

/// A versioned set of per-factor weights. `migrate_to` describes how an
/// older weight table is carried forward when the factor set changes.
pub trait WeightProvider: Send + Sync {
    /// Weight contributed by `factor`, in `[0,1]`. Implementations should
    /// keep `ALL.iter().map(weight).sum() == 1.0` so confidence stays a
    /// proper weighted average.
    fn weight(&self, factor: ConfidenceFactor) -> f64;

    /// Compute the final confidence given which factors were satisfied.
    fn score(&self, satisfied: &[ConfidenceFactor]) -> f64 {
        satisfied.iter().map(|f| self.weight(*f)).sum()
    }
}

/// The spec's fixed weights: table 0.3 / fields 0.2 / operation 0.2 /
/// framework 0.2 / literal 0.1.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticWeightProvider;

impl WeightProvider for StaticWeightProvider {
    fn weight(&self, factor: ConfidenceFactor) -> f64 {
        match factor {
            ConfidenceFactor::TableNamePresent => 0.3,
            ConfidenceFactor::FieldsPresent => 0.2,
            ConfidenceFactor::OperationClear => 0.2,
            ConfidenceFactor::FrameworkMatched => 0.2,
            ConfidenceFactor::LiteralDerived => 0.1,
        }
    }
}

/// A record of a weight-table change, kept so recomputed confidences can be
/// explained ("this dropped because `framework_matched` went from 0.2 to 0.15
/// on 2024-03-01").
#[derive(Debug, Clone)]
pub struct MigrationPath {
    pub from_version: u32,
    pub to_version: u32,
    pub changed: Vec<(ConfidenceFactor, f64, f64)>,
}

/// A weight table that starts from the static defaults and can be nudged per
/// factor — e.g. by a future calibration pass over accepted/dismissed
/// `DATA_ACCESS` feedback. Not renormalized automatically; callers that want
/// the weights to keep summing to 1.0 must adjust factors in complementary
/// pairs.
#[derive(Debug, Clone)]
pub struct AdaptiveWeightTable {
    version: u32,
    weights: HashMap<ConfidenceFactor, f64>,
}

impl Default for AdaptiveWeightTable {
    fn default() -> Self {
        let base = StaticWeightProvider;
        let weights = ConfidenceFactor::ALL
            .iter()
            .map(|f| (*f, base.weight(*f)))
            .collect();
        Self { version: 1, weights }
    }
}

impl AdaptiveWeightTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adjust a single factor's weight, returning the migration record.
    pub fn adjust(&mut self, factor: ConfidenceFactor, new_weight: f64) -> MigrationPath {
        let old_weight = self.weight(factor);
        self.weights.insert(factor, new_weight);
        let to_version = self.version + 1;
        let path = MigrationPath {
            from_version: self.version,
            to_version,
            changed: vec![(factor, old_weight, new_weight)],
        };
        self.version = to_version;
        path
    }

    pub fn version(&self) -> u32 {
        self.version
    }
}

impl WeightProvider for AdaptiveWeightTable {
    fn weight(&self, factor: ConfidenceFactor) -> f64 {
        self.weights
            .get(&factor)
            .copied()
            .unwrap_or_else(|| StaticWeightProvider.weight(factor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_weights_sum_to_one() {
        let provider = StaticWeightProvider;
        let total: f64 = ConfidenceFactor::ALL.iter().map(|f| provider.weight(*f)).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn adaptive_table_starts_from_static_defaults() {
        let table = AdaptiveWeightTable::new();
        let provider = StaticWeightProvider;
        for factor in ConfidenceFactor::ALL {
            assert_eq!(table.weight(factor), provider.weight(factor));
        }
    }

    #[test]
    fn adjust_records_migration_and_bumps_version() {
        let mut table = AdaptiveWeightTable::new();
        let path = table.adjust(ConfidenceFactor::FrameworkMatched, 0.15);
        assert_eq!(path.from_version, 1);
        assert_eq!(path.to_version, 2);
        assert_eq!(table.weight(ConfidenceFactor::FrameworkMatched), 0.15);
    }

    #[test]
    fn score_sums_only_satisfied_factors() {
        let provider = StaticWeightProvider;
        let score = provider.score(&[ConfidenceFactor::TableNamePresent, ConfidenceFactor::FieldsPresent]);
        assert!((score - 0.5).abs() < 1e-9);
    }
}
