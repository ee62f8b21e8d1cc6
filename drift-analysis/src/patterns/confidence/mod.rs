//! Phase 2 of pattern intelligence: Beta-Bernoulli confidence scoring
//! (spec.md §4.7 `PATTERN.confidence`).

pub mod scorer;
pub mod types;

pub use scorer::{ConfidenceScorer, FeedbackStore, ScorerConfig};
pub use types::{ConfidenceScore, ConfidenceTier, MomentumDirection};
