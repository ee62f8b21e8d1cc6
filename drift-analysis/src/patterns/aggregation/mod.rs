//! Phase 1 of pattern intelligence: dedup and group raw `PatternMatch`es
//! into project-level `AggregatedPattern`s.

pub mod pipeline;
pub mod types;

pub use pipeline::{AggregationPipeline, AggregationResult};
pub use types::{
    AggregatedPattern, AggregationConfig, MergeCandidate, MergeDecision, PatternHierarchy,
    PatternLocation,
};
