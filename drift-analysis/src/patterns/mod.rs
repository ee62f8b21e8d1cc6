//! Pattern intelligence: aggregation → confidence scoring → outlier
//! detection → convention discovery → promotion (spec.md §4.7
//! `PATTERN`/`VIOLATION` feedback loop).

pub mod aggregation;
pub mod confidence;
pub mod feedback;
pub mod learning;
pub mod outliers;
pub mod pipeline;

pub use feedback::{
    apply_auto_approval_gate, apply_feedback, apply_user_approval, classify_auto_approval,
    ApprovalAction, AutoApprovalClass, AutoApprovalThresholds, FeedbackAction, PatternStatus,
};
pub use pipeline::{PatternIntelligencePipeline, PipelineResult};
