//! `IDriftEnforcement` trait — violations and pattern feedback.
//!
//! Maps to `drift-storage/src/queries/enforcement.rs`. A `VIOLATION`
//! (spec.md §3) references a `PATTERN`; feedback on a violation is the
//! input to the pattern's Beta-Bernoulli confidence update (spec.md §4.7).

use crate::errors::StorageError;
use std::sync::Arc;

// ─── Row Types ──────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ViolationRow {
    pub id: String,
    pub pattern_id: String,
    pub file: String,
    pub line: i64,
    pub severity: String,
    pub confidence_at_detection: f64,
}

/// One feedback action against a violation: `fix` (α += 1), `dismiss`
/// (β += 1), or `suppress` (β += 0.5) — spec.md §4.7.
#[derive(Debug, Clone)]
pub struct FeedbackRow {
    pub violation_id: String,
    pub pattern_id: String,
    pub action: String,
    pub reason: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Default)]
pub struct FeedbackStats {
    pub total_count: u32,
    pub fix_count: u32,
    pub dismiss_count: u32,
    pub suppress_count: u32,
}

/// PATTERN's `discovered → approved → ignored` lifecycle (spec.md §3,
/// §4.7). `user_set` is true once a human has called `approve_pattern`;
/// the auto-approval gate must leave a `user_set` row untouched.
#[derive(Debug, Clone)]
pub struct PatternStatusRow {
    pub pattern_id: String,
    pub status: String,
    pub user_set: bool,
    pub actor_id: Option<String>,
    pub updated_at: i64,
}

// ─── Trait ───────────────────────────────────────────────────────────

/// Enforcement storage operations: violations and the feedback that drives
/// pattern confidence.
pub trait IDriftEnforcement: Send + Sync {
    // ── violations ──

    fn insert_violation(&self, v: &ViolationRow) -> Result<(), StorageError>;
    fn get_violation(&self, id: &str) -> Result<Option<ViolationRow>, StorageError>;
    fn query_violations_by_file(&self, file: &str) -> Result<Vec<ViolationRow>, StorageError>;
    fn query_violations_by_pattern(&self, pattern_id: &str) -> Result<Vec<ViolationRow>, StorageError>;
    fn query_all_violations(&self) -> Result<Vec<ViolationRow>, StorageError>;

    // ── feedback ──

    fn insert_feedback(&self, f: &FeedbackRow) -> Result<(), StorageError>;
    fn query_feedback_by_pattern(&self, pattern_id: &str) -> Result<Vec<FeedbackRow>, StorageError>;
    fn query_feedback_stats(&self, pattern_id: &str) -> Result<FeedbackStats, StorageError>;

    // ── pattern status (approve_pattern / auto-approval) ──

    fn get_pattern_status(&self, pattern_id: &str) -> Result<Option<PatternStatusRow>, StorageError>;
    fn upsert_pattern_status(&self, row: &PatternStatusRow) -> Result<(), StorageError>;
    fn query_patterns_by_status(&self, status: &str) -> Result<Vec<PatternStatusRow>, StorageError>;
}

// ─── Arc blanket impl ───────────────────────────────────────────────

impl<T: IDriftEnforcement + ?Sized> IDriftEnforcement for Arc<T> {
    fn insert_violation(&self, v: &ViolationRow) -> Result<(), StorageError> { (**self).insert_violation(v) }
    fn get_violation(&self, id: &str) -> Result<Option<ViolationRow>, StorageError> { (**self).get_violation(id) }
    fn query_violations_by_file(&self, f: &str) -> Result<Vec<ViolationRow>, StorageError> { (**self).query_violations_by_file(f) }
    fn query_violations_by_pattern(&self, pid: &str) -> Result<Vec<ViolationRow>, StorageError> { (**self).query_violations_by_pattern(pid) }
    fn query_all_violations(&self) -> Result<Vec<ViolationRow>, StorageError> { (**self).query_all_violations() }
    fn insert_feedback(&self, f: &FeedbackRow) -> Result<(), StorageError> { (**self).insert_feedback(f) }
    fn query_feedback_by_pattern(&self, pid: &str) -> Result<Vec<FeedbackRow>, StorageError> { (**self).query_feedback_by_pattern(pid) }
    fn query_feedback_stats(&self, pid: &str) -> Result<FeedbackStats, StorageError> { (**self).query_feedback_stats(pid) }
    fn get_pattern_status(&self, pattern_id: &str) -> Result<Option<PatternStatusRow>, StorageError> { (**self).get_pattern_status(pattern_id) }
    fn upsert_pattern_status(&self, row: &PatternStatusRow) -> Result<(), StorageError> { (**self).upsert_pattern_status(row) }
    fn query_patterns_by_status(&self, status: &str) -> Result<Vec<PatternStatusRow>, StorageError> { (**self).query_patterns_by_status(status) }
}
