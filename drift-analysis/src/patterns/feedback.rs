//! `CG.Pattern` feedback & auto-approval gate (spec.md §4.7).
//!
//! Distinct from `confidence::scorer::ConfidenceScorer` (which folds
//! category frequency, recency and an optional `FeedbackStore` into the
//! Beta parameters used for routine rescoring): this module is the exact
//! literal update the external `feedback(violation_id, action)` operation
//! applies to a single `VIOLATION`'s pattern, plus the three-way
//! `auto_approved` / `needs_review` / `likely_fp` classification and the
//! `approve_pattern` status transition.

use crate::patterns::confidence::types::{ConfidenceScore, MomentumDirection};

/// A user (or automated-feedback-loop) action on a `VIOLATION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackAction {
    /// The violation was real and got fixed: positive signal.
    Fix,
    /// The violation was a false positive.
    Dismiss,
    /// The violation was a weak false positive (less confident dismissal).
    Suppress,
}

/// Apply one feedback action to a pattern's Beta(alpha, beta) parameters,
/// per spec.md §4.7's literal update rule. Scenario 7: starting from
/// `Beta(1, 1)`, two `fix` and one `dismiss` yields `alpha=3, beta=2`
/// (posterior mean `0.6`).
pub fn apply_feedback(alpha: f64, beta: f64, action: FeedbackAction) -> (f64, f64) {
    match action {
        FeedbackAction::Fix => (alpha + 1.0, beta),
        FeedbackAction::Dismiss => (alpha, beta + 1.0),
        FeedbackAction::Suppress => (alpha, beta + 0.5),
    }
}

/// `ConfidenceScore` after applying one feedback action, for callers that
/// want the derived posterior mean/tier alongside the raw parameters.
pub fn apply_feedback_score(score: ConfidenceScore, action: FeedbackAction) -> ConfidenceScore {
    let (alpha, beta) = apply_feedback(score.alpha, score.beta, action);
    ConfidenceScore::from_params(alpha, beta, score.momentum)
}

/// A user action on a `PATTERN`, via `approve_pattern(pattern_id, action,
/// actor_id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalAction {
    Approve,
    Ignore,
}

/// PATTERN's lifecycle status (spec.md §3: `discovered → approved` or
/// `discovered → ignored`; both are terminal once user-set).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternStatus {
    Discovered,
    Approved,
    Ignored,
}

impl ApprovalAction {
    fn target_status(self) -> PatternStatus {
        match self {
            ApprovalAction::Approve => PatternStatus::Approved,
            ApprovalAction::Ignore => PatternStatus::Ignored,
        }
    }
}

/// Apply a user `approve_pattern` action. User approval is always
/// authoritative, so this unconditionally moves to the target status and
/// marks the pattern user-set — unlike `apply_auto_approval_gate`, which
/// must defer to an existing user decision.
pub fn apply_user_approval(action: ApprovalAction) -> (PatternStatus, bool) {
    (action.target_status(), true)
}

/// Outcome of the auto-approval gate (spec.md §4.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoApprovalClass {
    AutoApproved,
    NeedsReview,
    LikelyFp,
}

/// Thresholds the auto-approval gate checks against (mirrors
/// `drift_core::config::PatternConfig`; duplicated here as plain `f64`s
/// so this module has no dependency on `drift-core`'s config type beyond
/// what the caller already threads through).
#[derive(Debug, Clone, Copy)]
pub struct AutoApprovalThresholds {
    pub auto_approve_confidence: f64,
    pub auto_approve_max_outlier_ratio: f64,
    pub auto_approve_min_locations: u32,
    pub likely_fp_confidence: f64,
}

impl Default for AutoApprovalThresholds {
    fn default() -> Self {
        Self {
            auto_approve_confidence: 0.90,
            auto_approve_max_outlier_ratio: 0.50,
            auto_approve_min_locations: 3,
            likely_fp_confidence: 0.30,
        }
    }
}

impl From<&drift_core::config::PatternConfig> for AutoApprovalThresholds {
    fn from(cfg: &drift_core::config::PatternConfig) -> Self {
        Self {
            auto_approve_confidence: cfg.auto_approve_confidence,
            auto_approve_max_outlier_ratio: cfg.auto_approve_max_outlier_ratio,
            auto_approve_min_locations: cfg.auto_approve_min_locations,
            likely_fp_confidence: cfg.likely_fp_confidence,
        }
    }
}

/// Classify a pattern into `{auto_approved, needs_review, likely_fp}`
/// (spec.md §4.7). Checked in order: `confidence >= auto_approve_confidence`
/// AND `outlier_ratio <= auto_approve_max_outlier_ratio` AND
/// `location_count >= auto_approve_min_locations` AND no error-severity
/// violations attached to the pattern -> `AutoApproved`. Else
/// `confidence < likely_fp_confidence` -> `LikelyFp`. Else `NeedsReview`.
///
/// Scenario 6: confidence 0.92, outlier_ratio 0.40, 5 locations, no error
/// issues -> `AutoApproved`.
pub fn classify_auto_approval(
    confidence: f64,
    outlier_ratio: f64,
    location_count: u32,
    has_error_severity_violation: bool,
    thresholds: &AutoApprovalThresholds,
) -> AutoApprovalClass {
    if confidence >= thresholds.auto_approve_confidence
        && outlier_ratio <= thresholds.auto_approve_max_outlier_ratio
        && location_count >= thresholds.auto_approve_min_locations
        && !has_error_severity_violation
    {
        return AutoApprovalClass::AutoApproved;
    }
    if confidence < thresholds.likely_fp_confidence {
        return AutoApprovalClass::LikelyFp;
    }
    AutoApprovalClass::NeedsReview
}

/// Apply the auto-approval gate's classification to a pattern's current
/// status. Per spec.md §4.7, a transition to `approved` is persisted but
/// **never overwrites a user-set status**: if `user_set` is already
/// `true` (the pattern was explicitly approved or ignored via
/// `approve_pattern`), this is a no-op regardless of `class`. Idempotent:
/// running the gate again with the same inputs on an already-approved,
/// non-user-set pattern leaves it `Approved` (spec.md scenario 6's "a
/// second run leaves it approved").
pub fn apply_auto_approval_gate(
    current_status: PatternStatus,
    user_set: bool,
    class: AutoApprovalClass,
) -> (PatternStatus, bool) {
    if user_set {
        return (current_status, user_set);
    }
    match class {
        AutoApprovalClass::AutoApproved => (PatternStatus::Approved, false),
        AutoApprovalClass::NeedsReview | AutoApprovalClass::LikelyFp => (current_status, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_bayesian_update_matches_scenario_7() {
        let (mut alpha, mut beta) = (1.0, 1.0);
        (alpha, beta) = apply_feedback(alpha, beta, FeedbackAction::Fix);
        (alpha, beta) = apply_feedback(alpha, beta, FeedbackAction::Fix);
        (alpha, beta) = apply_feedback(alpha, beta, FeedbackAction::Dismiss);
        assert_eq!((alpha, beta), (3.0, 2.0));
        let score = ConfidenceScore::from_params(alpha, beta, MomentumDirection::Stable);
        assert!((score.value - 0.6).abs() < 1e-9);
    }

    #[test]
    fn suppress_adds_half_beta() {
        let (alpha, beta) = apply_feedback(1.0, 1.0, FeedbackAction::Suppress);
        assert_eq!((alpha, beta), (1.0, 1.5));
    }

    #[test]
    fn auto_approval_gate_matches_scenario_6() {
        let thresholds = AutoApprovalThresholds::default();
        let class = classify_auto_approval(0.92, 0.40, 5, false, &thresholds);
        assert_eq!(class, AutoApprovalClass::AutoApproved);

        let (status, user_set) =
            apply_auto_approval_gate(PatternStatus::Discovered, false, class);
        assert_eq!(status, PatternStatus::Approved);
        assert!(!user_set);

        // A second run leaves it approved.
        let (status2, _) = apply_auto_approval_gate(status, user_set, class);
        assert_eq!(status2, PatternStatus::Approved);
    }

    #[test]
    fn low_confidence_is_likely_fp() {
        let thresholds = AutoApprovalThresholds::default();
        let class = classify_auto_approval(0.2, 0.1, 10, false, &thresholds);
        assert_eq!(class, AutoApprovalClass::LikelyFp);
    }

    #[test]
    fn user_approval_is_never_overwritten_by_auto_gate() {
        let (status, user_set) = apply_user_approval(ApprovalAction::Ignore);
        assert_eq!(status, PatternStatus::Ignored);
        assert!(user_set);

        let thresholds = AutoApprovalThresholds::default();
        let class = classify_auto_approval(0.99, 0.0, 100, false, &thresholds);
        let (after_gate, still_user_set) = apply_auto_approval_gate(status, user_set, class);
        assert_eq!(after_gate, PatternStatus::Ignored);
        assert!(still_user_set);
    }

    #[test]
    fn error_severity_violation_blocks_auto_approval() {
        let thresholds = AutoApprovalThresholds::default();
        let class = classify_auto_approval(0.95, 0.1, 10, true, &thresholds);
        assert_eq!(class, AutoApprovalClass::NeedsReview);
    }
}
