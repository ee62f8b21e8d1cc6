//! Inter-agent trust: how much weight one agent's assertions should carry
//! with another, derived from a running tally of validated, useful, and
//! contradicted prior exchanges.
//!
//! Backed by the `agent_trust` table (`observer_id`, `subject_id`,
//! `validated`, `useful`, `contradicted`, `total`); this module is the pure
//! computation over that row, storage-free like the rest of the crate.

use serde::{Deserialize, Serialize};

/// Trust assigned to an agent with no recorded history yet — neither
/// trusted nor distrusted, just unknown. Distinct from the formula's own
/// zero-evidence output (which is 0.0): this is the value used *before*
/// any record exists, not a computed score.
pub const BOOTSTRAP_TRUST: f64 = 0.5;

/// One observer's running tally of a subject agent's track record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentTrust {
    pub validated: u64,
    pub useful: u64,
    pub contradicted: u64,
    pub total: u64,
}

impl AgentTrust {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_validated(&mut self) {
        self.validated += 1;
        self.total += 1;
    }

    pub fn record_useful(&mut self) {
        self.useful += 1;
        self.total += 1;
    }

    pub fn record_contradicted(&mut self) {
        self.contradicted += 1;
        self.total += 1;
    }

    /// `(validated + useful) / (total + 1) * (1 - contradicted / (total + 1))`.
    ///
    /// The `+ 1` in both denominators is Laplace smoothing: a brand-new
    /// record with `total == 0` scores 0 here rather than dividing by
    /// zero — callers asking about an agent with no record at all should
    /// use [`trust_for`] instead, which returns [`BOOTSTRAP_TRUST`].
    pub fn overall(&self) -> f64 {
        let denom = self.total as f64 + 1.0;
        let positive = (self.validated + self.useful) as f64 / denom;
        let penalty = 1.0 - (self.contradicted as f64 / denom);
        positive * penalty
    }
}

/// Trust score to use for an agent: the computed score if a record exists,
/// otherwise the bootstrap value. Never call `AgentTrust::overall` directly
/// on a default-constructed record expecting the bootstrap value — it
/// returns 0.0, the formula's honest answer for zero evidence.
pub fn trust_for(record: Option<&AgentTrust>) -> f64 {
    match record {
        Some(trust) => trust.overall(),
        None => BOOTSTRAP_TRUST,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_record_bootstraps_to_half() {
        assert_eq!(trust_for(None), BOOTSTRAP_TRUST);
    }

    #[test]
    fn zero_evidence_record_scores_zero() {
        let trust = AgentTrust::new();
        assert_eq!(trust.overall(), 0.0);
        assert_eq!(trust_for(Some(&trust)), 0.0);
    }

    #[test]
    fn validated_history_raises_trust() {
        let mut trust = AgentTrust::new();
        trust.record_validated();
        trust.record_validated();
        trust.record_useful();
        // (2 + 1) / 4 * (1 - 0/4) = 0.75
        assert!((trust.overall() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn contradictions_penalize_trust() {
        let mut trust = AgentTrust::new();
        trust.record_validated();
        trust.record_contradicted();
        // (1 + 0) / 3 * (1 - 1/3) = 0.3333 * 0.6667
        let expected = (1.0 / 3.0) * (1.0 - 1.0 / 3.0);
        assert!((trust.overall() - expected).abs() < 1e-9);
    }
}
