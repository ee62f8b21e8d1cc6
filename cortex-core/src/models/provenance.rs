//! Provenance chain: the sequence of agent actions that shaped a memory's
//! current confidence, distinct from `AuditEntry` (the full mutation log) —
//! a provenance hop only records the confidence-relevant step.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One step in a memory's provenance chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvenanceHop {
    /// `None` until persisted, at which point it holds the assigned
    /// `provenance_hops.id`.
    pub id: Option<i64>,
    pub memory_id: String,
    pub agent_id: String,
    pub action: String,
    pub timestamp: DateTime<Utc>,
    pub confidence_delta: f64,
}

impl ProvenanceHop {
    pub fn new(memory_id: impl Into<String>, agent_id: impl Into<String>, action: impl Into<String>, confidence_delta: f64) -> Self {
        Self {
            id: None,
            memory_id: memory_id.into(),
            agent_id: agent_id.into(),
            action: action.into(),
            timestamp: Utc::now(),
            confidence_delta,
        }
    }
}
