//! Storage-level causal edge types.
//!
//! These are the flat, string-relation types the storage layer persists.
//! cortex-causal builds its richer `CausalRelation`/`IndexedGraph` types on
//! top of these rather than cortex-core depending on cortex-causal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single causal edge as persisted in `causal_edges`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CausalEdge {
    pub source_id: String,
    pub target_id: String,
    pub relation: String,
    pub strength: f64,
    pub evidence: Vec<CausalEvidence>,
}

/// Supporting evidence for a causal edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CausalEvidence {
    pub description: String,
    pub source: String,
    pub timestamp: DateTime<Utc>,
}
