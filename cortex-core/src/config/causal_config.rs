//! Causal graph subsystem configuration.

use serde::{Deserialize, Serialize};

/// Configuration for correction dampening, pruning, and delta sync.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CausalConfig {
    /// `strength(n) = base * dampening_factor^n` for a correction n hops
    /// from its source.
    pub dampening_factor: f64,
    /// Edges dampened below this strength are retracted rather than kept.
    pub dampening_cutoff: f64,
    /// Edges weaker than this are dropped by a pruning pass.
    pub prune_min_strength: f64,
}

impl Default for CausalConfig {
    fn default() -> Self {
        Self {
            dampening_factor: 0.7,
            dampening_cutoff: 0.05,
            prune_min_strength: 0.05,
        }
    }
}
