//! `IndexedGraph` — a `petgraph::StableGraph` keyed by memory id so callers
//! address nodes by string id instead of carrying `NodeIndex` values around.
//!
//! `StableGraph` (as opposed to plain `Graph`) is used because edges are
//! pruned and nodes occasionally removed (`pruning::full_cleanup`) without
//! wanting every other index in the graph to shift.

use petgraph::stable_graph::{NodeIndex, StableGraph};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::relations::CausalRelation;

/// A node in the causal graph: one per memory that participates in at
/// least one causal relationship.
#[derive(Debug, Clone, Default)]
pub struct CausalNode {
    pub memory_id: String,
    pub memory_type: String,
    pub summary: String,
}

/// The weight carried by one causal edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CausalEdgeWeight {
    pub relation: CausalRelation,
    pub strength: f64,
    pub evidence: Vec<String>,
    /// True when this edge was derived (e.g. by dampened propagation)
    /// rather than directly asserted by an actor.
    pub inferred: bool,
}

/// The causal graph plus a `memory_id -> NodeIndex` lookup.
#[derive(Debug, Default)]
pub struct IndexedGraph {
    pub graph: StableGraph<CausalNode, CausalEdgeWeight>,
    pub node_index: FxHashMap<String, NodeIndex>,
}

impl IndexedGraph {
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            node_index: FxHashMap::default(),
        }
    }

    /// Insert the node if absent and return its index either way, updating
    /// `memory_type`/`summary` only on first insertion — later calls with a
    /// blank summary (e.g. `ensure_node` used purely to address an edge
    /// endpoint) must not clobber a previously recorded one.
    pub fn ensure_node(&mut self, memory_id: &str, memory_type: &str, summary: &str) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(memory_id) {
            if !summary.is_empty() {
                if let Some(node) = self.graph.node_weight_mut(idx) {
                    node.summary = summary.to_string();
                }
            }
            return idx;
        }
        let idx = self.graph.add_node(CausalNode {
            memory_id: memory_id.to_string(),
            memory_type: memory_type.to_string(),
            summary: summary.to_string(),
        });
        self.node_index.insert(memory_id.to_string(), idx);
        idx
    }

    pub fn get_node(&self, memory_id: &str) -> Option<NodeIndex> {
        self.node_index.get(memory_id).copied()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_node_is_idempotent() {
        let mut g = IndexedGraph::new();
        let a = g.ensure_node("m1", "decision", "first");
        let b = g.ensure_node("m1", "decision", "");
        assert_eq!(a, b);
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.graph.node_weight(a).unwrap().summary, "first");
    }

    #[test]
    fn distinct_ids_get_distinct_nodes() {
        let mut g = IndexedGraph::new();
        let a = g.ensure_node("m1", "decision", "");
        let b = g.ensure_node("m2", "observation", "");
        assert_ne!(a, b);
        assert_eq!(g.node_count(), 2);
    }
}
