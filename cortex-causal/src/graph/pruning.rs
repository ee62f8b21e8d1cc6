//! Weak-edge and orphan-node cleanup.
//!
//! Correction dampening (`dampening::propagate_correction`) and repeated
//! disconfirmation drive edge strength toward zero rather than deleting the
//! edge outright — pruning is the periodic sweep that turns "below the
//! cutoff" into "gone".

use petgraph::Direction;

use super::stable_graph::IndexedGraph;

/// Outcome of one `full_cleanup` pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PruneResult {
    pub edges_removed: usize,
    pub nodes_removed: usize,
}

/// Remove every edge whose strength is below `min_strength`, then remove
/// any node left with neither incoming nor outgoing edges.
pub fn full_cleanup(graph: &mut IndexedGraph, min_strength: f64) -> PruneResult {
    let edges_removed = prune_weak_edges(graph, min_strength);
    let nodes_removed = prune_orphan_nodes(graph);
    PruneResult { edges_removed, nodes_removed }
}

/// Remove edges with `strength < min_strength`. Returns the count removed.
pub fn prune_weak_edges(graph: &mut IndexedGraph, min_strength: f64) -> usize {
    let to_remove: Vec<_> = graph
        .graph
        .edge_indices()
        .filter(|&idx| {
            graph
                .graph
                .edge_weight(idx)
                .map(|w| w.strength < min_strength)
                .unwrap_or(false)
        })
        .collect();

    let removed = to_remove.len();
    for idx in to_remove {
        graph.graph.remove_edge(idx);
    }
    removed
}

/// Remove nodes with degree zero (both directions). Also drops them from
/// the id index so a later `ensure_node` re-creates a clean node.
pub fn prune_orphan_nodes(graph: &mut IndexedGraph) -> usize {
    let orphans: Vec<_> = graph
        .graph
        .node_indices()
        .filter(|&idx| {
            graph.graph.neighbors_directed(idx, Direction::Outgoing).count() == 0
                && graph.graph.neighbors_directed(idx, Direction::Incoming).count() == 0
        })
        .collect();

    let removed = orphans.len();
    for idx in orphans {
        if let Some(node) = graph.graph.remove_node(idx) {
            graph.node_index.remove(&node.memory_id);
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relations::CausalRelation;
    use super::super::stable_graph::CausalEdgeWeight;

    fn weighted_edge(strength: f64) -> CausalEdgeWeight {
        CausalEdgeWeight { relation: CausalRelation::Supports, strength, evidence: vec![], inferred: false }
    }

    #[test]
    fn weak_edges_are_removed_and_orphans_follow() {
        let mut g = IndexedGraph::new();
        let a = g.ensure_node("a", "decision", "");
        let b = g.ensure_node("b", "decision", "");
        g.graph.add_edge(a, b, weighted_edge(0.02));

        let result = full_cleanup(&mut g, 0.05);
        assert_eq!(result.edges_removed, 1);
        assert_eq!(result.nodes_removed, 2);
        assert_eq!(g.node_count(), 0);
    }

    #[test]
    fn strong_edges_survive() {
        let mut g = IndexedGraph::new();
        let a = g.ensure_node("a", "decision", "");
        let b = g.ensure_node("b", "decision", "");
        g.graph.add_edge(a, b, weighted_edge(0.9));

        let result = full_cleanup(&mut g, 0.05);
        assert_eq!(result.edges_removed, 0);
        assert_eq!(result.nodes_removed, 0);
        assert_eq!(g.edge_count(), 1);
    }
}
