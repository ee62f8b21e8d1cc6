//! Cycle rejection: the causal graph is a DAG by construction.
//!
//! Every directed relation (`CausalRelation::is_directed`) must not close a
//! cycle — a memory cannot, transitively, cause itself. Checked before the
//! edge is inserted rather than detected-and-rolled-back after, since
//! `StableGraph` gives no cheap undo.

use petgraph::algo::has_path_connecting;
use petgraph::stable_graph::NodeIndex;

use super::stable_graph::IndexedGraph;

/// True if adding an edge `source -> target` would create a cycle, i.e.
/// `target` can already reach `source`.
pub fn would_create_cycle(graph: &IndexedGraph, source: NodeIndex, target: NodeIndex) -> bool {
    if source == target {
        return true;
    }
    has_path_connecting(&graph.graph, target, source, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_loop_is_a_cycle() {
        let mut g = IndexedGraph::new();
        let a = g.ensure_node("a", "decision", "");
        assert!(would_create_cycle(&g, a, a));
    }

    #[test]
    fn no_path_is_not_a_cycle() {
        let mut g = IndexedGraph::new();
        let a = g.ensure_node("a", "decision", "");
        let b = g.ensure_node("b", "decision", "");
        assert!(!would_create_cycle(&g, a, b));
    }

    #[test]
    fn closing_a_path_is_a_cycle() {
        use crate::relations::CausalRelation;
        use super::super::stable_graph::CausalEdgeWeight;

        let mut g = IndexedGraph::new();
        let a = g.ensure_node("a", "decision", "");
        let b = g.ensure_node("b", "decision", "");
        let c = g.ensure_node("c", "decision", "");
        g.graph.add_edge(
            a,
            b,
            CausalEdgeWeight { relation: CausalRelation::Causes, strength: 0.8, evidence: vec![], inferred: false },
        );
        g.graph.add_edge(
            b,
            c,
            CausalEdgeWeight { relation: CausalRelation::Causes, strength: 0.8, evidence: vec![], inferred: false },
        );
        // c -> a would close the cycle a -> b -> c -> a
        assert!(would_create_cycle(&g, c, a));
        // a -> c does not close a cycle (it's a shortcut, not a loop)
        assert!(!would_create_cycle(&g, a, c));
    }
}
