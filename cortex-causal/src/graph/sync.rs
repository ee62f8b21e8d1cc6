//! Conversions between the storage-level row shape (`cortex_core::traits::CausalEdge`,
//! a flat string-keyed struct with no DAG or index structure of its own) and
//! the in-memory `IndexedGraph`.
//!
//! Kept separate from `delta_sync` (the network three-step protocol between
//! two agents) — this module never touches a vector clock or a peer, it
//! only moves rows in and out of the graph.

use cortex_core::traits::causal_engine::CausalEdge;

use crate::relations::CausalRelation;

use super::stable_graph::{CausalEdgeWeight, IndexedGraph};

/// Load a graph from a flat set of persisted edges. `memory_type` is
/// unknown at this layer (the `causal_edges` table carries no type column),
/// so every node is created with an empty type; callers that need it join
/// against `memories` separately.
pub fn graph_from_rows(rows: &[CausalEdge]) -> IndexedGraph {
    let mut graph = IndexedGraph::new();
    for row in rows {
        let relation = CausalRelation::from_str_name(&row.relation).unwrap_or(CausalRelation::Supports);
        let source = graph.ensure_node(&row.source_id, "", "");
        let target = graph.ensure_node(&row.target_id, "", "");
        graph.graph.add_edge(
            source,
            target,
            CausalEdgeWeight {
                relation,
                strength: row.strength,
                evidence: row.evidence.iter().map(|e| e.description.clone()).collect(),
                inferred: false,
            },
        );
    }
    graph
}

/// Flatten the graph back to storage rows, losing the `evidence` timestamps
/// and source attribution that the richer `CausalEvidence` type carries —
/// this direction is for consistency checks and tests, not the write path
/// (writes go through `cortex_storage::queries::causal_ops` directly).
pub fn rows_from_graph(graph: &IndexedGraph) -> Vec<CausalEdge> {
    graph
        .graph
        .edge_indices()
        .filter_map(|idx| {
            let (source_idx, target_idx) = graph.graph.edge_endpoints(idx)?;
            let weight = graph.graph.edge_weight(idx)?;
            let source = graph.graph.node_weight(source_idx)?;
            let target = graph.graph.node_weight(target_idx)?;
            Some(CausalEdge {
                source_id: source.memory_id.clone(),
                target_id: target.memory_id.clone(),
                relation: weight.relation.as_str().to_string(),
                strength: weight.strength,
                evidence: vec![],
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cortex_core::traits::causal_engine::CausalEvidence;
    use chrono::Utc;

    #[test]
    fn round_trips_core_fields() {
        let rows = vec![CausalEdge {
            source_id: "a".into(),
            target_id: "b".into(),
            relation: "causes".into(),
            strength: 0.7,
            evidence: vec![CausalEvidence {
                description: "observed twice".into(),
                source: "agent-1".into(),
                timestamp: Utc::now(),
            }],
        }];

        let graph = graph_from_rows(&rows);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);

        let back = rows_from_graph(&graph);
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].source_id, "a");
        assert_eq!(back[0].target_id, "b");
        assert_eq!(back[0].relation, "caused");
        assert_eq!(back[0].strength, 0.7);
    }

    #[test]
    fn unknown_relation_falls_back_to_supports() {
        let rows = vec![CausalEdge {
            source_id: "a".into(),
            target_id: "b".into(),
            relation: "made_up".into(),
            strength: 0.5,
            evidence: vec![],
        }];
        let graph = graph_from_rows(&rows);
        let idx = graph.get_node("a").unwrap();
        let edge = graph.graph.edge_weight(graph.graph.find_edge(idx, graph.get_node("b").unwrap()).unwrap()).unwrap();
        assert_eq!(edge.relation, CausalRelation::Supports);
    }
}
