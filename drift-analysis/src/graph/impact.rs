//! `CG.Impact`: blast-radius / risk scoring for a changed function, driven
//! by a reverse BFS over the call graph (spec.md §4.6).

use drift_core::traits::storage::drift_structural::ImpactScoreRow;
use drift_core::traits::CancellationToken;
use drift_core::types::collections::FxHashSet;
use petgraph::graph::NodeIndex;
use petgraph::Direction;

use crate::call_graph::types::CallGraph;

/// Inputs a single BFS pass over the in-memory graph can't know on its
/// own: which nodes are entry points, and which sit on a sensitive
/// (`DATA_ACCESS`-tagged) path.
pub struct ImpactContext<'a> {
    pub entry_points: &'a FxHashSet<NodeIndex>,
    pub sensitive_nodes: &'a FxHashSet<NodeIndex>,
}

/// Risk bucket boundaries: `>=75` critical, `>=50` high, `>=25` medium,
/// else low.
fn risk_bucket(score: f64) -> &'static str {
    if score >= 75.0 {
        "critical"
    } else if score >= 50.0 {
        "high"
    } else if score >= 25.0 {
        "medium"
    } else {
        "low"
    }
}

/// Reverse BFS from `source`: every node that can reach `source` (i.e.
/// every caller, transitively) is "affected" by a change to `source`.
pub fn compute_impact(
    graph: &CallGraph,
    source: NodeIndex,
    function_id: i64,
    ctx: &ImpactContext<'_>,
    token: &CancellationToken,
) -> ImpactScoreRow {
    let mut visited: FxHashSet<NodeIndex> = FxHashSet::default();
    let mut queue = std::collections::VecDeque::new();
    let mut depth_of = std::collections::HashMap::new();

    visited.insert(source);
    depth_of.insert(source, 0u32);
    queue.push_back(source);

    let mut entry_point_hits = 0u32;
    let mut sensitive_paths = 0u32;
    let mut max_depth = 0u32;

    while let Some(node) = queue.pop_front() {
        if token.is_cancelled() {
            break;
        }
        let depth = depth_of[&node];
        max_depth = max_depth.max(depth);

        let mut callers: Vec<NodeIndex> = graph.graph.neighbors_directed(node, Direction::Incoming).collect();
        callers.sort_unstable_by_key(|idx| idx.index());

        for caller in callers {
            if visited.insert(caller) {
                depth_of.insert(caller, depth + 1);
                if ctx.entry_points.contains(&caller) {
                    entry_point_hits += 1;
                }
                if ctx.sensitive_nodes.contains(&caller) {
                    sensitive_paths += 1;
                }
                queue.push_back(caller);
            }
        }
    }

    // `affected_count` excludes the source itself.
    let affected_count = visited.len().saturating_sub(1) as u32;

    // Weighted blend, capped at 100: breadth matters most, entry-point
    // exposure and sensitive-data proximity raise the floor, depth decays
    // the contribution of distant callers.
    let breadth = (affected_count as f64).min(50.0) * 1.0;
    let entry_weight = (entry_point_hits as f64) * 8.0;
    let sensitive_weight = (sensitive_paths as f64) * 10.0;
    let depth_penalty = (max_depth as f64) * 0.5;
    let risk_score = (breadth + entry_weight + sensitive_weight - depth_penalty).clamp(0.0, 100.0);

    ImpactScoreRow {
        function_id,
        affected_count,
        entry_point_hits,
        sensitive_paths,
        depth: max_depth,
        risk_score,
        risk_bucket: risk_bucket(risk_score).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call_graph::types::{CallEdge, FunctionNode, Resolution};

    fn node(file: &str, name: &str, line: u32) -> FunctionNode {
        FunctionNode {
            file: file.to_string(),
            name: name.to_string(),
            qualified_name: None,
            language: "typescript".into(),
            line,
            end_line: line + 5,
            is_entry_point: false,
            is_exported: false,
            signature_hash: 0,
            body_hash: 0,
        }
    }

    fn edge() -> CallEdge {
        CallEdge { resolution: Resolution::SameFile, confidence: 1.0, call_site_line: 1 }
    }

    #[test]
    fn affected_count_excludes_source() {
        let mut graph = CallGraph::new();
        let handler = graph.add_function(node("api.ts", "handler", 1));
        let service = graph.add_function(node("svc.ts", "service", 2));
        let repo = graph.add_function(node("repo.ts", "repo", 3));
        graph.add_edge(handler, service, edge());
        graph.add_edge(service, repo, edge());

        let entry_points = [handler].into_iter().collect();
        let sensitive = FxHashSet::default();
        let ctx = ImpactContext { entry_points: &entry_points, sensitive_nodes: &sensitive };

        let score = compute_impact(&graph, repo, 3, &ctx, &CancellationToken::never());
        assert_eq!(score.affected_count, 2);
        assert_eq!(score.entry_point_hits, 1);
        assert_eq!(score.depth, 2);
    }

    #[test]
    fn isolated_function_has_zero_risk() {
        let mut graph = CallGraph::new();
        let lone = graph.add_function(node("util.ts", "lone", 1));

        let entry_points = FxHashSet::default();
        let sensitive = FxHashSet::default();
        let ctx = ImpactContext { entry_points: &entry_points, sensitive_nodes: &sensitive };

        let score = compute_impact(&graph, lone, 1, &ctx, &CancellationToken::never());
        assert_eq!(score.affected_count, 0);
        assert_eq!(score.risk_bucket, "low");
    }

    #[test]
    fn sensitive_path_raises_bucket() {
        let mut graph = CallGraph::new();
        let handler = graph.add_function(node("api.ts", "handler", 1));
        let repo = graph.add_function(node("repo.ts", "repo", 2));
        graph.add_edge(handler, repo, edge());

        let entry_points = [handler].into_iter().collect();
        let sensitive = [handler].into_iter().collect();
        let ctx = ImpactContext { entry_points: &entry_points, sensitive_nodes: &sensitive };

        let score = compute_impact(&graph, repo, 2, &ctx, &CancellationToken::never());
        assert_eq!(score.sensitive_paths, 1);
        assert!(score.risk_score > 0.0);
    }
}
