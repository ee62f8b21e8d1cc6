//! In-memory forward/inverse BFS over a `CallGraph` (spec.md §4.5).
//!
//! Visit order is deterministic: at each frontier, neighbors are sorted by
//! `(callee_name, line)` before enqueueing, so two runs over the same graph
//! always walk nodes in the same order (even though the *set* of reachable
//! nodes is all that invariant B2 requires to agree with the store-backed
//! engine).

use drift_core::traits::CancellationToken;
use drift_core::types::collections::FxHashSet;
use petgraph::graph::NodeIndex;
use petgraph::Direction;

use crate::call_graph::types::CallGraph;

use super::cache::ReachabilityCache;
use super::types::{ReachabilityResult, TraversalDirection};

/// In-memory reachability engine backed by a `CallGraph` already held
/// entirely in memory (as opposed to `store_engine`, which re-queries
/// a `DriftStorageEngine` per frontier).
pub struct ReachabilityEngine<'g> {
    graph: &'g CallGraph,
    cache: Option<ReachabilityCache>,
}

impl<'g> ReachabilityEngine<'g> {
    pub fn new(graph: &'g CallGraph) -> Self {
        Self { graph, cache: None }
    }

    pub fn with_cache(graph: &'g CallGraph, max_entries: usize) -> Self {
        Self {
            graph,
            cache: Some(ReachabilityCache::new(max_entries)),
        }
    }

    pub fn cache(&self) -> Option<&ReachabilityCache> {
        self.cache.as_ref()
    }

    /// BFS reachability from `source` in `direction`, checking `token` at
    /// every frontier expansion.
    pub fn reachable(
        &self,
        source: NodeIndex,
        direction: TraversalDirection,
        token: &CancellationToken,
    ) -> ReachabilityResult {
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(source, direction) {
                return hit;
            }
        }

        let petgraph_direction = match direction {
            TraversalDirection::Forward => Direction::Outgoing,
            TraversalDirection::Inverse => Direction::Incoming,
        };

        let mut visited = FxHashSet::default();
        let mut visit_order = Vec::new();
        let mut queue = std::collections::VecDeque::new();

        visited.insert(source);
        queue.push_back(source);

        while let Some(node) = queue.pop_front() {
            if token.is_cancelled() {
                break;
            }

            let mut neighbors: Vec<NodeIndex> = self
                .graph
                .graph
                .neighbors_directed(node, petgraph_direction)
                .collect();
            neighbors.sort_by_key(|&n| {
                self.graph
                    .graph
                    .node_weight(n)
                    .map(|f| (f.name.clone(), f.line))
                    .unwrap_or_default()
            });

            for neighbor in neighbors {
                if visited.insert(neighbor) {
                    visit_order.push(neighbor);
                    queue.push_back(neighbor);
                }
            }
        }

        let reachable_keys: FxHashSet<String> = visited
            .iter()
            .filter_map(|&idx| self.graph.node_key(idx))
            .collect();

        let result = ReachabilityResult {
            source,
            source_key: self.graph.node_key(source).unwrap_or_default(),
            reachable: visited,
            reachable_keys,
            visit_order,
        };

        if let Some(cache) = &self.cache {
            cache.put(result.clone(), direction);
        }

        result
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
            language: "typescript".to_string(),
            line,
            end_line: line + 5,
            is_entry_point: false,
            is_exported: false,
            signature_hash: 0,
            body_hash: 0,
        }
    }

    fn edge() -> CallEdge {
        CallEdge {
            resolution: Resolution::SameFile,
            confidence: 1.0,
            call_site_line: 1,
        }
    }

    #[test]
    fn forward_bfs_reaches_transitive_callees() {
        let mut graph = CallGraph::new();
        let a = graph.add_function(node("a.ts", "a", 1));
        let b = graph.add_function(node("a.ts", "b", 2));
        let c = graph.add_function(node("a.ts", "c", 3));
        graph.add_edge(a, b, edge());
        graph.add_edge(b, c, edge());

        let engine = ReachabilityEngine::new(&graph);
        let result = engine.reachable(a, TraversalDirection::Forward, &CancellationToken::never());

        assert_eq!(result.reachable.len(), 3);
        assert!(result.reachable.contains(&c));
    }

    #[test]
    fn inverse_bfs_reaches_transitive_callers() {
        let mut graph = CallGraph::new();
        let a = graph.add_function(node("a.ts", "a", 1));
        let b = graph.add_function(node("a.ts", "b", 2));
        let c = graph.add_function(node("a.ts", "c", 3));
        graph.add_edge(a, b, edge());
        graph.add_edge(b, c, edge());

        let engine = ReachabilityEngine::new(&graph);
        let result = engine.reachable(c, TraversalDirection::Inverse, &CancellationToken::never());

        assert!(result.reachable.contains(&a));
        assert!(result.reachable.contains(&b));
    }

    #[test]
    fn cache_hit_returns_identical_result() {
        let mut graph = CallGraph::new();
        let a = graph.add_function(node("a.ts", "a", 1));
        let b = graph.add_function(node("a.ts", "b", 2));
        graph.add_edge(a, b, edge());

        let engine = ReachabilityEngine::with_cache(&graph, 16);
        let first = engine.reachable(a, TraversalDirection::Forward, &CancellationToken::never());
        let second = engine.reachable(a, TraversalDirection::Forward, &CancellationToken::never());

        assert_eq!(first.reachable_keys, second.reachable_keys);
        assert_eq!(engine.cache().unwrap().hit_count(), 1);
    }

    #[test]
    fn cancellation_stops_expansion() {
        let mut graph = CallGraph::new();
        let a = graph.add_function(node("a.ts", "a", 1));
        let b = graph.add_function(node("a.ts", "b", 2));
        graph.add_edge(a, b, edge());

        let token = CancellationToken::new();
        token.cancel();
        let engine = ReachabilityEngine::new(&graph);
        let result = engine.reachable(a, TraversalDirection::Forward, &token);

        // the source itself is always recorded before the first cancellation check
        assert_eq!(result.reachable.len(), 1);
    }
}
