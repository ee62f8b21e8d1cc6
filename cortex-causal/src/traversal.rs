//! Forward (effects), backward (origins), and bidirectional traversal of
//! the causal graph, bounded by depth, edge strength, and node count.
//!
//! Used both against the live graph (`GraphManager`) and against graphs
//! reconstructed at a point in time (`graph::temporal_graph`) — this
//! module only ever sees an [`IndexedGraph`], never a database connection
//! or a timestamp.

use petgraph::stable_graph::NodeIndex;
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use rustc_hash::FxHashMap;

use crate::graph::stable_graph::IndexedGraph;

/// Bounds on one traversal run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraversalConfig {
    pub max_depth: usize,
    /// Edges weaker than this are not followed.
    pub min_strength: f64,
    /// Stop discovering new nodes once this many have been visited,
    /// including the origin.
    pub max_nodes: usize,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self { max_depth: 10, min_strength: 0.0, max_nodes: 1000 }
    }
}

/// One node reached during a traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct TraversalNode {
    pub memory_id: String,
    pub depth: usize,
    /// Product of edge strengths along the path this node was first
    /// reached by (breadth-first, so the shallowest path).
    pub path_strength: f64,
}

/// The full result of one traversal call.
#[derive(Debug, Clone, PartialEq)]
pub struct TraversalResult {
    pub origin_id: String,
    pub nodes: Vec<TraversalNode>,
    pub max_depth_reached: usize,
}

/// Runs bounded BFS traversals over an [`IndexedGraph`].
pub struct TraversalEngine {
    config: TraversalConfig,
}

impl TraversalEngine {
    pub fn new(config: TraversalConfig) -> Self {
        Self { config }
    }

    /// Walk forward along directed edges: what did `memory_id` cause,
    /// transitively.
    pub fn trace_effects(&self, graph: &IndexedGraph, memory_id: &str) -> TraversalResult {
        self.bfs(graph, memory_id, Direction::Outgoing)
    }

    /// Walk backward along directed edges: what caused `memory_id`,
    /// transitively.
    pub fn trace_origins(&self, graph: &IndexedGraph, memory_id: &str) -> TraversalResult {
        self.bfs(graph, memory_id, Direction::Incoming)
    }

    /// Union of effects and origins. A node reached both ways keeps
    /// whichever direction found it at a shallower depth (ties keep the
    /// stronger path).
    pub fn bidirectional(&self, graph: &IndexedGraph, memory_id: &str) -> TraversalResult {
        let effects = self.trace_effects(graph, memory_id);
        let origins = self.trace_origins(graph, memory_id);

        let mut by_id: FxHashMap<String, TraversalNode> = FxHashMap::default();
        for node in effects.nodes.into_iter().chain(origins.nodes) {
            by_id
                .entry(node.memory_id.clone())
                .and_modify(|existing| {
                    if node.depth < existing.depth
                        || (node.depth == existing.depth && node.path_strength > existing.path_strength)
                    {
                        *existing = node.clone();
                    }
                })
                .or_insert(node);
        }

        let max_depth_reached = effects.max_depth_reached.max(origins.max_depth_reached);
        let mut nodes: Vec<_> = by_id.into_values().collect();
        nodes.sort_by(|a, b| a.depth.cmp(&b.depth).then_with(|| a.memory_id.cmp(&b.memory_id)));

        TraversalResult { origin_id: memory_id.to_string(), nodes, max_depth_reached }
    }

    fn bfs(&self, graph: &IndexedGraph, memory_id: &str, direction: Direction) -> TraversalResult {
        let mut result = TraversalResult { origin_id: memory_id.to_string(), nodes: vec![], max_depth_reached: 0 };

        let Some(origin_idx) = graph.get_node(memory_id) else {
            return result;
        };

        let mut visited: FxHashMap<NodeIndex, f64> = FxHashMap::default();
        visited.insert(origin_idx, 1.0);
        let mut frontier = vec![(origin_idx, 0usize, 1.0f64)];

        while !frontier.is_empty() && visited.len() < self.config.max_nodes {
            let mut next_frontier = Vec::new();

            for (node_idx, depth, path_strength) in frontier {
                if depth >= self.config.max_depth {
                    continue;
                }

                let mut neighbors: Vec<_> = graph
                    .graph
                    .edges_directed(node_idx, direction)
                    .filter_map(|edge| {
                        let weight = edge.weight();
                        if weight.strength < self.config.min_strength {
                            return None;
                        }
                        let other = if direction == Direction::Outgoing { edge.target() } else { edge.source() };
                        Some((other, weight.strength))
                    })
                    .collect();

                neighbors.sort_by(|a, b| {
                    let a_id = &graph.graph[a.0].memory_id;
                    let b_id = &graph.graph[b.0].memory_id;
                    a_id.cmp(b_id)
                });

                for (neighbor_idx, strength) in neighbors {
                    if visited.len() >= self.config.max_nodes {
                        break;
                    }
                    if visited.contains_key(&neighbor_idx) {
                        continue;
                    }
                    let next_strength = path_strength * strength;
                    visited.insert(neighbor_idx, next_strength);
                    let next_depth = depth + 1;
                    result.max_depth_reached = result.max_depth_reached.max(next_depth);
                    result.nodes.push(TraversalNode {
                        memory_id: graph.graph[neighbor_idx].memory_id.clone(),
                        depth: next_depth,
                        path_strength: next_strength,
                    });
                    next_frontier.push((neighbor_idx, next_depth, next_strength));
                }
            }

            frontier = next_frontier;
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relations::CausalRelation;
    use crate::graph::stable_graph::CausalEdgeWeight;

    fn edge(strength: f64) -> CausalEdgeWeight {
        CausalEdgeWeight { relation: CausalRelation::Causes, strength, evidence: vec![], inferred: false }
    }

    fn linear_graph() -> IndexedGraph {
        let mut g = IndexedGraph::new();
        let a = g.ensure_node("a", "decision", "");
        let b = g.ensure_node("b", "decision", "");
        let c = g.ensure_node("c", "decision", "");
        g.graph.add_edge(a, b, edge(0.8));
        g.graph.add_edge(b, c, edge(0.5));
        g
    }

    #[test]
    fn effects_walk_forward_with_decaying_path_strength() {
        let g = linear_graph();
        let engine = TraversalEngine::new(TraversalConfig::default());
        let result = engine.trace_effects(&g, "a");

        assert_eq!(result.origin_id, "a");
        assert_eq!(result.nodes.len(), 2);
        assert_eq!(result.max_depth_reached, 2);

        let b = result.nodes.iter().find(|n| n.memory_id == "b").unwrap();
        assert_eq!(b.depth, 1);
        assert!((b.path_strength - 0.8).abs() < 1e-9);

        let c = result.nodes.iter().find(|n| n.memory_id == "c").unwrap();
        assert_eq!(c.depth, 2);
        assert!((c.path_strength - 0.4).abs() < 1e-9);
    }

    #[test]
    fn origins_walk_backward() {
        let g = linear_graph();
        let engine = TraversalEngine::new(TraversalConfig::default());
        let result = engine.trace_origins(&g, "c");
        assert_eq!(result.nodes.iter().map(|n| n.memory_id.clone()).collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn unknown_origin_returns_empty_result() {
        let g = linear_graph();
        let engine = TraversalEngine::new(TraversalConfig::default());
        let result = engine.trace_effects(&g, "missing");
        assert!(result.nodes.is_empty());
        assert_eq!(result.max_depth_reached, 0);
    }

    #[test]
    fn max_depth_bounds_the_walk() {
        let g = linear_graph();
        let engine = TraversalEngine::new(TraversalConfig { max_depth: 1, min_strength: 0.0, max_nodes: 1000 });
        let result = engine.trace_effects(&g, "a");
        assert_eq!(result.nodes.len(), 1);
        assert_eq!(result.nodes[0].memory_id, "b");
    }

    #[test]
    fn min_strength_filters_weak_edges() {
        let g = linear_graph();
        let engine = TraversalEngine::new(TraversalConfig { max_depth: 10, min_strength: 0.6, max_nodes: 1000 });
        let result = engine.trace_effects(&g, "a");
        assert_eq!(result.nodes.len(), 1);
        assert_eq!(result.nodes[0].memory_id, "b");
    }

    #[test]
    fn bidirectional_covers_both_directions() {
        let g = linear_graph();
        let engine = TraversalEngine::new(TraversalConfig::default());
        let result = engine.bidirectional(&g, "b");
        let ids: Vec<_> = result.nodes.iter().map(|n| n.memory_id.clone()).collect();
        assert!(ids.contains(&"a".to_string()));
        assert!(ids.contains(&"c".to_string()));
    }
}
