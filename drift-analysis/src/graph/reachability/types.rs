//! Shared result/direction types for the in-memory and store-backed
//! reachability engines (spec.md §4.5, invariant B2).

use drift_core::types::collections::FxHashSet;
use petgraph::graph::NodeIndex;

/// BFS direction: callees (`Forward`) or callers (`Inverse`) of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalDirection {
    Forward,
    Inverse,
}

/// Result of a single reachability BFS from `source`.
///
/// `reachable_keys` (`"{file}::{name}"`, matching `CallGraph::node_key`) is
/// the engine-agnostic set invariant B2 compares across the in-memory and
/// store-backed engines; `reachable` (petgraph `NodeIndex`es) and
/// `visit_order` only make sense for the in-memory engine and are what
/// `ReachabilityCache` keys on.
#[derive(Debug, Clone)]
pub struct ReachabilityResult {
    pub source: NodeIndex,
    pub source_key: String,
    pub reachable: FxHashSet<NodeIndex>,
    pub reachable_keys: FxHashSet<String>,
    pub visit_order: Vec<NodeIndex>,
}

impl ReachabilityResult {
    /// The engine-agnostic reachable set compared by invariant B2.
    pub fn reachable_access(&self) -> &FxHashSet<String> {
        &self.reachable_keys
    }
}
