//! The store-backed half of `CG.Reachability`: forward/inverse BFS issued
//! directly against `IDriftAnalysis::get_edges_by_caller`/
//! `get_edges_by_callee` rather than an in-memory `CallGraph`.
//!
//! Exists so a caller that only has a `DriftStorageEngine` handle (no
//! in-memory graph built yet) can still answer a reachability query. Nodes
//! here are addressed by `functions.id`, the only stable identity frontier
//! queries expose — a `key_of` resolver translates ids back to the
//! `"{file}::{name}"` keys that `reachability::engine::ReachabilityEngine`
//! produces, so `reachable_access()` on both engines returns the same
//! `FxHashSet<String>` shape invariant B2 compares.

use std::collections::VecDeque;
use std::sync::Arc;

use drift_core::errors::StorageError;
use drift_core::traits::storage::drift_analysis::CallEdgeRow;
use drift_core::traits::storage::IDriftAnalysis;
use drift_core::traits::CancellationToken;
use drift_core::FxHashSet;

use super::reachability::types::TraversalDirection;

/// Result of a store-backed traversal.
#[derive(Debug, Clone)]
pub struct StoreReachabilityResult {
    pub source: i64,
    pub reachable: FxHashSet<i64>,
    pub reachable_keys: FxHashSet<String>,
    pub visit_order: Vec<i64>,
}

impl StoreReachabilityResult {
    /// The engine-agnostic set invariant B2 compares against
    /// `reachability::types::ReachabilityResult::reachable_access`.
    pub fn reachable_access(&self) -> &FxHashSet<String> {
        &self.reachable_keys
    }
}

/// BFS over the store, one `get_edges_by_caller`/`get_edges_by_callee`
/// call per frontier node.
pub struct StoreReachabilityEngine {
    store: Arc<dyn IDriftAnalysis>,
}

impl StoreReachabilityEngine {
    pub fn new(store: Arc<dyn IDriftAnalysis>) -> Self {
        Self { store }
    }

    /// `key_of` resolves a function id to its `"{file}::{name}"` key (the
    /// caller typically backs this with a small id-to-key map built once
    /// from `get_functions_by_file` over the scanned files). Ids the
    /// resolver can't place are dropped from `reachable_keys` but still
    /// count toward `reachable`.
    pub fn reachable(
        &self,
        source: i64,
        direction: TraversalDirection,
        key_of: &dyn Fn(i64) -> Option<String>,
        token: &CancellationToken,
    ) -> Result<StoreReachabilityResult, StorageError> {
        let mut visited = FxHashSet::default();
        let mut visit_order = Vec::new();
        let mut queue = VecDeque::new();

        visited.insert(source);
        queue.push_back(source);

        while let Some(node) = queue.pop_front() {
            if token.is_cancelled() {
                break;
            }

            let mut neighbors: Vec<i64> = match direction {
                TraversalDirection::Forward => self
                    .store
                    .get_edges_by_caller(node)?
                    .into_iter()
                    .filter_map(|e: CallEdgeRow| e.callee_id)
                    .collect(),
                TraversalDirection::Inverse => self
                    .store
                    .get_edges_by_callee(node)?
                    .into_iter()
                    .map(|e: CallEdgeRow| e.caller_id)
                    .collect(),
            };
            neighbors.sort_unstable();

            for neighbor in neighbors {
                if visited.insert(neighbor) {
                    visit_order.push(neighbor);
                    queue.push_back(neighbor);
                }
            }
        }

        let reachable_keys = visited.iter().filter_map(|id| key_of(*id)).collect();

        Ok(StoreReachabilityResult { source, reachable: visited, reachable_keys, visit_order })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_core::traits::storage::drift_analysis::{
        BoundaryRow, ConventionRow, DetectionRow, DetectionSummaryRow, FunctionRow, IDriftAnalysis,
        OutlierRow, PatternConfidenceRow, ScanHistoryRow,
    };
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Minimal in-memory `IDriftAnalysis` stub: just enough call-edge
    /// plumbing to drive the BFS in these tests.
    #[derive(Default)]
    struct FakeStore {
        edges: Mutex<HashMap<i64, Vec<CallEdgeRow>>>,
        reverse: Mutex<HashMap<i64, Vec<CallEdgeRow>>>,
    }

    impl FakeStore {
        fn add_edge(&self, caller: i64, callee: i64) {
            let edge = CallEdgeRow {
                caller_id: caller,
                callee_id: Some(callee),
                callee_name: String::new(),
                call_kind: "direct".into(),
                resolution: "resolved".into(),
                confidence: 1.0,
                call_site_line: 1,
            };
            self.edges.lock().unwrap().entry(caller).or_default().push(edge.clone());
            self.reverse.lock().unwrap().entry(callee).or_default().push(edge);
        }
    }

    #[allow(unused_variables)]
    impl IDriftAnalysis for FakeStore {
        fn get_functions_by_file(&self, file: &str) -> Result<Vec<FunctionRow>, StorageError> {
            unimplemented!()
        }
        fn get_function_by_qualified_name(&self, qualified_name: &str) -> Result<Option<FunctionRow>, StorageError> {
            unimplemented!()
        }
        fn delete_functions_by_file(&self, file: &str) -> Result<usize, StorageError> {
            unimplemented!()
        }
        fn count_functions(&self) -> Result<i64, StorageError> {
            unimplemented!()
        }
        fn count_entry_points(&self) -> Result<i64, StorageError> {
            unimplemented!()
        }
        fn insert_detections(&self, detections: &[DetectionRow]) -> Result<usize, StorageError> {
            unimplemented!()
        }
        fn get_detections_by_file(&self, file: &str) -> Result<Vec<DetectionRow>, StorageError> {
            unimplemented!()
        }
        fn get_detections_by_category(&self, category: &str) -> Result<Vec<DetectionRow>, StorageError> {
            unimplemented!()
        }
        fn query_all_detections(&self, limit: usize) -> Result<Vec<DetectionRow>, StorageError> {
            unimplemented!()
        }
        fn delete_detections_by_file(&self, file: &str) -> Result<usize, StorageError> {
            unimplemented!()
        }
        fn count_detections(&self) -> Result<i64, StorageError> {
            unimplemented!()
        }
        fn get_detections_by_method(&self, method: &str) -> Result<Vec<DetectionRow>, StorageError> {
            unimplemented!()
        }
        fn get_detections_by_pattern_prefix(&self, prefix: &str) -> Result<Vec<DetectionRow>, StorageError> {
            unimplemented!()
        }
        fn get_detections_by_cwe(&self, cwe_id: u32) -> Result<Vec<DetectionRow>, StorageError> {
            unimplemented!()
        }
        fn get_framework_detection_summary(&self) -> Result<Vec<DetectionSummaryRow>, StorageError> {
            unimplemented!()
        }
        fn upsert_confidence(&self, row: &PatternConfidenceRow) -> Result<(), StorageError> {
            unimplemented!()
        }
        fn query_confidence_by_tier(
            &self,
            tier: &str,
            after_id: Option<&str>,
            limit: usize,
        ) -> Result<Vec<PatternConfidenceRow>, StorageError> {
            unimplemented!()
        }
        fn query_all_confidence(&self) -> Result<Vec<PatternConfidenceRow>, StorageError> {
            unimplemented!()
        }
        fn insert_outlier(&self, row: &OutlierRow) -> Result<(), StorageError> {
            unimplemented!()
        }
        fn query_outliers_by_pattern(&self, pattern_id: &str) -> Result<Vec<OutlierRow>, StorageError> {
            unimplemented!()
        }
        fn insert_convention(&self, row: &ConventionRow) -> Result<(), StorageError> {
            unimplemented!()
        }
        fn query_conventions_by_category(&self, category: &str) -> Result<Vec<ConventionRow>, StorageError> {
            unimplemented!()
        }
        fn query_all_conventions(&self) -> Result<Vec<ConventionRow>, StorageError> {
            unimplemented!()
        }
        fn insert_boundaries(&self, boundaries: &[BoundaryRow]) -> Result<usize, StorageError> {
            unimplemented!()
        }
        fn get_boundaries_by_file(&self, file: &str) -> Result<Vec<BoundaryRow>, StorageError> {
            unimplemented!()
        }
        fn get_boundaries_by_framework(&self, framework: &str) -> Result<Vec<BoundaryRow>, StorageError> {
            unimplemented!()
        }
        fn get_sensitive_boundaries(&self) -> Result<Vec<BoundaryRow>, StorageError> {
            unimplemented!()
        }
        fn delete_boundaries_by_file(&self, file: &str) -> Result<usize, StorageError> {
            unimplemented!()
        }
        fn count_boundaries(&self) -> Result<i64, StorageError> {
            unimplemented!()
        }
        fn insert_call_edges(&self, edges: &[CallEdgeRow]) -> Result<usize, StorageError> {
            unimplemented!()
        }
        fn get_edges_by_caller(&self, caller_id: i64) -> Result<Vec<CallEdgeRow>, StorageError> {
            Ok(self.edges.lock().unwrap().get(&caller_id).cloned().unwrap_or_default())
        }
        fn get_edges_by_callee(&self, callee_id: i64) -> Result<Vec<CallEdgeRow>, StorageError> {
            Ok(self.reverse.lock().unwrap().get(&callee_id).cloned().unwrap_or_default())
        }
        fn delete_edges_by_file(&self, file: &str) -> Result<usize, StorageError> {
            unimplemented!()
        }
        fn get_unresolved_edges(&self) -> Result<Vec<CallEdgeRow>, StorageError> {
            unimplemented!()
        }
        fn resolve_call_edge(
            &self,
            caller_id: i64,
            call_site_line: i64,
            callee_name: &str,
            callee_id: i64,
            resolution: &str,
            confidence: f64,
        ) -> Result<(), StorageError> {
            unimplemented!()
        }
        fn count_call_edges(&self) -> Result<i64, StorageError> {
            unimplemented!()
        }
        fn count_resolved_edges(&self) -> Result<i64, StorageError> {
            unimplemented!()
        }
        fn insert_scan_start(&self, started_at: i64, root_path: &str) -> Result<i64, StorageError> {
            unimplemented!()
        }
        #[allow(clippy::too_many_arguments)]
        fn update_scan_complete(
            &self,
            id: i64,
            completed_at: i64,
            total_files: i64,
            added_files: i64,
            modified_files: i64,
            removed_files: i64,
            unchanged_files: i64,
            duration_ms: i64,
            status: &str,
            error: Option<&str>,
        ) -> Result<(), StorageError> {
            unimplemented!()
        }
        fn query_recent_scans(&self, limit: usize) -> Result<Vec<ScanHistoryRow>, StorageError> {
            unimplemented!()
        }
        fn count_scans(&self) -> Result<i64, StorageError> {
            unimplemented!()
        }
    }

    fn keys() -> impl Fn(i64) -> Option<String> {
        |id| Some(format!("f.ts::fn{id}"))
    }

    #[test]
    fn forward_bfs_follows_callee_chain() {
        let store = Arc::new(FakeStore::default());
        store.add_edge(1, 2);
        store.add_edge(2, 3);

        let engine = StoreReachabilityEngine::new(store);
        let result = engine
            .reachable(1, TraversalDirection::Forward, &keys(), &CancellationToken::never())
            .unwrap();

        assert_eq!(result.reachable.len(), 3);
        assert!(result.reachable.contains(&3));
        assert!(result.reachable_access().contains("f.ts::fn3"));
    }

    #[test]
    fn inverse_bfs_follows_caller_chain() {
        let store = Arc::new(FakeStore::default());
        store.add_edge(1, 2);
        store.add_edge(2, 3);

        let engine = StoreReachabilityEngine::new(store);
        let result = engine
            .reachable(3, TraversalDirection::Inverse, &keys(), &CancellationToken::never())
            .unwrap();

        assert_eq!(result.reachable.len(), 3);
        assert!(result.reachable.contains(&1));
    }

    #[test]
    fn cancellation_stops_expansion() {
        let store = Arc::new(FakeStore::default());
        store.add_edge(1, 2);
        store.add_edge(2, 3);

        let token = CancellationToken::new();
        token.cancel();
        let engine = StoreReachabilityEngine::new(store);
        let result = engine
            .reachable(1, TraversalDirection::Forward, &keys(), &token)
            .unwrap();

        assert_eq!(result.reachable.len(), 1);
    }
}
